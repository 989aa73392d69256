use soroban_sdk::{testutils::Address as _, Address, Env};

use crc_eternal_storage::contract::{EternalStorage, EternalStorageClient};

use crate::contract::{SourceRegistrar, SourceRegistrarClient};

pub fn deploy_eternal_storage_contract<'a>(
    env: &Env,
    admin: impl Into<Option<Address>>,
) -> EternalStorageClient<'a> {
    let admin = admin.into().unwrap_or(Address::generate(env));
    let client = EternalStorageClient::new(env, &env.register(EternalStorage, ()));

    client.initialize(&admin);

    client
}

pub fn deploy_source_registrar_contract<'a>(
    env: &Env,
    eternal_storage: &Address,
) -> SourceRegistrarClient<'a> {
    let client = SourceRegistrarClient::new(env, &env.register(SourceRegistrar, ()));

    client.initialize(eternal_storage);

    client
}
