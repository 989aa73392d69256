use soroban_sdk::{testutils::Address as _, Address, Env};

use crc_eternal_storage::contract::{EternalStorage, EternalStorageClient};

use crate::contract::{PayloadRegistrar, PayloadRegistrarClient};

pub fn deploy_eternal_storage_contract<'a>(
    env: &Env,
    admin: impl Into<Option<Address>>,
) -> EternalStorageClient<'a> {
    let admin = admin.into().unwrap_or(Address::generate(env));
    let client = EternalStorageClient::new(env, &env.register(EternalStorage, ()));

    client.initialize(&admin);

    client
}

pub fn deploy_payload_registrar_contract<'a>(
    env: &Env,
    eternal_storage: &Address,
) -> PayloadRegistrarClient<'a> {
    let client = PayloadRegistrarClient::new(env, &env.register(PayloadRegistrar, ()));

    client.initialize(eternal_storage);

    client
}
