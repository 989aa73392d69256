use soroban_sdk::{testutils::Address as _, Address, Env};

use crc_eternal_storage::contract::{EternalStorage, EternalStorageClient};

use crate::contract::{TransactionsRegistrar, TransactionsRegistrarClient};

pub fn deploy_eternal_storage_contract<'a>(
    env: &Env,
    admin: impl Into<Option<Address>>,
) -> EternalStorageClient<'a> {
    let admin = admin.into().unwrap_or(Address::generate(env));
    let client = EternalStorageClient::new(env, &env.register(EternalStorage, ()));

    client.initialize(&admin);

    client
}

pub fn deploy_transactions_registrar_contract<'a>(
    env: &Env,
    eternal_storage: &Address,
) -> TransactionsRegistrarClient<'a> {
    let client = TransactionsRegistrarClient::new(env, &env.register(TransactionsRegistrar, ()));

    client.initialize(eternal_storage);

    client
}
