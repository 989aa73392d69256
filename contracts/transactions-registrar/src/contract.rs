use crc_registry::{
    error::ErrorCode, interface::EternalStorageClient, keys::record_id,
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Env,
};

use crate::{
    events::TransactionsEvents,
    storage::{
        get_config, is_initialized, save_config, set_initialized, field_key, Config, Transaction,
        FIELD_CRC_QUANTITY, FIELD_CREATED_AT, FIELD_CUSTOMER_ID, FIELD_STATUS,
    },
    transactions::TransactionsRegistrarTrait,
};

contractmeta!(
    key = "Description",
    val = "Registrar for CRC credit sale transactions"
);

#[contract]
pub struct TransactionsRegistrar;

#[contractimpl]
impl TransactionsRegistrarTrait for TransactionsRegistrar {
    fn initialize(env: Env, eternal_storage: Address) {
        if is_initialized(&env) {
            log!(
                &env,
                "Transactions Registrar: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);

        save_config(
            &env,
            Config {
                eternal_storage: eternal_storage.clone(),
            },
        );

        TransactionsEvents::initialize(&env, eternal_storage);
    }

    /// Record a credit sale. The status field is forced to 0 whatever the
    /// caller intends; later lifecycle transitions are not handled here.
    fn create(env: Env, id: u128, customer_id: u128, crc_quantity: u128, created_at: u64) {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let caller = env.current_contract_address();
        let rid = record_id(&env, id);

        store.set_id(
            &caller,
            &field_key(&env, &rid, FIELD_CUSTOMER_ID),
            &record_id(&env, customer_id),
        );
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_CRC_QUANTITY),
            &crc_quantity,
        );
        store.set_uint(&caller, &field_key(&env, &rid, FIELD_STATUS), &0u128);
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_CREATED_AT),
            &u128::from(created_at),
        );

        TransactionsEvents::create(&env, rid);
    }

    fn get_transaction(env: Env, id: u128) -> Transaction {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let rid = record_id(&env, id);

        Transaction {
            customer_id: store.get_id(&field_key(&env, &rid, FIELD_CUSTOMER_ID)),
            crc_quantity: store.get_uint(&field_key(&env, &rid, FIELD_CRC_QUANTITY)),
            status: store.get_uint(&field_key(&env, &rid, FIELD_STATUS)) as u32,
            created_at: store.get_uint(&field_key(&env, &rid, FIELD_CREATED_AT)) as u64,
            id: rid,
        }
    }

    fn get_eternal_storage(env: Env) -> Address {
        get_config(&env).eternal_storage
    }
}
