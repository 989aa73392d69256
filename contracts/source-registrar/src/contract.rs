use crc_registry::{
    error::ErrorCode, interface::EternalStorageClient, keys::record_id,
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Env, String,
};

use crate::{
    events::SourceEvents,
    source::SourceRegistrarTrait,
    storage::{
        get_config, is_initialized, save_config, set_initialized, field_key, Config, Source,
        FIELD_NAME, FIELD_SOURCE_TYPE, FIELD_STARTED_AT, FIELD_STATUS, FIELD_URL_CONTRACT,
        FIELD_VOLUME_PER_YEAR,
    },
};

contractmeta!(
    key = "Description",
    val = "Registrar for CRC wood sources"
);

#[contract]
pub struct SourceRegistrar;

#[contractimpl]
impl SourceRegistrarTrait for SourceRegistrar {
    fn initialize(env: Env, eternal_storage: Address) {
        if is_initialized(&env) {
            log!(
                &env,
                "Source Registrar: Initialize: initializing contract twice is not allowed"
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

        SourceEvents::initialize(&env, eternal_storage);
    }

    fn create(
        env: Env,
        id: u128,
        name: String,
        volume_per_year: u128,
        source_type: String,
        url_contract: String,
        status: u32,
        started_at: u64,
    ) {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let caller = env.current_contract_address();
        let rid = record_id(&env, id);

        store.set_string(&caller, &field_key(&env, &rid, FIELD_NAME), &name);
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_VOLUME_PER_YEAR),
            &volume_per_year,
        );
        store.set_string(
            &caller,
            &field_key(&env, &rid, FIELD_SOURCE_TYPE),
            &source_type,
        );
        store.set_string(
            &caller,
            &field_key(&env, &rid, FIELD_URL_CONTRACT),
            &url_contract,
        );
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_STATUS),
            &u128::from(status),
        );
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_STARTED_AT),
            &u128::from(started_at),
        );

        SourceEvents::create(&env, rid);
    }

    fn get_source(env: Env, id: u128) -> Source {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let rid = record_id(&env, id);

        Source {
            name: store.get_string(&field_key(&env, &rid, FIELD_NAME)),
            volume_per_year: store.get_uint(&field_key(&env, &rid, FIELD_VOLUME_PER_YEAR)),
            source_type: store.get_string(&field_key(&env, &rid, FIELD_SOURCE_TYPE)),
            url_contract: store.get_string(&field_key(&env, &rid, FIELD_URL_CONTRACT)),
            status: store.get_uint(&field_key(&env, &rid, FIELD_STATUS)) as u32,
            started_at: store.get_uint(&field_key(&env, &rid, FIELD_STARTED_AT)) as u64,
            id: rid,
        }
    }

    fn get_eternal_storage(env: Env) -> Address {
        get_config(&env).eternal_storage
    }
}
