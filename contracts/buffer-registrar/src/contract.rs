use crc_registry::{
    error::ErrorCode, interface::EternalStorageClient, keys::record_id,
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Env, String,
};

use crate::{
    buffer::BufferRegistrarTrait,
    events::BufferEvents,
    storage::{
        get_config, is_initialized, save_config, set_initialized, field_key, Buffer, Config,
        FIELD_CRC_ESTIMATE, FIELD_LONG_LAT, FIELD_MAX_CRC_QUANTITY, FIELD_STATUS, FIELD_SURFACE,
    },
};

contractmeta!(
    key = "Description",
    val = "Registrar for CRC buffer storage sites"
);

#[contract]
pub struct BufferRegistrar;

#[contractimpl]
impl BufferRegistrarTrait for BufferRegistrar {
    fn initialize(env: Env, eternal_storage: Address) {
        if is_initialized(&env) {
            log!(
                &env,
                "Buffer Registrar: Initialize: initializing contract twice is not allowed"
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

        BufferEvents::initialize(&env, eternal_storage);
    }

    /// Record a new buffer. The write goes through the eternal storage
    /// contract and fails until this registrar has been whitelisted there.
    fn create(
        env: Env,
        id: u128,
        long_lat: String,
        crc_estimate: u128,
        max_crc_quantity: u128,
        surface: u128,
        status: u32,
    ) {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let caller = env.current_contract_address();
        let rid = record_id(&env, id);

        store.set_string(&caller, &field_key(&env, &rid, FIELD_LONG_LAT), &long_lat);
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_CRC_ESTIMATE),
            &crc_estimate,
        );
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_MAX_CRC_QUANTITY),
            &max_crc_quantity,
        );
        store.set_uint(&caller, &field_key(&env, &rid, FIELD_SURFACE), &surface);
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_STATUS),
            &u128::from(status),
        );

        BufferEvents::create(&env, rid);
    }

    fn get_buffer(env: Env, id: u128) -> Buffer {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let rid = record_id(&env, id);

        Buffer {
            long_lat: store.get_string(&field_key(&env, &rid, FIELD_LONG_LAT)),
            crc_estimate: store.get_uint(&field_key(&env, &rid, FIELD_CRC_ESTIMATE)),
            max_crc_quantity: store.get_uint(&field_key(&env, &rid, FIELD_MAX_CRC_QUANTITY)),
            surface: store.get_uint(&field_key(&env, &rid, FIELD_SURFACE)),
            status: store.get_uint(&field_key(&env, &rid, FIELD_STATUS)) as u32,
            id: rid,
        }
    }

    fn get_eternal_storage(env: Env) -> Address {
        get_config(&env).eternal_storage
    }
}
