use crc_registry::{
    error::ErrorCode, interface::EternalStorageClient, keys::record_id,
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Env, String,
};

use crate::{
    events::PayloadEvents,
    payload::PayloadRegistrarTrait,
    storage::{
        get_config, is_initialized, save_config, set_initialized, field_key, Config, Payload,
        FIELD_BUFFER_ID, FIELD_CRC_ESTIMATE, FIELD_DELIVERED_AT, FIELD_SHIP_ID, FIELD_SOURCE_ID,
        FIELD_TRUCK_ID, FIELD_URL_PHOTOS, FIELD_URL_VIDEOS,
    },
};

contractmeta!(
    key = "Description",
    val = "Registrar for CRC truck payload deliveries"
);

#[contract]
pub struct PayloadRegistrar;

#[contractimpl]
impl PayloadRegistrarTrait for PayloadRegistrar {
    fn initialize(env: Env, eternal_storage: Address) {
        if is_initialized(&env) {
            log!(
                &env,
                "Payload Registrar: Initialize: initializing contract twice is not allowed"
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

        PayloadEvents::initialize(&env, eternal_storage);
    }

    /// Record a delivered truck payload. `ship_id` and `source_id` are left
    /// unset; they read back as the zero identifier.
    fn create(
        env: Env,
        id: u128,
        buffer_id: u128,
        truck_id: u128,
        crc_estimate: u128,
        delivered_at: u64,
        url_videos: String,
        url_photos: String,
    ) {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let caller = env.current_contract_address();
        let rid = record_id(&env, id);

        store.set_id(
            &caller,
            &field_key(&env, &rid, FIELD_BUFFER_ID),
            &record_id(&env, buffer_id),
        );
        store.set_id(
            &caller,
            &field_key(&env, &rid, FIELD_TRUCK_ID),
            &record_id(&env, truck_id),
        );
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_CRC_ESTIMATE),
            &crc_estimate,
        );
        store.set_uint(
            &caller,
            &field_key(&env, &rid, FIELD_DELIVERED_AT),
            &u128::from(delivered_at),
        );
        store.set_string(
            &caller,
            &field_key(&env, &rid, FIELD_URL_VIDEOS),
            &url_videos,
        );
        store.set_string(
            &caller,
            &field_key(&env, &rid, FIELD_URL_PHOTOS),
            &url_photos,
        );

        PayloadEvents::create(&env, rid);
    }

    fn get_payload(env: Env, id: u128) -> Payload {
        let config = get_config(&env);
        let store = EternalStorageClient::new(&env, &config.eternal_storage);
        let rid = record_id(&env, id);

        Payload {
            buffer_id: store.get_id(&field_key(&env, &rid, FIELD_BUFFER_ID)),
            truck_id: store.get_id(&field_key(&env, &rid, FIELD_TRUCK_ID)),
            ship_id: store.get_id(&field_key(&env, &rid, FIELD_SHIP_ID)),
            source_id: store.get_id(&field_key(&env, &rid, FIELD_SOURCE_ID)),
            crc_estimate: store.get_uint(&field_key(&env, &rid, FIELD_CRC_ESTIMATE)),
            delivered_at: store.get_uint(&field_key(&env, &rid, FIELD_DELIVERED_AT)) as u64,
            url_videos: store.get_string(&field_key(&env, &rid, FIELD_URL_VIDEOS)),
            url_photos: store.get_string(&field_key(&env, &rid, FIELD_URL_PHOTOS)),
            id: rid,
        }
    }

    fn get_eternal_storage(env: Env) -> Address {
        get_config(&env).eternal_storage
    }
}
