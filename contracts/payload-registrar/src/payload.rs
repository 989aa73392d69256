use soroban_sdk::{Address, Env, String};

use crate::storage::Payload;

pub trait PayloadRegistrarTrait {
    fn initialize(env: Env, eternal_storage: Address);

    #[allow(clippy::too_many_arguments)]
    fn create(
        env: Env,
        id: u128,
        buffer_id: u128,
        truck_id: u128,
        crc_estimate: u128,
        delivered_at: u64,
        url_videos: String,
        url_photos: String,
    );

    fn get_payload(env: Env, id: u128) -> Payload;

    fn get_eternal_storage(env: Env) -> Address;
}
