use soroban_sdk::{Address, Env, String};

use crate::storage::Buffer;

pub trait BufferRegistrarTrait {
    fn initialize(env: Env, eternal_storage: Address);

    fn create(
        env: Env,
        id: u128,
        long_lat: String,
        crc_estimate: u128,
        max_crc_quantity: u128,
        surface: u128,
        status: u32,
    );

    fn get_buffer(env: Env, id: u128) -> Buffer;

    fn get_eternal_storage(env: Env) -> Address;
}
