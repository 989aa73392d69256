use soroban_sdk::{Address, Env, String};

use crate::storage::Source;

pub trait SourceRegistrarTrait {
    fn initialize(env: Env, eternal_storage: Address);

    #[allow(clippy::too_many_arguments)]
    fn create(
        env: Env,
        id: u128,
        name: String,
        volume_per_year: u128,
        source_type: String,
        url_contract: String,
        status: u32,
        started_at: u64,
    );

    fn get_source(env: Env, id: u128) -> Source;

    fn get_eternal_storage(env: Env) -> Address;
}
