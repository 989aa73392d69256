use crc_registry::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use soroban_sdk::{
    contracttype, symbol_short, Address, Bytes, BytesN, Env, String, Symbol,
};

/// Namespace of this registrar inside the eternal storage key space.
pub const NAMESPACE: Symbol = symbol_short!("source");

pub const FIELD_NAME: Symbol = symbol_short!("name");
pub const FIELD_VOLUME_PER_YEAR: Symbol = symbol_short!("volume");
pub const FIELD_SOURCE_TYPE: Symbol = symbol_short!("srctype");
pub const FIELD_URL_CONTRACT: Symbol = symbol_short!("urlcontr");
pub const FIELD_STATUS: Symbol = symbol_short!("status");
pub const FIELD_STARTED_AT: Symbol = symbol_short!("startedat");

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Initialized,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub eternal_storage: Address,
}

/// A wood supplier feeding the registry, e.g. a sawmill or recycler.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub id: BytesN<32>,
    pub name: String,
    pub volume_per_year: u128,
    pub source_type: String,
    pub url_contract: String,
    pub status: u32,
    pub started_at: u64,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().persistent().set(&DataKey::Initialized, &true);
    env.storage().persistent().extend_ttl(
        &DataKey::Initialized,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn save_config(env: &Env, config: Config) {
    env.storage().persistent().set(&DataKey::Config, &config);
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .persistent()
        .get(&DataKey::Config)
        .expect("Config not set");

    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    config
}

pub fn field_key(env: &Env, id: &BytesN<32>, field: Symbol) -> Bytes {
    crc_registry::keys::field_key(env, NAMESPACE, id, field)
}
