use crc_registry::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use soroban_sdk::{
    contracttype, symbol_short, Address, Bytes, BytesN, Env, String, Symbol,
};

/// Namespace of this registrar inside the eternal storage key space.
pub const NAMESPACE: Symbol = symbol_short!("buffer");

pub const FIELD_LONG_LAT: Symbol = symbol_short!("longlat");
pub const FIELD_CRC_ESTIMATE: Symbol = symbol_short!("crcest");
pub const FIELD_MAX_CRC_QUANTITY: Symbol = symbol_short!("maxcrc");
pub const FIELD_SURFACE: Symbol = symbol_short!("surface");
pub const FIELD_STATUS: Symbol = symbol_short!("status");

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

/// A storage site for sequestered wood, identified by its geo-coordinates.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buffer {
    pub id: BytesN<32>,
    pub long_lat: String,
    pub crc_estimate: u128,
    pub max_crc_quantity: u128,
    pub surface: u128,
    pub status: u32,
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
