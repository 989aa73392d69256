use crc_registry::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use soroban_sdk::{
    contracttype, symbol_short, Address, Bytes, BytesN, Env, String, Symbol,
};

/// Namespace of this registrar inside the eternal storage key space.
pub const NAMESPACE: Symbol = symbol_short!("payload");

pub const FIELD_BUFFER_ID: Symbol = symbol_short!("bufferid");
pub const FIELD_TRUCK_ID: Symbol = symbol_short!("truckid");
pub const FIELD_SHIP_ID: Symbol = symbol_short!("shipid");
pub const FIELD_SOURCE_ID: Symbol = symbol_short!("sourceid");
pub const FIELD_CRC_ESTIMATE: Symbol = symbol_short!("crcest");
pub const FIELD_DELIVERED_AT: Symbol = symbol_short!("delivat");
pub const FIELD_URL_VIDEOS: Symbol = symbol_short!("urlvideos");
pub const FIELD_URL_PHOTOS: Symbol = symbol_short!("urlphotos");

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

/// A truck delivery of wood into a buffer.
///
/// `ship_id` and `source_id` stay at the zero identifier until the
/// corresponding assignment flows run; `create` never sets them.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub id: BytesN<32>,
    pub buffer_id: BytesN<32>,
    pub truck_id: BytesN<32>,
    pub ship_id: BytesN<32>,
    pub source_id: BytesN<32>,
    pub crc_estimate: u128,
    pub delivered_at: u64,
    pub url_videos: String,
    pub url_photos: String,
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
