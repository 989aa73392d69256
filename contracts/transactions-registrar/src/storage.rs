use crc_registry::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use soroban_sdk::{
    contracttype, symbol_short, Address, Bytes, BytesN, Env, Symbol,
};

/// Namespace of this registrar inside the eternal storage key space.
pub const NAMESPACE: Symbol = symbol_short!("txn");

pub const FIELD_CUSTOMER_ID: Symbol = symbol_short!("custid");
pub const FIELD_CRC_QUANTITY: Symbol = symbol_short!("crcqty");
pub const FIELD_STATUS: Symbol = symbol_short!("status");
pub const FIELD_CREATED_AT: Symbol = symbol_short!("createdat");

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

/// A credit sale to a customer. `status` always starts at 0; the settlement
/// lifecycle runs elsewhere.
#[contracttype]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: BytesN<32>,
    pub customer_id: BytesN<32>,
    pub crc_quantity: u128,
    pub status: u32,
    pub created_at: u64,
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
