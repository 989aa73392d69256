use crc_registry::{
    constants::{
        INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    error::ErrorCode,
};
use soroban_sdk::{
    contracttype, log, panic_with_error, Address, Bytes, BytesN, Env, String,
};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Initialized,
    Proxy(Address),
    Uint(Bytes),
    Str(Bytes),
    Id(Bytes),
    Addr(Bytes),
    Flag(Bytes),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn save_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_admin(env: &Env) -> Address {
    let admin = env.storage().instance().get(&DataKey::Admin).unwrap_or_else(|| {
        log!(env, "Eternal Storage: Admin not set");
        panic_with_error!(env, ErrorCode::AdminNotSet)
    });

    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

    admin
}

// ################################################################
//                         Proxy whitelist
// ################################################################

pub fn set_proxy_flag(env: &Env, proxy: &Address) {
    let key = DataKey::Proxy(proxy.clone());
    env.storage().persistent().set(&key, &true);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn remove_proxy_flag(env: &Env, proxy: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Proxy(proxy.clone()));
}

pub fn is_proxy(env: &Env, proxy: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Proxy(proxy.clone()))
        .unwrap_or(false)
}

// ################################################################
//                          Typed values
// ################################################################

fn bump_if_present(env: &Env, key: &DataKey) {
    if env.storage().persistent().has(key) {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
}

fn set_value<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, key: DataKey, value: &V) {
    env.storage().persistent().set(&key, value);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn set_uint(env: &Env, key: Bytes, value: u128) {
    set_value(env, DataKey::Uint(key), &value);
}

pub fn get_uint(env: &Env, key: Bytes) -> u128 {
    let key = DataKey::Uint(key);
    bump_if_present(env, &key);
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_string(env: &Env, key: Bytes, value: String) {
    set_value(env, DataKey::Str(key), &value);
}

pub fn get_string(env: &Env, key: Bytes) -> String {
    let key = DataKey::Str(key);
    bump_if_present(env, &key);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| String::from_str(env, ""))
}

pub fn set_id(env: &Env, key: Bytes, value: BytesN<32>) {
    set_value(env, DataKey::Id(key), &value);
}

pub fn get_id(env: &Env, key: Bytes) -> BytesN<32> {
    let key = DataKey::Id(key);
    bump_if_present(env, &key);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| crc_registry::keys::zero_id(env))
}

pub fn set_address(env: &Env, key: Bytes, value: Address) {
    set_value(env, DataKey::Addr(key), &value);
}

pub fn get_address(env: &Env, key: Bytes) -> Option<Address> {
    let key = DataKey::Addr(key);
    bump_if_present(env, &key);
    env.storage().persistent().get(&key)
}

pub fn set_flag(env: &Env, key: Bytes, value: bool) {
    set_value(env, DataKey::Flag(key), &value);
}

pub fn get_flag(env: &Env, key: Bytes) -> bool {
    let key = DataKey::Flag(key);
    bump_if_present(env, &key);
    env.storage().persistent().get(&key).unwrap_or(false)
}
