use crc_registry::{error::ErrorCode, interface::EternalStorageInterface};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Bytes, BytesN, Env,
    String,
};

use crate::{events::StorageEvents, storage};

contractmeta!(
    key = "Description",
    val = "Central eternal storage and proxy whitelist for the CRC registry"
);

#[contract]
pub struct EternalStorage;

#[contractimpl]
impl EternalStorage {
    pub fn initialize(env: Env, admin: Address) {
        if storage::is_initialized(&env) {
            log!(
                &env,
                "Eternal Storage: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        storage::set_initialized(&env);
        storage::save_admin(&env, &admin);

        StorageEvents::initialize(&env, admin);
    }

    /// Whitelist a registrar contract so its writes pass the proxy check.
    pub fn set_proxy(env: Env, proxy: Address) {
        let admin = storage::get_admin(&env);
        admin.require_auth();

        storage::set_proxy_flag(&env, &proxy);

        StorageEvents::set_proxy(&env, proxy);
    }

    pub fn revoke_proxy(env: Env, proxy: Address) {
        let admin = storage::get_admin(&env);
        admin.require_auth();

        storage::remove_proxy_flag(&env, &proxy);

        StorageEvents::revoke_proxy(&env, proxy);
    }

    // ################################################################
    //                             Queries
    // ################################################################

    pub fn is_proxy(env: Env, proxy: Address) -> bool {
        storage::is_proxy(&env, &proxy)
    }

    pub fn get_admin(env: Env) -> Address {
        storage::get_admin(&env)
    }
}

fn require_proxy(env: &Env, caller: &Address) {
    caller.require_auth();

    if !storage::is_proxy(env, caller) {
        log!(
            env,
            "Eternal Storage: write rejected: caller is not a whitelisted proxy"
        );
        panic_with_error!(env, ErrorCode::NotAuthorized);
    }
}

#[contractimpl]
impl EternalStorageInterface for EternalStorage {
    fn set_uint(env: Env, caller: Address, key: Bytes, value: u128) {
        require_proxy(&env, &caller);
        storage::set_uint(&env, key, value);
    }

    fn get_uint(env: Env, key: Bytes) -> u128 {
        storage::get_uint(&env, key)
    }

    fn set_string(env: Env, caller: Address, key: Bytes, value: String) {
        require_proxy(&env, &caller);
        storage::set_string(&env, key, value);
    }

    fn get_string(env: Env, key: Bytes) -> String {
        storage::get_string(&env, key)
    }

    fn set_id(env: Env, caller: Address, key: Bytes, value: BytesN<32>) {
        require_proxy(&env, &caller);
        storage::set_id(&env, key, value);
    }

    fn get_id(env: Env, key: Bytes) -> BytesN<32> {
        storage::get_id(&env, key)
    }

    fn set_address(env: Env, caller: Address, key: Bytes, value: Address) {
        require_proxy(&env, &caller);
        storage::set_address(&env, key, value);
    }

    fn get_address(env: Env, key: Bytes) -> Option<Address> {
        storage::get_address(&env, key)
    }

    fn set_flag(env: Env, caller: Address, key: Bytes, value: bool) {
        require_proxy(&env, &caller);
        storage::set_flag(&env, key, value);
    }

    fn get_flag(env: Env, key: Bytes) -> bool {
        storage::get_flag(&env, key)
    }
}
