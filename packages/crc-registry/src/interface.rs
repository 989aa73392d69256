use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env, String};

/// Typed key-value surface of the eternal storage contract.
///
/// Writes carry the calling contract's own address as `caller` and are
/// rejected unless that address has been whitelisted as a proxy. Reads are
/// open and fall back to the type's zero value when the key was never
/// written.
#[contractclient(name = "EternalStorageClient")]
pub trait EternalStorageInterface {
    fn set_uint(env: Env, caller: Address, key: Bytes, value: u128);

    fn get_uint(env: Env, key: Bytes) -> u128;

    fn set_string(env: Env, caller: Address, key: Bytes, value: String);

    fn get_string(env: Env, key: Bytes) -> String;

    fn set_id(env: Env, caller: Address, key: Bytes, value: BytesN<32>);

    fn get_id(env: Env, key: Bytes) -> BytesN<32>;

    fn set_address(env: Env, caller: Address, key: Bytes, value: Address);

    fn get_address(env: Env, key: Bytes) -> Option<Address>;

    fn set_flag(env: Env, caller: Address, key: Bytes, value: bool);

    fn get_flag(env: Env, key: Bytes) -> bool;
}
