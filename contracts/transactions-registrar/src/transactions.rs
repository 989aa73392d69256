use soroban_sdk::{Address, Env};

use crate::storage::Transaction;

pub trait TransactionsRegistrarTrait {
    fn initialize(env: Env, eternal_storage: Address);

    fn create(env: Env, id: u128, customer_id: u128, crc_quantity: u128, created_at: u64);

    fn get_transaction(env: Env, id: u128) -> Transaction;

    fn get_eternal_storage(env: Env) -> Address;
}
