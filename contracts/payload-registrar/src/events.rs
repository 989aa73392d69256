use soroban_sdk::{Address, BytesN, Env, Symbol};

pub struct PayloadEvents {}

impl PayloadEvents {
    /// Emitted when the registrar is initialized
    ///
    /// - topics - `["initialize"]`
    /// - data - `eternal_storage: Address`
    pub fn initialize(env: &Env, eternal_storage: Address) {
        let topics = (Symbol::new(env, "initialize"),);
        env.events().publish(topics, eternal_storage);
    }

    /// Emitted when a payload record is created
    ///
    /// - topics - `["create"]`
    /// - data - `id: BytesN<32>`
    pub fn create(env: &Env, id: BytesN<32>) {
        let topics = (Symbol::new(env, "create"),);
        env.events().publish(topics, id);
    }
}
