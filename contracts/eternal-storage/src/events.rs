use soroban_sdk::{Address, Env, Symbol};

pub struct StorageEvents {}

impl StorageEvents {
    /// Emitted when the storage contract is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - ()
    pub fn initialize(env: &Env, admin: Address) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, ());
    }

    /// Emitted when a registrar is whitelisted
    ///
    /// - topics - `["set_proxy"]`
    /// - data - `proxy: Address`
    pub fn set_proxy(env: &Env, proxy: Address) {
        let topics = (Symbol::new(env, "set_proxy"),);
        env.events().publish(topics, proxy);
    }

    /// Emitted when a registrar's whitelist entry is removed
    ///
    /// - topics - `["revoke_proxy"]`
    /// - data - `proxy: Address`
    pub fn revoke_proxy(env: &Env, proxy: Address) {
        let topics = (Symbol::new(env, "revoke_proxy"),);
        env.events().publish(topics, proxy);
    }
}
