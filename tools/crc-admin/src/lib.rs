//! CRC registry admin tooling.
//!
//! Deploys the eternal storage contract and the four registrars in order,
//! manages the storage contract's proxy whitelist, and publishes compiled
//! contract interface artifacts to the remote drive store.

pub mod abi;
pub mod account;
pub mod deploy;
pub mod rpc;
pub mod tx;
