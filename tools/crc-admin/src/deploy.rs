//! Ordered deployment of the registry contracts.
//!
//! The eternal storage contract goes first; each registrar is then deployed
//! and initialized with the storage contract's address. Whitelisting the
//! registrars (`set_proxy`) is a separate, explicit step.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use ed25519_dalek::SigningKey;
use sha2::{Digest, Sha256};
use stellar_xdr::curr::ScVal;

use crate::rpc::{RpcClient, RpcError};
use crate::tx::{self, TxError};

/// One contract in the deployment plan.
pub struct PlannedContract {
    pub name: &'static str,
    pub wasm_file: &'static str,
}

/// Deployment order: storage first, then the registrars that depend on it.
pub const DEPLOY_ORDER: [PlannedContract; 5] = [
    PlannedContract {
        name: "eternal-storage",
        wasm_file: "crc_eternal_storage.wasm",
    },
    PlannedContract {
        name: "buffer-registrar",
        wasm_file: "crc_buffer_registrar.wasm",
    },
    PlannedContract {
        name: "payload-registrar",
        wasm_file: "crc_payload_registrar.wasm",
    },
    PlannedContract {
        name: "source-registrar",
        wasm_file: "crc_source_registrar.wasm",
    },
    PlannedContract {
        name: "transactions-registrar",
        wasm_file: "crc_transactions_registrar.wasm",
    },
];

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("failed to read wasm artifact {0}: {1}")]
    WasmRead(PathBuf, std::io::Error),
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error(transparent)]
    Tx(#[from] TxError),
}

/// Abstraction over the chain for deployment, so the plan can be exercised
/// against a recording mock.
pub trait ChainBackend {
    /// Upload contract code, returning its wasm hash.
    fn upload_wasm(
        &mut self,
        wasm: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<[u8; 32], DeployError>> + Send + '_>>;

    /// Instantiate uploaded code, returning the new contract id.
    fn create_contract(
        &mut self,
        wasm_hash: [u8; 32],
        salt: [u8; 32],
    ) -> Pin<Box<dyn Future<Output = Result<[u8; 32], DeployError>> + Send + '_>>;

    /// Invoke a function on a deployed contract.
    fn invoke(
        &mut self,
        contract_id: [u8; 32],
        function: &'static str,
        args: Vec<ScVal>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + '_>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: &'static str,
    pub contract_id: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    pub contracts: Vec<DeployedContract>,
}

impl DeploymentSummary {
    pub fn eternal_storage(&self) -> [u8; 32] {
        self.contracts[0].contract_id
    }
}

fn read_wasm(dir: &Path, file: &str) -> Result<Vec<u8>, DeployError> {
    let path = dir.join(file);
    std::fs::read(&path).map_err(|e| DeployError::WasmRead(path, e))
}

async fn deploy_one<B: ChainBackend>(
    backend: &mut B,
    wasm_dir: &Path,
    planned: &PlannedContract,
    init_arg: ScVal,
) -> Result<DeployedContract, DeployError> {
    let wasm = read_wasm(wasm_dir, planned.wasm_file)?;
    let wasm_hash = backend.upload_wasm(wasm).await?;
    let contract_id = backend
        .create_contract(wasm_hash, tx::contract_salt(planned.name))
        .await?;
    backend
        .invoke(contract_id, "initialize", vec![init_arg])
        .await?;

    tracing::info!(
        contract = planned.name,
        id = %hex::encode(contract_id),
        "deployed"
    );

    Ok(DeployedContract {
        name: planned.name,
        contract_id,
    })
}

/// Deploy the whole registry: eternal storage initialized with `admin`,
/// then each registrar initialized with the storage contract's address.
pub async fn deploy_registry<B: ChainBackend>(
    backend: &mut B,
    wasm_dir: &Path,
    admin: [u8; 32],
) -> Result<DeploymentSummary, DeployError> {
    let storage = deploy_one(
        backend,
        wasm_dir,
        &DEPLOY_ORDER[0],
        tx::scval_account(admin),
    )
    .await?;
    let storage_id = storage.contract_id;

    let mut contracts = vec![storage];
    for planned in &DEPLOY_ORDER[1..] {
        let registrar = deploy_one(
            backend,
            wasm_dir,
            planned,
            tx::scval_contract(storage_id),
        )
        .await?;
        contracts.push(registrar);
    }

    Ok(DeploymentSummary { contracts })
}

/// Whitelist a registrar in the eternal storage contract.
pub async fn set_proxy<B: ChainBackend>(
    backend: &mut B,
    storage_id: [u8; 32],
    registrar_id: [u8; 32],
) -> Result<(), DeployError> {
    backend
        .invoke(storage_id, "set_proxy", vec![tx::scval_contract(registrar_id)])
        .await
}

// =============================================================================
// RPC-backed implementation
// =============================================================================

pub struct RpcBackend {
    rpc: RpcClient,
    key: SigningKey,
    network_passphrase: String,
    deployer: [u8; 32],
}

impl RpcBackend {
    pub fn new(rpc: RpcClient, key: SigningKey, network_passphrase: String) -> Self {
        let deployer = key.verifying_key().to_bytes();
        Self {
            rpc,
            key,
            network_passphrase,
            deployer,
        }
    }

    /// Public key of the signing account, also used as contract admin.
    pub fn deployer(&self) -> [u8; 32] {
        self.deployer
    }
}

impl ChainBackend for RpcBackend {
    fn upload_wasm(
        &mut self,
        wasm: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<[u8; 32], DeployError>> + Send + '_>> {
        Box::pin(async move {
            let wasm_hash: [u8; 32] = Sha256::digest(&wasm).into();
            let op = tx::upload_wasm_op(wasm)?;
            self.rpc
                .submit_operation(&self.key, &self.network_passphrase, op)
                .await?;
            Ok(wasm_hash)
        })
    }

    fn create_contract(
        &mut self,
        wasm_hash: [u8; 32],
        salt: [u8; 32],
    ) -> Pin<Box<dyn Future<Output = Result<[u8; 32], DeployError>> + Send + '_>> {
        Box::pin(async move {
            let op = tx::create_contract_op(self.deployer, salt, wasm_hash);
            self.rpc
                .submit_operation(&self.key, &self.network_passphrase, op)
                .await?;

            let network_id = tx::network_id(&self.network_passphrase);
            Ok(tx::derive_contract_id(&network_id, self.deployer, salt)?)
        })
    }

    fn invoke(
        &mut self,
        contract_id: [u8; 32],
        function: &'static str,
        args: Vec<ScVal>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + '_>> {
        Box::pin(async move {
            let op = tx::invoke_op(contract_id, function, args)?;
            self.rpc
                .submit_operation(&self.key, &self.network_passphrase, op)
                .await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Upload { wasm: Vec<u8> },
        Create { wasm_hash: [u8; 32], salt: [u8; 32] },
        Invoke {
            contract_id: [u8; 32],
            function: &'static str,
            args: Vec<ScVal>,
        },
    }

    /// Records every backend call and hands out sequential contract ids.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        created: u8,
    }

    impl ChainBackend for RecordingBackend {
        fn upload_wasm(
            &mut self,
            wasm: Vec<u8>,
        ) -> Pin<Box<dyn Future<Output = Result<[u8; 32], DeployError>> + Send + '_>> {
            let wasm_hash: [u8; 32] = Sha256::digest(&wasm).into();
            self.calls.push(Call::Upload { wasm });
            Box::pin(async move { Ok(wasm_hash) })
        }

        fn create_contract(
            &mut self,
            wasm_hash: [u8; 32],
            salt: [u8; 32],
        ) -> Pin<Box<dyn Future<Output = Result<[u8; 32], DeployError>> + Send + '_>> {
            self.created += 1;
            let mut contract_id = [0u8; 32];
            contract_id[0] = self.created;
            self.calls.push(Call::Create { wasm_hash, salt });
            Box::pin(async move { Ok(contract_id) })
        }

        fn invoke(
            &mut self,
            contract_id: [u8; 32],
            function: &'static str,
            args: Vec<ScVal>,
        ) -> Pin<Box<dyn Future<Output = Result<(), DeployError>> + Send + '_>> {
            self.calls.push(Call::Invoke {
                contract_id,
                function,
                args,
            });
            Box::pin(async move { Ok(()) })
        }
    }

    fn wasm_dir_with_artifacts() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for planned in &DEPLOY_ORDER {
            // Distinct contents so each upload hashes differently.
            std::fs::write(dir.path().join(planned.wasm_file), planned.name).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn deploys_storage_first_then_registrars_in_order() {
        let dir = wasm_dir_with_artifacts();
        let mut backend = RecordingBackend::default();
        let admin = [0xAAu8; 32];

        let summary = deploy_registry(&mut backend, dir.path(), admin)
            .await
            .unwrap();

        let names: Vec<&str> = summary.contracts.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "eternal-storage",
                "buffer-registrar",
                "payload-registrar",
                "source-registrar",
                "transactions-registrar",
            ]
        );

        // Every contract goes through upload -> create -> initialize.
        assert_eq!(backend.calls.len(), 15);
        let uploads: Vec<&Call> = backend
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Upload { .. }))
            .collect();
        assert_eq!(uploads.len(), 5);
        assert_eq!(
            uploads[0],
            &Call::Upload {
                wasm: b"eternal-storage".to_vec()
            }
        );
    }

    #[tokio::test]
    async fn storage_is_initialized_with_the_admin_account() {
        let dir = wasm_dir_with_artifacts();
        let mut backend = RecordingBackend::default();
        let admin = [0xAAu8; 32];

        let summary = deploy_registry(&mut backend, dir.path(), admin)
            .await
            .unwrap();

        let storage_id = summary.eternal_storage();
        assert_eq!(
            backend.calls[2],
            Call::Invoke {
                contract_id: storage_id,
                function: "initialize",
                args: vec![tx::scval_account(admin)],
            }
        );
    }

    #[tokio::test]
    async fn registrars_are_initialized_with_the_storage_address() {
        let dir = wasm_dir_with_artifacts();
        let mut backend = RecordingBackend::default();

        let summary = deploy_registry(&mut backend, dir.path(), [1u8; 32])
            .await
            .unwrap();
        let storage_id = summary.eternal_storage();

        let init_args: Vec<&Vec<ScVal>> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Invoke { function, args, .. } if *function == "initialize" => Some(args),
                _ => None,
            })
            .collect();

        assert_eq!(init_args.len(), 5);
        // All four registrars point at the storage contract.
        for args in &init_args[1..] {
            assert_eq!(args.as_slice(), &[tx::scval_contract(storage_id)]);
        }
    }

    #[tokio::test]
    async fn contract_salts_are_stable_per_name() {
        let dir = wasm_dir_with_artifacts();
        let mut backend = RecordingBackend::default();

        deploy_registry(&mut backend, dir.path(), [1u8; 32])
            .await
            .unwrap();

        let salts: Vec<[u8; 32]> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Create { salt, .. } => Some(*salt),
                _ => None,
            })
            .collect();

        let expected: Vec<[u8; 32]> = DEPLOY_ORDER
            .iter()
            .map(|p| tx::contract_salt(p.name))
            .collect();
        assert_eq!(salts, expected);
    }

    #[tokio::test]
    async fn set_proxy_invokes_the_storage_contract() {
        let mut backend = RecordingBackend::default();
        let storage_id = [3u8; 32];
        let registrar_id = [4u8; 32];

        set_proxy(&mut backend, storage_id, registrar_id)
            .await
            .unwrap();

        assert_eq!(
            backend.calls,
            vec![Call::Invoke {
                contract_id: storage_id,
                function: "set_proxy",
                args: vec![tx::scval_contract(registrar_id)],
            }]
        );
    }

    #[tokio::test]
    async fn missing_wasm_artifact_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = RecordingBackend::default();

        let result = deploy_registry(&mut backend, dir.path(), [1u8; 32]).await;

        assert!(matches!(result, Err(DeployError::WasmRead(..))));
        assert!(backend.calls.is_empty());
    }
}
