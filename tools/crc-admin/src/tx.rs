//! Transaction envelope construction and signing for Soroban RPC.
//!
//! The signed message is `SHA-256(xdr(TransactionSignaturePayload))` where
//! the payload tags the transaction with the network id, and contract ids
//! derive from `SHA-256(xdr(HashIdPreimage::ContractId))`.

use ed25519_dalek::{Signer, SigningKey};
use sha2::{Digest, Sha256};
use stellar_xdr::curr::{
    AccountId, ContractExecutable, ContractId, ContractIdPreimage, ContractIdPreimageFromAddress,
    CreateContractArgs, DecoratedSignature, Hash, HashIdPreimage, HashIdPreimageContractId,
    HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Limits, Memo, MuxedAccount, Operation,
    OperationBody, Preconditions, PublicKey, ScAddress, ScSymbol, ScVal, SequenceNumber,
    Signature, SignatureHint, SorobanAuthorizationEntry, SorobanTransactionData, Transaction,
    TransactionEnvelope, TransactionExt, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, TransactionV1Envelope, Uint256, VecM, WriteXdr,
};

#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error("XDR encoding failed: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),
    #[error("value does not fit XDR bounds: {0}")]
    Bounds(String),
}

/// Network id: SHA-256 of the network passphrase.
pub fn network_id(passphrase: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(passphrase.as_bytes());
    hasher.finalize().into()
}

pub fn account_address(pubkey: [u8; 32]) -> ScAddress {
    ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(pubkey))))
}

pub fn contract_address(contract_id: [u8; 32]) -> ScAddress {
    ScAddress::Contract(ContractId(Hash(contract_id)))
}

pub fn scval_account(pubkey: [u8; 32]) -> ScVal {
    ScVal::Address(account_address(pubkey))
}

pub fn scval_contract(contract_id: [u8; 32]) -> ScVal {
    ScVal::Address(contract_address(contract_id))
}

/// Deterministic salt for a named contract deployment.
pub fn contract_salt(name: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"crc-registry/");
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

fn host_function_op(host_function: HostFunction) -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function,
            auth: VecM::default(),
        }),
    }
}

pub fn upload_wasm_op(wasm: Vec<u8>) -> Result<Operation, TxError> {
    let wasm = wasm
        .try_into()
        .map_err(|_| TxError::Bounds("contract wasm too large".to_string()))?;

    Ok(host_function_op(HostFunction::UploadContractWasm(wasm)))
}

pub fn create_contract_op(deployer: [u8; 32], salt: [u8; 32], wasm_hash: [u8; 32]) -> Operation {
    host_function_op(HostFunction::CreateContract(CreateContractArgs {
        contract_id_preimage: ContractIdPreimage::Address(ContractIdPreimageFromAddress {
            address: account_address(deployer),
            salt: Uint256(salt),
        }),
        executable: ContractExecutable::Wasm(Hash(wasm_hash)),
    }))
}

pub fn invoke_op(
    contract_id: [u8; 32],
    function: &str,
    args: Vec<ScVal>,
) -> Result<Operation, TxError> {
    let function_name = function
        .try_into()
        .map_err(|_| TxError::Bounds(format!("function name too long: {function}")))?;

    Ok(host_function_op(HostFunction::InvokeContract(
        InvokeContractArgs {
            contract_address: contract_address(contract_id),
            function_name: ScSymbol(function_name),
            args: args
                .try_into()
                .map_err(|_| TxError::Bounds("too many invocation arguments".to_string()))?,
        },
    )))
}

pub fn build_transaction(
    source: [u8; 32],
    seq_num: i64,
    fee: u32,
    op: Operation,
) -> Result<Transaction, TxError> {
    Ok(Transaction {
        source_account: MuxedAccount::Ed25519(Uint256(source)),
        fee,
        seq_num: SequenceNumber(seq_num),
        cond: Preconditions::None,
        memo: Memo::None,
        operations: vec![op]
            .try_into()
            .map_err(|_| TxError::Bounds("operations".to_string()))?,
        ext: TransactionExt::V0,
    })
}

/// Fold a simulation result back into the transaction: resource footprint,
/// the resource fee on top of the inclusion fee, and the authorization
/// entries required by the host function.
pub fn apply_simulation(
    tx: Transaction,
    data: SorobanTransactionData,
    min_resource_fee: u32,
    auth: Vec<SorobanAuthorizationEntry>,
) -> Result<Transaction, TxError> {
    let Transaction {
        source_account,
        fee,
        seq_num,
        cond,
        memo,
        operations,
        ..
    } = tx;

    let mut operations: Vec<Operation> = operations.into();
    if let Some(Operation {
        body: OperationBody::InvokeHostFunction(op),
        ..
    }) = operations.first_mut()
    {
        if op.auth.is_empty() {
            op.auth = auth
                .try_into()
                .map_err(|_| TxError::Bounds("authorization entries".to_string()))?;
        }
    }

    Ok(Transaction {
        source_account,
        fee: fee + min_resource_fee,
        seq_num,
        cond,
        memo,
        operations: operations
            .try_into()
            .map_err(|_| TxError::Bounds("operations".to_string()))?,
        ext: TransactionExt::V1(data),
    })
}

/// Hash that gets signed.
pub fn transaction_hash(tx: &Transaction, network_id: &[u8; 32]) -> Result<[u8; 32], TxError> {
    let payload = TransactionSignaturePayload {
        network_id: Hash(*network_id),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    let bytes = payload.to_xdr(Limits::none())?;

    Ok(Sha256::digest(&bytes).into())
}

pub fn sign_transaction(
    tx: Transaction,
    network_id: &[u8; 32],
    key: &SigningKey,
) -> Result<TransactionEnvelope, TxError> {
    let hash = transaction_hash(&tx, network_id)?;
    let signature = key.sign(&hash);

    let pubkey = key.verifying_key().to_bytes();
    let decorated = DecoratedSignature {
        hint: SignatureHint([pubkey[28], pubkey[29], pubkey[30], pubkey[31]]),
        signature: Signature(
            signature
                .to_bytes()
                .to_vec()
                .try_into()
                .map_err(|_| TxError::Bounds("signature".to_string()))?,
        ),
    };

    Ok(TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: vec![decorated]
            .try_into()
            .map_err(|_| TxError::Bounds("signatures".to_string()))?,
    }))
}

/// Unsigned envelope, as submitted to `simulateTransaction`.
pub fn unsigned_envelope(tx: &Transaction) -> TransactionEnvelope {
    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: tx.clone(),
        signatures: VecM::default(),
    })
}

pub fn encode_envelope(envelope: &TransactionEnvelope) -> Result<String, TxError> {
    Ok(base64::encode(envelope.to_xdr(Limits::none())?))
}

/// Deterministic contract id for a (deployer, salt) pair on a network.
pub fn derive_contract_id(
    network_id: &[u8; 32],
    deployer: [u8; 32],
    salt: [u8; 32],
) -> Result<[u8; 32], TxError> {
    let preimage = HashIdPreimage::ContractId(HashIdPreimageContractId {
        network_id: Hash(*network_id),
        contract_id_preimage: ContractIdPreimage::Address(ContractIdPreimageFromAddress {
            address: account_address(deployer),
            salt: Uint256(salt),
        }),
    });
    let bytes = preimage.to_xdr(Limits::none())?;

    Ok(Sha256::digest(&bytes).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::Verifier;
    use stellar_xdr::curr::ReadXdr;

    const TESTNET: &str = "Test SDF Network ; September 2015";

    fn test_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn network_id_matches_the_known_testnet_value() {
        assert_eq!(
            hex::encode(network_id(TESTNET)),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn signature_verifies_against_the_transaction_hash() {
        let key = test_key();
        let op = invoke_op([1u8; 32], "initialize", vec![scval_account([2u8; 32])]).unwrap();
        let tx = build_transaction(key.verifying_key().to_bytes(), 1, 100, op).unwrap();
        let nid = network_id(TESTNET);

        let envelope = sign_transaction(tx.clone(), &nid, &key).unwrap();

        let TransactionEnvelope::Tx(v1) = envelope else {
            panic!("expected a v1 envelope");
        };
        let signatures: Vec<DecoratedSignature> = v1.signatures.into();
        assert_eq!(signatures.len(), 1);

        let sig_bytes: [u8; 64] = AsRef::<[u8]>::as_ref(&signatures[0].signature)
            .try_into()
            .expect("signature is 64 bytes");
        let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);

        let hash = transaction_hash(&tx, &nid).unwrap();
        key.verifying_key().verify(&hash, &signature).unwrap();
    }

    #[test]
    fn signature_hint_is_the_pubkey_tail() {
        let key = test_key();
        let op = create_contract_op([3u8; 32], [4u8; 32], [5u8; 32]);
        let tx = build_transaction(key.verifying_key().to_bytes(), 7, 100, op).unwrap();

        let envelope = sign_transaction(tx, &network_id(TESTNET), &key).unwrap();

        let TransactionEnvelope::Tx(v1) = envelope else {
            panic!("expected a v1 envelope");
        };
        let signatures: Vec<DecoratedSignature> = v1.signatures.into();
        let pubkey = key.verifying_key().to_bytes();
        assert_eq!(&signatures[0].hint.0[..], &pubkey[28..32]);
    }

    #[test]
    fn envelope_base64_round_trips() {
        let key = test_key();
        let op = upload_wasm_op(b"\0asm".to_vec()).unwrap();
        let tx = build_transaction(key.verifying_key().to_bytes(), 1, 100, op).unwrap();
        let envelope = sign_transaction(tx, &network_id(TESTNET), &key).unwrap();

        let encoded = encode_envelope(&envelope).unwrap();
        let decoded =
            TransactionEnvelope::from_xdr(base64::decode(&encoded).unwrap(), Limits::none())
                .unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn contract_id_derivation_is_deterministic() {
        let nid = network_id(TESTNET);
        let deployer = [1u8; 32];

        let a = derive_contract_id(&nid, deployer, contract_salt("eternal-storage")).unwrap();
        let b = derive_contract_id(&nid, deployer, contract_salt("eternal-storage")).unwrap();
        let other_salt = derive_contract_id(&nid, deployer, contract_salt("buffer-registrar")).unwrap();
        let other_network =
            derive_contract_id(&network_id("Standalone Network ; February 2017"), deployer, contract_salt("eternal-storage")).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, other_salt);
        assert_ne!(a, other_network);
    }

    #[test]
    fn simulation_results_are_folded_into_the_transaction() {
        let key = test_key();
        let op = invoke_op([1u8; 32], "set_proxy", vec![scval_contract([2u8; 32])]).unwrap();
        let tx = build_transaction(key.verifying_key().to_bytes(), 1, 100, op).unwrap();

        use stellar_xdr::curr::{LedgerFootprint, SorobanResources, SorobanTransactionDataExt};
        let data = SorobanTransactionData {
            ext: SorobanTransactionDataExt::V0,
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only: VecM::default(),
                    read_write: VecM::default(),
                },
                instructions: 1_000,
                disk_read_bytes: 0,
                write_bytes: 0,
            },
            resource_fee: 500,
        };

        let tx = apply_simulation(tx, data, 500, vec![]).unwrap();

        assert_eq!(tx.fee, 600);
        assert!(matches!(tx.ext, TransactionExt::V1(_)));
    }
}
