use soroban_sdk::{xdr::ToXdr, Bytes, BytesN, Env, Symbol};

/// Widen a numeric record identifier to its canonical 32-byte big-endian
/// form. All registrar records are keyed by this fixed-width identifier.
pub fn record_id(env: &Env, id: u128) -> BytesN<32> {
    let mut buf = [0u8; 32];
    buf[16..].copy_from_slice(&id.to_be_bytes());
    BytesN::from_array(env, &buf)
}

/// The all-zero identifier, used for relations that have not been assigned.
pub fn zero_id(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

/// Composite storage key: `xdr(ns) || id || xdr(field)`.
///
/// `ns` is the registrar's namespace symbol so two registrars can never
/// collide on the same record identifier.
pub fn field_key(env: &Env, ns: Symbol, id: &BytesN<32>, field: Symbol) -> Bytes {
    let mut key = Bytes::new(env);
    key.append(&ns.to_xdr(env));
    key.append(&Bytes::from_array(env, &id.to_array()));
    key.append(&field.to_xdr(env));
    key
}
