use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env};

use super::setup::deploy_eternal_storage_contract;

#[test]
fn initialize_sets_admin() {
    let env = Env::default();
    let admin = Address::generate(&env);

    let es = deploy_eternal_storage_contract(&env, admin.clone());

    assert_eq!(es.get_admin(), admin);
}

#[test]
#[should_panic(expected = "Eternal Storage: Initialize: initializing contract twice is not allowed")]
fn initialize_twice_should_fail() {
    let env = Env::default();
    let admin = Address::generate(&env);

    let es = deploy_eternal_storage_contract(&env, admin.clone());

    es.initialize(&admin);
}

#[test]
fn set_proxy_whitelists_an_address() {
    let env = Env::default();
    env.mock_all_auths();

    let es = deploy_eternal_storage_contract(&env, None);
    let registrar = Address::generate(&env);

    assert!(!es.is_proxy(&registrar));

    es.set_proxy(&registrar);
    assert!(es.is_proxy(&registrar));

    es.revoke_proxy(&registrar);
    assert!(!es.is_proxy(&registrar));
}

#[test]
fn set_proxy_requires_admin_auth() {
    let env = Env::default();

    // No auths are mocked, so the admin's signature cannot be provided.
    let es = deploy_eternal_storage_contract(&env, None);
    let registrar = Address::generate(&env);

    assert!(es.try_set_proxy(&registrar).is_err());
    assert!(!es.is_proxy(&registrar));
}

#[test]
fn writes_from_non_proxy_are_rejected() {
    let env = Env::default();
    env.mock_all_auths();

    let es = deploy_eternal_storage_contract(&env, None);
    let caller = Address::generate(&env);
    let key = Bytes::from_slice(&env, b"buffer.1.surface");

    assert!(es.try_set_uint(&caller, &key, &3000u128).is_err());

    // Whitelisting turns the same write into a success.
    es.set_proxy(&caller);
    es.set_uint(&caller, &key, &3000u128);
    assert_eq!(es.get_uint(&key), 3000);
}

#[test]
fn revoked_proxy_loses_write_access() {
    let env = Env::default();
    env.mock_all_auths();

    let es = deploy_eternal_storage_contract(&env, None);
    let caller = Address::generate(&env);
    let key = Bytes::from_slice(&env, b"source.9.volume");

    es.set_proxy(&caller);
    es.set_uint(&caller, &key, &200u128);

    es.revoke_proxy(&caller);
    assert!(es.try_set_uint(&caller, &key, &300u128).is_err());

    // The previously written value is untouched.
    assert_eq!(es.get_uint(&key), 200);
}
