use pretty_assertions::assert_eq;
use soroban_sdk::{Env, String};

use crc_registry::keys::{record_id, zero_id};

use super::setup::{deploy_buffer_registrar_contract, deploy_eternal_storage_contract};

#[test]
fn create_is_rejected_until_whitelisted_then_reads_back() {
    let env = Env::default();
    env.mock_all_auths();

    let es = deploy_eternal_storage_contract(&env, None);
    let buffer = deploy_buffer_registrar_contract(&env, &es.address);

    assert_eq!(buffer.get_eternal_storage(), es.address);

    let long_lat = String::from_str(&env, "2.349014;48.864716");

    // Bad actor: the registrar has not been whitelisted yet.
    assert!(buffer
        .try_create(&1u128, &long_lat, &999u128, &2000u128, &3000u128, &1u32)
        .is_err());

    es.set_proxy(&buffer.address);

    buffer.create(&1, &long_lat, &999, &2000, &3000, &1);

    let record = buffer.get_buffer(&1);
    assert_eq!(record.id, record_id(&env, 1));
    assert_eq!(record.long_lat, long_lat);
    assert_eq!(record.crc_estimate, 999);
    assert_eq!(record.max_crc_quantity, 2000);
    assert_eq!(record.surface, 3000);
    assert_eq!(record.status, 1);
}

#[test]
#[should_panic(expected = "Buffer Registrar: Initialize: initializing contract twice is not allowed")]
fn initialize_twice_should_fail() {
    let env = Env::default();

    let es = deploy_eternal_storage_contract(&env, None);
    let buffer = deploy_buffer_registrar_contract(&env, &es.address);

    buffer.initialize(&es.address);
}

#[test]
fn records_are_independent_per_id() {
    let env = Env::default();
    env.mock_all_auths();

    let es = deploy_eternal_storage_contract(&env, None);
    let buffer = deploy_buffer_registrar_contract(&env, &es.address);
    es.set_proxy(&buffer.address);

    buffer.create(
        &1,
        &String::from_str(&env, "2.349014;48.864716"),
        &999,
        &2000,
        &3000,
        &1,
    );
    buffer.create(
        &2,
        &String::from_str(&env, "-0.563166;44.838611"),
        &50,
        &400,
        &120,
        &0,
    );

    let first = buffer.get_buffer(&1);
    let second = buffer.get_buffer(&2);

    assert_eq!(first.crc_estimate, 999);
    assert_eq!(second.crc_estimate, 50);
    assert_eq!(second.long_lat, String::from_str(&env, "-0.563166;44.838611"));
}

#[test]
fn reading_an_unknown_buffer_zero_defaults() {
    let env = Env::default();

    let es = deploy_eternal_storage_contract(&env, None);
    let buffer = deploy_buffer_registrar_contract(&env, &es.address);

    let record = buffer.get_buffer(&42);
    assert_eq!(record.id, record_id(&env, 42));
    assert_eq!(record.long_lat, String::from_str(&env, ""));
    assert_eq!(record.crc_estimate, 0);
    assert_eq!(record.status, 0);

    // The id widening itself never fabricates a record.
    assert_ne!(record.id, zero_id(&env));
}
