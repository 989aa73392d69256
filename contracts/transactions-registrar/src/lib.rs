#![no_std]

mod contract;
mod events;
mod storage;
mod transactions;
