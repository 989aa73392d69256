#![no_std]

mod contract;
mod events;
mod payload;
mod storage;

#[cfg(test)]
mod tests;
