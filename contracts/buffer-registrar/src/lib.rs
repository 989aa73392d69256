#![no_std]

mod buffer;
mod contract;
mod events;
mod storage;

#[cfg(test)]
mod tests;
