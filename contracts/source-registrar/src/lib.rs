#![no_std]

mod contract;
mod events;
mod source;
mod storage;

#[cfg(test)]
mod tests;
