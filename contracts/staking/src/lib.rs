#![no_std]
mod contract;
mod error;
mod msg;
mod shares;
mod storage;
mod utils;

pub mod token_contract {
    pub use soroban_sdk::token::TokenClient as Client;
}
