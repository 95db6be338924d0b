#![no_std]

pub mod ttl;
pub mod vote_pay;

use soroban_sdk::{contracttype, Symbol};

/// Identifies the core currency: its code and the number of decimals it is denominated in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoreSymbol {
    pub code: Symbol,
    pub decimals: u32,
}

/// An amount of currency tagged with the symbol it is denominated in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Asset {
    /// Amount in the smallest unit of `symbol`
    pub amount: i128,
    pub symbol: CoreSymbol,
}

impl Asset {
    pub fn new(amount: i128, symbol: &CoreSymbol) -> Self {
        Asset {
            amount,
            symbol: symbol.clone(),
        }
    }

    /// Both the code and the precision have to agree.
    pub fn matches(&self, symbol: &CoreSymbol) -> bool {
        self.symbol == *symbol
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}
