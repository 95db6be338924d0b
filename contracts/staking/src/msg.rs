use soroban_sdk::contracttype;

use crate::storage::Config;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigResponse {
    pub config: Config,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShareValueResponse {
    pub owned_shares: i128,
    /// Currency the shares are worth at the pool's current rate, rounded down
    pub value: i128,
}
