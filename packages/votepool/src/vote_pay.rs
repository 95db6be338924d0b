use soroban_sdk::{contractclient, Address, Env, Vec};

/// Producer-pay and vote-weight bookkeeping that lives outside the pool contract.
///
/// The pool contract only forwards these calls once its own checks passed; how
/// votes translate into producer pay is up to the implementing contract.
#[contractclient(name = "VotePayClient")]
pub trait VotePayInterface {
    /// Receives the freshly synced per-pool vote weights of `user` for `producer`.
    fn update_votes(env: Env, user: Address, producer: Address, votes: Vec<i128>);

    /// Brings the pay accrual of `user` up to date.
    fn update_pay(env: Env, user: Address);

    /// Pays out whatever `producer` accrued and returns the paid amount.
    fn claim_vote_pay(env: Env, producer: Address) -> i128;
}
