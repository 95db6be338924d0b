use soroban_sdk::{contracttype, log, panic_with_error, vec, Address, Env, Vec};
use votepool::{
    ttl::{
        INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    },
    CoreSymbol,
};

use crate::error::ContractError;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Initialized,
    Config,
    PoolConfig,
    PoolState,
    Voter(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// System account, the only one allowed to configure pools and add growth
    pub admin: Address,
    /// Token contract holding the escrowed currency
    pub core_token: Address,
    pub core_symbol: CoreSymbol,
    /// Optional producer-pay collaborator receiving vote and pay updates
    pub vote_pay: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Lock-up length of each pool in seconds; the index is the pool index
    pub durations: Vec<u32>,
    /// Minimum seconds between two claims from the same pool
    pub claim_periods: Vec<u32>,
    /// Decimal atomics (18 places) in `[0, 1)`
    pub prod_rate: i128,
    /// Decimal atomics (18 places) in `[0, 1)`
    pub voter_rate: i128,
}

impl PoolConfig {
    pub fn num_pools(&self) -> u32 {
        self.durations.len()
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenPool {
    /// Currency escrowed for this pool
    pub balance: i128,
    /// Share atomics outstanding; equals the sum of every voter's `owned_shares` entry
    pub total_shares: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotePoolState {
    pub pools: Vec<TokenPool>,
}

/// Per-pool extension of a voter record. Every vector has one entry per configured pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterPoolVotes {
    /// Earliest ledger timestamp a claim is allowed; `None` until shares are first held
    pub next_claim: Vec<Option<u64>>,
    pub owned_shares: Vec<i128>,
    pub proxied_shares: Vec<i128>,
    pub last_votes: Vec<i128>,
}

impl VoterPoolVotes {
    pub fn new(env: &Env, num_pools: u32) -> Self {
        let mut votes = VoterPoolVotes {
            next_claim: vec![env],
            owned_shares: vec![env],
            proxied_shares: vec![env],
            last_votes: vec![env],
        };
        for _ in 0..num_pools {
            votes.next_claim.push_back(None);
            votes.owned_shares.push_back(0);
            votes.proxied_shares.push_back(0);
            votes.last_votes.push_back(0);
        }
        votes
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterInfo {
    pub owner: Address,
    /// Producers the account votes for
    pub producers: Vec<Address>,
    /// Present once the account deposited into any pool
    pub pool_votes: Option<VoterPoolVotes>,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| {
            log!(env, "Vote Pool: Config not set");
            panic_with_error!(env, ContractError::ConfigNotSet);
        });
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

    config
}

pub fn save_pool_config(env: &Env, pool_config: &PoolConfig) {
    env.storage()
        .instance()
        .set(&DataKey::PoolConfig, pool_config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

pub fn get_pool_config(env: &Env) -> Option<PoolConfig> {
    env.storage().instance().get(&DataKey::PoolConfig)
}

/// Loads the pool configuration, failing the same way for every operation
/// that needs initialized pools.
pub fn load_pool_config(env: &Env) -> Result<PoolConfig, ContractError> {
    get_pool_config(env).ok_or_else(|| {
        log!(env, "Vote Pool: vote pools not initialized");
        ContractError::PoolsNotInitialized
    })
}

pub fn save_pool_state(env: &Env, state: &VotePoolState) {
    env.storage().persistent().set(&DataKey::PoolState, state);
    env.storage().persistent().extend_ttl(
        &DataKey::PoolState,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

pub fn get_pool_state(env: &Env) -> VotePoolState {
    let state = env
        .storage()
        .persistent()
        .get(&DataKey::PoolState)
        .unwrap_or_else(|| {
            log!(env, "Vote Pool: Pool ledger missing for initialized pools");
            panic_with_error!(env, ContractError::PoolsNotInitialized);
        });
    env.storage().persistent().extend_ttl(
        &DataKey::PoolState,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );

    state
}

/// Allocates the ledger with `num_pools` empty pools.
pub fn init_pool_state(env: &Env, num_pools: u32) {
    let mut pools = vec![env];
    for _ in 0..num_pools {
        pools.push_back(TokenPool::default());
    }
    save_pool_state(env, &VotePoolState { pools });
}

pub fn get_voter(env: &Env, owner: &Address) -> Option<VoterInfo> {
    let key = DataKey::Voter(owner.clone());
    let voter = env.storage().persistent().get::<_, VoterInfo>(&key);
    if voter.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }

    voter
}

pub fn save_voter(env: &Env, voter: &VoterInfo) {
    let key = DataKey::Voter(voter.owner.clone());
    env.storage().persistent().set(&key, voter);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}
