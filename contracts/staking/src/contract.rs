use soroban_sdk::{contract, contractimpl, contractmeta, log, vec, Address, Env, String, Vec};
use votepool::{vote_pay::VotePayClient, Asset, CoreSymbol};

use crate::{
    error::ContractError,
    msg::{ConfigResponse, ShareValueResponse},
    shares,
    storage::{
        get_config, get_pool_config, get_pool_state, get_voter, init_pool_state, is_initialized,
        load_pool_config, save_config, save_pool_config, save_pool_state, save_voter,
        set_initialized, Config, PoolConfig, TokenPool, VotePoolState, VoterInfo, VoterPoolVotes,
    },
    token_contract,
    utils::{
        check_asset, check_claim_window, check_pool_index, upgraded_votes, validate_pool_config,
        AssetArg, MAX_MEMO_BYTES,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Vote Pool tiered share staking"
);

#[contract]
pub struct VotePool;

pub trait VotePoolTrait {
    fn initialize(
        env: Env,
        admin: Address,
        core_token: Address,
        core_symbol: CoreSymbol,
        vote_pay: Option<Address>,
    ) -> Result<(), ContractError>;

    // Sets up the pool table on first use, afterwards only the rates may change
    // rates are decimal atomics with 18 places
    fn configure(
        env: Env,
        durations: Option<Vec<u32>>,
        claim_periods: Option<Vec<u32>>,
        prod_rate: Option<i128>,
        voter_rate: Option<i128>,
    ) -> Result<(), ContractError>;

    fn register_voter(env: Env, owner: Address, producers: Vec<Address>)
        -> Result<(), ContractError>;

    fn stake_to_pool(
        env: Env,
        owner: Address,
        pool_index: u32,
        amount: Asset,
    ) -> Result<(), ContractError>;

    fn claim_stake(
        env: Env,
        owner: Address,
        pool_index: u32,
        requested: Asset,
    ) -> Result<(), ContractError>;

    fn transfer_stake(
        env: Env,
        from: Address,
        to: Address,
        pool_index: u32,
        requested: Asset,
        memo: String,
    ) -> Result<(), ContractError>;

    fn add_pool_growth(env: Env, pool_index: u32, amount: Asset) -> Result<(), ContractError>;

    fn update_votes(env: Env, user: Address, producer: Address) -> Result<(), ContractError>;

    fn update_pay(env: Env, user: Address) -> Result<(), ContractError>;

    fn claim_vote_pay(env: Env, producer: Address) -> Result<i128, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError>;

    fn query_pool_config(env: Env) -> Result<PoolConfig, ContractError>;

    fn query_pool_state(env: Env) -> Result<VotePoolState, ContractError>;

    fn query_voter(env: Env, owner: Address) -> Result<VoterInfo, ContractError>;

    fn query_pool_votes(env: Env, owner: Address) -> Result<VoterPoolVotes, ContractError>;

    fn query_share_value(
        env: Env,
        owner: Address,
        pool_index: u32,
    ) -> Result<ShareValueResponse, ContractError>;
}

#[contractimpl]
impl VotePoolTrait for VotePool {
    fn initialize(
        env: Env,
        admin: Address,
        core_token: Address,
        core_symbol: CoreSymbol,
        vote_pay: Option<Address>,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            log!(
                &env,
                "Vote Pool: Initialize: initializing contract twice is not allowed"
            );
            return Err(ContractError::AlreadyInitialized);
        }
        set_initialized(&env);

        save_config(
            &env,
            &Config {
                admin: admin.clone(),
                core_token,
                core_symbol,
                vote_pay,
            },
        );

        env.events()
            .publish(("initialize", "Vote Pool staking contract"), admin);

        Ok(())
    }

    fn configure(
        env: Env,
        durations: Option<Vec<u32>>,
        claim_periods: Option<Vec<u32>>,
        prod_rate: Option<i128>,
        voter_rate: Option<i128>,
    ) -> Result<(), ContractError> {
        let config = get_config(&env);
        config.admin.require_auth();

        let existing = get_pool_config(&env);
        let first_use = existing.is_none();
        let pool_config = validate_pool_config(
            &env,
            existing,
            durations,
            claim_periods,
            prod_rate,
            voter_rate,
        )?;

        save_pool_config(&env, &pool_config);
        if first_use {
            init_pool_state(&env, pool_config.num_pools());
            env.events()
                .publish(("configure", "pools"), pool_config.num_pools());
        }
        env.events()
            .publish(("configure", "prod_rate"), pool_config.prod_rate);
        env.events()
            .publish(("configure", "voter_rate"), pool_config.voter_rate);

        Ok(())
    }

    fn register_voter(
        env: Env,
        owner: Address,
        producers: Vec<Address>,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        let voter = match get_voter(&env, &owner) {
            Some(voter) => VoterInfo {
                producers: producers.clone(),
                ..voter
            },
            None => VoterInfo {
                owner: owner.clone(),
                producers: producers.clone(),
                pool_votes: None,
            },
        };
        save_voter(&env, &voter);

        env.events().publish(("register_voter", "owner"), &owner);
        env.events()
            .publish(("register_voter", "producers"), producers.len());

        Ok(())
    }

    fn stake_to_pool(
        env: Env,
        owner: Address,
        pool_index: u32,
        amount: Asset,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        let pool_config = load_pool_config(&env)?;
        check_pool_index(&env, &pool_config, pool_index)?;
        let config = get_config(&env);
        check_asset(&env, &amount, &config.core_symbol, AssetArg::Amount)?;

        // a first deposit upgrades the record, creating it when the account never voted
        let mut voter = get_voter(&env, &owner).unwrap_or_else(|| VoterInfo {
            owner: owner.clone(),
            producers: vec![&env],
            pool_votes: None,
        });
        let mut votes = voter
            .pool_votes
            .take()
            .unwrap_or_else(|| VoterPoolVotes::new(&env, pool_config.num_pools()));

        let mut state = get_pool_state(&env);
        let mut pool = pool_at(&env, &state, pool_index)?;
        let full = full_period_end(&env, &pool_config, pool_index);
        let issued = shares::deposit(
            &env,
            &mut pool,
            &mut votes,
            pool_index,
            amount.amount,
            full,
        )?;

        let token_client = token_contract::Client::new(&env, &config.core_token);
        token_client.transfer(&owner, &env.current_contract_address(), &amount.amount);

        state.pools.set(pool_index, pool);
        save_pool_state(&env, &state);
        voter.pool_votes = Some(votes);
        save_voter(&env, &voter);

        env.events().publish(("stake_to_pool", "owner"), &owner);
        env.events()
            .publish(("stake_to_pool", "pool_index"), pool_index);
        env.events()
            .publish(("stake_to_pool", "amount"), amount.amount);
        env.events().publish(("stake_to_pool", "shares"), issued);

        Ok(())
    }

    fn claim_stake(
        env: Env,
        owner: Address,
        pool_index: u32,
        requested: Asset,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        let pool_config = load_pool_config(&env)?;
        check_pool_index(&env, &pool_config, pool_index)?;
        let config = get_config(&env);
        check_asset(&env, &requested, &config.core_symbol, AssetArg::Requested)?;

        let mut voter = get_voter(&env, &owner).ok_or_else(|| {
            log!(&env, "Vote Pool: Claim Stake: voter record missing");
            ContractError::VoterRecordMissing
        })?;
        let mut votes = upgraded_votes(&env, voter.clone())?;

        let now = env.ledger().timestamp();
        check_claim_window(&env, &votes, pool_index, now)?;

        let mut state = get_pool_state(&env);
        let mut pool = pool_at(&env, &state, pool_index)?;
        let next_claim = full_period_end(&env, &pool_config, pool_index);
        let payout = shares::withdraw(
            &env,
            &mut pool,
            &mut votes,
            pool_index,
            requested.amount,
            next_claim,
        )
        .map_err(|err| {
            if err == ContractError::WithdrawingZero {
                log!(&env, "Vote Pool: Claim Stake: withdrawing 0");
            }
            err
        })?;

        state.pools.set(pool_index, pool);
        save_pool_state(&env, &state);
        voter.pool_votes = Some(votes);
        save_voter(&env, &voter);

        let token_client = token_contract::Client::new(&env, &config.core_token);
        token_client.transfer(&env.current_contract_address(), &owner, &payout);

        env.events().publish(("claim_stake", "owner"), &owner);
        env.events()
            .publish(("claim_stake", "pool_index"), pool_index);
        env.events().publish(("claim_stake", "payout"), payout);

        Ok(())
    }

    fn transfer_stake(
        env: Env,
        from: Address,
        to: Address,
        pool_index: u32,
        requested: Asset,
        memo: String,
    ) -> Result<(), ContractError> {
        from.require_auth();

        if memo.len() > MAX_MEMO_BYTES {
            log!(
                &env,
                "Vote Pool: Transfer Stake: memo has more than 256 bytes"
            );
            return Err(ContractError::MemoTooLong);
        }
        if from == to {
            log!(&env, "Vote Pool: Transfer Stake: from = to");
            return Err(ContractError::SameAccount);
        }
        if to == env.current_contract_address() {
            log!(&env, "Vote Pool: Transfer Stake: invalid account");
            return Err(ContractError::InvalidAccount);
        }

        let pool_config = load_pool_config(&env)?;
        check_pool_index(&env, &pool_config, pool_index)?;
        let config = get_config(&env);
        check_asset(&env, &requested, &config.core_symbol, AssetArg::Requested)?;

        let mut from_voter = get_voter(&env, &from).ok_or_else(|| {
            log!(&env, "Vote Pool: Transfer Stake: from voter record missing");
            ContractError::FromVoterRecordMissing
        })?;
        let mut to_voter = get_voter(&env, &to).ok_or_else(|| {
            log!(&env, "Vote Pool: Transfer Stake: to voter record missing");
            ContractError::ToVoterRecordMissing
        })?;
        let mut from_votes = upgraded_votes(&env, from_voter.clone())?;
        let mut to_votes = upgraded_votes(&env, to_voter.clone())?;

        let state = get_pool_state(&env);
        let pool = pool_at(&env, &state, pool_index)?;
        let full = full_period_end(&env, &pool_config, pool_index);
        let moved = shares::transfer(
            &env,
            &pool,
            &mut from_votes,
            &mut to_votes,
            pool_index,
            requested.amount,
            full,
        )
        .map_err(|err| {
            if err == ContractError::WithdrawingZero {
                log!(&env, "Vote Pool: Transfer Stake: withdrawing 0");
            }
            err
        })?;

        from_voter.pool_votes = Some(from_votes);
        to_voter.pool_votes = Some(to_votes);
        save_voter(&env, &from_voter);
        save_voter(&env, &to_voter);

        env.events().publish(("transfer_stake", "from"), &from);
        env.events().publish(("transfer_stake", "to"), &to);
        env.events()
            .publish(("transfer_stake", "pool_index"), pool_index);
        env.events().publish(("transfer_stake", "shares"), moved);
        env.events().publish(("transfer_stake", "memo"), memo);

        Ok(())
    }

    fn add_pool_growth(env: Env, pool_index: u32, amount: Asset) -> Result<(), ContractError> {
        let config = get_config(&env);
        config.admin.require_auth();

        let pool_config = load_pool_config(&env)?;
        check_pool_index(&env, &pool_config, pool_index)?;
        check_asset(&env, &amount, &config.core_symbol, AssetArg::Amount)?;

        let mut state = get_pool_state(&env);
        let mut pool = pool_at(&env, &state, pool_index)?;
        if pool.total_shares == 0 {
            log!(&env, "Vote Pool: Add Pool Growth: pool has no shares");
            return Err(ContractError::PoolHasNoShares);
        }
        pool.balance = pool
            .balance
            .checked_add(amount.amount)
            .ok_or(ContractError::ContractMathError)?;

        let token_client = token_contract::Client::new(&env, &config.core_token);
        token_client.transfer(
            &config.admin,
            &env.current_contract_address(),
            &amount.amount,
        );

        state.pools.set(pool_index, pool);
        save_pool_state(&env, &state);

        env.events()
            .publish(("add_pool_growth", "pool_index"), pool_index);
        env.events()
            .publish(("add_pool_growth", "amount"), amount.amount);

        Ok(())
    }

    fn update_votes(env: Env, user: Address, producer: Address) -> Result<(), ContractError> {
        let mut voter = get_voter(&env, &user).ok_or_else(|| {
            log!(&env, "Vote Pool: Update Votes: voter record missing");
            ContractError::VoterRecordMissing
        })?;
        let mut votes = upgraded_votes(&env, voter.clone())?;

        shares::sync_votes(&mut votes);

        if let Some(vote_pay) = get_config(&env).vote_pay {
            VotePayClient::new(&env, &vote_pay).update_votes(&user, &producer, &votes.last_votes);
        }

        voter.pool_votes = Some(votes);
        save_voter(&env, &voter);

        env.events().publish(("update_votes", "user"), &user);
        env.events().publish(("update_votes", "producer"), &producer);

        Ok(())
    }

    fn update_pay(env: Env, user: Address) -> Result<(), ContractError> {
        if get_voter(&env, &user).is_none() {
            log!(&env, "Vote Pool: Update Pay: voter record missing");
            return Err(ContractError::VoterRecordMissing);
        }

        if let Some(vote_pay) = get_config(&env).vote_pay {
            VotePayClient::new(&env, &vote_pay).update_pay(&user);
        }

        env.events().publish(("update_pay", "user"), &user);

        Ok(())
    }

    fn claim_vote_pay(env: Env, producer: Address) -> Result<i128, ContractError> {
        producer.require_auth();

        let paid = match get_config(&env).vote_pay {
            Some(vote_pay) => VotePayClient::new(&env, &vote_pay).claim_vote_pay(&producer),
            None => 0,
        };

        env.events()
            .publish(("claim_vote_pay", "producer"), &producer);
        env.events().publish(("claim_vote_pay", "amount"), paid);

        Ok(paid)
    }

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError> {
        Ok(ConfigResponse {
            config: get_config(&env),
        })
    }

    fn query_pool_config(env: Env) -> Result<PoolConfig, ContractError> {
        load_pool_config(&env)
    }

    fn query_pool_state(env: Env) -> Result<VotePoolState, ContractError> {
        load_pool_config(&env)?;
        Ok(get_pool_state(&env))
    }

    fn query_voter(env: Env, owner: Address) -> Result<VoterInfo, ContractError> {
        get_voter(&env, &owner).ok_or_else(|| {
            log!(&env, "Vote Pool: Query Voter: voter record missing");
            ContractError::VoterRecordMissing
        })
    }

    fn query_pool_votes(env: Env, owner: Address) -> Result<VoterPoolVotes, ContractError> {
        let voter = Self::query_voter(env.clone(), owner)?;
        upgraded_votes(&env, voter)
    }

    fn query_share_value(
        env: Env,
        owner: Address,
        pool_index: u32,
    ) -> Result<ShareValueResponse, ContractError> {
        let pool_config = load_pool_config(&env)?;
        check_pool_index(&env, &pool_config, pool_index)?;

        let owned_shares = get_voter(&env, &owner)
            .and_then(|voter| voter.pool_votes)
            .and_then(|votes| votes.owned_shares.get(pool_index))
            .unwrap_or(0);
        let pool = pool_at(&env, &get_pool_state(&env), pool_index)?;

        Ok(ShareValueResponse {
            owned_shares,
            value: shares::share_value(&env, &pool, owned_shares)?,
        })
    }
}

fn pool_at(env: &Env, state: &VotePoolState, pool_index: u32) -> Result<TokenPool, ContractError> {
    state.pools.get(pool_index).ok_or_else(|| {
        log!(env, "Vote Pool: invalid pool");
        ContractError::InvalidPool
    })
}

/// Ledger time at which a position started now in `pool_index` may first be claimed.
fn full_period_end(env: &Env, pool_config: &PoolConfig, pool_index: u32) -> u64 {
    let claim_period = pool_config
        .claim_periods
        .get(pool_index)
        .unwrap_or_default();
    env.ledger().timestamp() + u64::from(claim_period)
}
