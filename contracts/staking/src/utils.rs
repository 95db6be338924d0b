use soroban_decimal::Decimal;
use soroban_sdk::{log, Env, Vec};
use votepool::{Asset, CoreSymbol};

use crate::{
    error::ContractError,
    storage::{PoolConfig, VoterInfo, VoterPoolVotes},
};

pub const MAX_MEMO_BYTES: u32 = 256;

/// Which argument an asset check is reporting on.
#[derive(Clone, Copy)]
pub enum AssetArg {
    Amount,
    Requested,
}

/// Validates a `configure` call against the stored configuration and returns the
/// configuration to persist.
///
/// The pool table is write-once; the two rates may change on any call.
pub fn validate_pool_config(
    env: &Env,
    existing: Option<PoolConfig>,
    durations: Option<Vec<u32>>,
    claim_periods: Option<Vec<u32>>,
    prod_rate: Option<i128>,
    voter_rate: Option<i128>,
) -> Result<PoolConfig, ContractError> {
    let mut config = match existing {
        None => {
            let durations = durations.ok_or_else(|| {
                log!(env, "Vote Pool: Configure: durations is required on first use of cfgvpool");
                ContractError::DurationsRequired
            })?;
            let claim_periods = claim_periods.ok_or_else(|| {
                log!(env, "Vote Pool: Configure: claim_periods is required on first use of cfgvpool");
                ContractError::ClaimPeriodsRequired
            })?;
            validate_pool_table(env, &durations, &claim_periods)?;

            PoolConfig {
                durations,
                claim_periods,
                prod_rate: 0,
                voter_rate: 0,
            }
        }
        Some(existing) => {
            if durations.is_some() {
                log!(env, "Vote Pool: Configure: durations can't change");
                return Err(ContractError::DurationsCantChange);
            }
            if claim_periods.is_some() {
                log!(env, "Vote Pool: Configure: claim_periods can't change");
                return Err(ContractError::ClaimPeriodsCantChange);
            }
            existing
        }
    };

    if let Some(rate) = prod_rate {
        if !is_valid_rate(rate) {
            log!(env, "Vote Pool: Configure: prod_rate out of range");
            return Err(ContractError::ProdRateOutOfRange);
        }
        config.prod_rate = rate;
    }
    if let Some(rate) = voter_rate {
        if !is_valid_rate(rate) {
            log!(env, "Vote Pool: Configure: voter_rate out of range");
            return Err(ContractError::VoterRateOutOfRange);
        }
        config.voter_rate = rate;
    }

    Ok(config)
}

fn validate_pool_table(
    env: &Env,
    durations: &Vec<u32>,
    claim_periods: &Vec<u32>,
) -> Result<(), ContractError> {
    if durations.is_empty() {
        log!(env, "Vote Pool: Configure: durations is empty");
        return Err(ContractError::DurationsEmpty);
    }
    if durations.len() != claim_periods.len() {
        log!(env, "Vote Pool: Configure: mismatched vector sizes");
        return Err(ContractError::MismatchedVectorSizes);
    }

    if durations.iter().any(|duration| duration == 0) {
        log!(env, "Vote Pool: Configure: duration must be positive");
        return Err(ContractError::DurationNotPositive);
    }
    if claim_periods.iter().any(|period| period == 0) {
        log!(env, "Vote Pool: Configure: claim_period must be positive");
        return Err(ContractError::ClaimPeriodNotPositive);
    }
    if durations
        .iter()
        .zip(claim_periods.iter())
        .any(|(duration, period)| period >= duration)
    {
        log!(env, "Vote Pool: Configure: claim_period must be less than duration");
        return Err(ContractError::ClaimPeriodNotLessThanDuration);
    }

    for i in 1..durations.len() {
        if durations.get_unchecked(i) <= durations.get_unchecked(i - 1) {
            log!(env, "Vote Pool: Configure: durations must be increasing");
            return Err(ContractError::DurationsNotIncreasing);
        }
    }
    for i in 1..claim_periods.len() {
        if claim_periods.get_unchecked(i) < claim_periods.get_unchecked(i - 1) {
            log!(env, "Vote Pool: Configure: claim_periods must be non-decreasing");
            return Err(ContractError::ClaimPeriodsDecreasing);
        }
    }

    Ok(())
}

fn is_valid_rate(rate: i128) -> bool {
    Decimal::from_atomics(rate).is_some_and(|rate| rate.is_fraction())
}

pub fn check_pool_index(
    env: &Env,
    pool_config: &PoolConfig,
    pool_index: u32,
) -> Result<(), ContractError> {
    if pool_index >= pool_config.num_pools() {
        log!(env, "Vote Pool: invalid pool");
        return Err(ContractError::InvalidPool);
    }
    Ok(())
}

pub fn check_asset(
    env: &Env,
    asset: &Asset,
    core_symbol: &CoreSymbol,
    arg: AssetArg,
) -> Result<(), ContractError> {
    if !asset.matches(core_symbol) {
        match arg {
            AssetArg::Amount => log!(env, "Vote Pool: amount doesn't match core symbol"),
            AssetArg::Requested => log!(env, "Vote Pool: requested doesn't match core symbol"),
        }
        return Err(ContractError::SymbolMismatch);
    }
    if !asset.is_positive() {
        match arg {
            AssetArg::Amount => log!(env, "Vote Pool: amount must be positive"),
            AssetArg::Requested => log!(env, "Vote Pool: requested must be positive"),
        }
        return Err(ContractError::AmountNotPositive);
    }
    Ok(())
}

/// Pool extension of an existing voter record.
pub fn upgraded_votes(env: &Env, voter: VoterInfo) -> Result<VoterPoolVotes, ContractError> {
    voter.pool_votes.ok_or_else(|| {
        log!(env, "Vote Pool: voter is not upgraded");
        ContractError::VoterNotUpgraded
    })
}

/// Claims from a pool are only allowed once its `next_claim` time is reached.
pub fn check_claim_window(
    env: &Env,
    votes: &VoterPoolVotes,
    pool_index: u32,
    now: u64,
) -> Result<(), ContractError> {
    match votes.next_claim.get(pool_index).flatten() {
        Some(next_claim) if now < next_claim => {
            log!(env, "Vote Pool: claim too soon", next_claim, now);
            Err(ContractError::ClaimTooSoon)
        }
        _ => Ok(()),
    }
}
