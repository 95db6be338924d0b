//! Share accounting for the vote pools.
//!
//! Every pool tracks ownership as fixed-point shares (`SHARE_PRECISION` atomics per share).
//! A pool's exchange rate is `balance / total_shares`; an empty pool issues one share per
//! smallest currency unit. All products are formed in 256 bits and narrowed with overflow
//! checks, so replaying an operation always yields the same integers.
//!
//! Rounding always favours the pool: issued shares and position values round down, shares
//! taken out for a partial request round up.

use soroban_decimal::Decimal;
use soroban_sdk::{Env, U256};

use crate::{
    error::ContractError,
    storage::{TokenPool, VoterPoolVotes},
};

/// Share atomics per whole share.
pub const SHARE_PRECISION: i128 = 10i128.pow(Decimal::DECIMAL_PLACES);

fn to_u256(env: &Env, value: i128) -> Result<U256, ContractError> {
    u128::try_from(value)
        .map(|value| U256::from_u128(env, value))
        .map_err(|_| ContractError::ContractMathError)
}

fn to_i128(value: U256) -> Result<i128, ContractError> {
    value
        .to_u128()
        .and_then(|value| i128::try_from(value).ok())
        .ok_or(ContractError::ContractMathError)
}

/// `floor(a * b / c)` for non-negative operands.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, c: i128) -> Result<i128, ContractError> {
    if c <= 0 {
        return Err(ContractError::ContractMathError);
    }
    to_i128(to_u256(env, a)?.mul(&to_u256(env, b)?).div(&to_u256(env, c)?))
}

/// `ceil(a * b / c)` for non-negative operands.
pub fn mul_div_ceil(env: &Env, a: i128, b: i128, c: i128) -> Result<i128, ContractError> {
    if c <= 0 {
        return Err(ContractError::ContractMathError);
    }
    let denominator = to_u256(env, c)?;
    let numerator = to_u256(env, a)?.mul(&to_u256(env, b)?);
    to_i128(
        numerator
            .add(&denominator)
            .sub(&U256::from_u32(env, 1))
            .div(&denominator),
    )
}

/// Shares issued for `amount` at the pool's current rate.
pub fn shares_for_deposit(
    env: &Env,
    pool: &TokenPool,
    amount: i128,
) -> Result<i128, ContractError> {
    let issued = if pool.total_shares == 0 {
        amount
            .checked_mul(SHARE_PRECISION)
            .ok_or(ContractError::ContractMathError)?
    } else {
        // outstanding shares without any backing have no rate to price against
        mul_div_floor(env, amount, pool.total_shares, pool.balance)?
    };

    if issued <= 0 {
        return Err(ContractError::ContractMathError);
    }
    Ok(issued)
}

/// Currency value of `shares`, rounded down to the smallest unit.
pub fn share_value(env: &Env, pool: &TokenPool, shares: i128) -> Result<i128, ContractError> {
    if shares == 0 || pool.total_shares == 0 {
        return Ok(0);
    }
    mul_div_floor(env, shares, pool.balance, pool.total_shares)
}

/// Splits a request against a position of `owned` shares into the currency value
/// actually taken and the shares backing it.
///
/// A request covering the whole position takes every share, leaving no dust behind.
pub fn shares_for_request(
    env: &Env,
    pool: &TokenPool,
    owned: i128,
    requested: i128,
) -> Result<(i128, i128), ContractError> {
    let value = share_value(env, pool, owned)?;
    if requested >= value {
        return Ok((value, owned));
    }
    let shares = mul_div_ceil(env, requested, pool.total_shares, pool.balance)?.min(owned);
    Ok((requested, shares))
}

/// Next claim time after `added` shares join a position of `owned` shares whose claim
/// time is `current`. The newcomers count as vesting at `full`; the result is the
/// share-weighted average of both, floored to the second.
pub fn weighted_next_claim(
    env: &Env,
    current: Option<u64>,
    owned: i128,
    added: i128,
    full: u64,
) -> Result<u64, ContractError> {
    let current = match current {
        Some(current) if owned > 0 => current,
        _ => return Ok(full),
    };
    let total = owned
        .checked_add(added)
        .ok_or(ContractError::ContractMathError)?;

    // current + (full - current) * added / total, kept in unsigned terms
    if full >= current {
        let shift = mul_div_floor(env, (full - current) as i128, added, total)?;
        Ok(current + shift as u64)
    } else {
        let shift = mul_div_ceil(env, (current - full) as i128, added, total)?;
        Ok(current - shift as u64)
    }
}

fn owned_at(votes: &VoterPoolVotes, index: u32) -> i128 {
    votes.owned_shares.get(index).unwrap_or(0)
}

/// Vote weight of every pool position follows its current share count.
pub fn sync_votes(votes: &mut VoterPoolVotes) {
    votes.last_votes = votes.owned_shares.clone();
}

fn set_owned(votes: &mut VoterPoolVotes, index: u32, shares: i128) {
    votes.owned_shares.set(index, shares);
    votes.last_votes.set(index, shares);
}

fn receive_shares(
    env: &Env,
    votes: &mut VoterPoolVotes,
    index: u32,
    shares: i128,
    full: u64,
) -> Result<(), ContractError> {
    let owned = owned_at(votes, index);
    let current = votes.next_claim.get(index).flatten();
    let next_claim = weighted_next_claim(env, current, owned, shares, full)?;
    let owned = owned
        .checked_add(shares)
        .ok_or(ContractError::ContractMathError)?;

    set_owned(votes, index, owned);
    votes.next_claim.set(index, Some(next_claim));
    Ok(())
}

/// Escrows `amount` into `pool` on behalf of `votes`. Returns the issued shares.
pub fn deposit(
    env: &Env,
    pool: &mut TokenPool,
    votes: &mut VoterPoolVotes,
    index: u32,
    amount: i128,
    full: u64,
) -> Result<i128, ContractError> {
    let issued = shares_for_deposit(env, pool, amount)?;

    pool.balance = pool
        .balance
        .checked_add(amount)
        .ok_or(ContractError::ContractMathError)?;
    pool.total_shares = pool
        .total_shares
        .checked_add(issued)
        .ok_or(ContractError::ContractMathError)?;
    receive_shares(env, votes, index, issued, full)?;

    Ok(issued)
}

/// Redeems up to `requested` currency from the position in `pool`. Returns the payout.
///
/// A successful claim always restarts the claim window at `next_claim`.
pub fn withdraw(
    env: &Env,
    pool: &mut TokenPool,
    votes: &mut VoterPoolVotes,
    index: u32,
    requested: i128,
    next_claim: u64,
) -> Result<i128, ContractError> {
    let owned = owned_at(votes, index);
    let (payout, burned) = shares_for_request(env, pool, owned, requested)?;
    if payout <= 0 {
        return Err(ContractError::WithdrawingZero);
    }

    pool.balance -= payout;
    pool.total_shares -= burned;
    set_owned(votes, index, owned - burned);
    votes.next_claim.set(index, Some(next_claim));

    Ok(payout)
}

/// Moves shares worth up to `requested` currency between two positions of the same pool.
/// The pool itself is untouched. Returns the moved shares.
///
/// The sender keeps its claim time; the receiver treats the incoming shares as a fresh
/// deposit vesting at `full`.
pub fn transfer(
    env: &Env,
    pool: &TokenPool,
    from: &mut VoterPoolVotes,
    to: &mut VoterPoolVotes,
    index: u32,
    requested: i128,
    full: u64,
) -> Result<i128, ContractError> {
    let owned = owned_at(from, index);
    let (value, moved) = shares_for_request(env, pool, owned, requested)?;
    if value <= 0 || moved <= 0 {
        return Err(ContractError::WithdrawingZero);
    }

    set_owned(from, index, owned - moved);
    receive_shares(env, to, index, moved, full)?;

    Ok(moved)
}
