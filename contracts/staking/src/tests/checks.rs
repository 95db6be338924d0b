use soroban_sdk::{symbol_short, testutils::Address as _, vec, Address, Env, String};
use test_case::test_case;
use votepool::{Asset, CoreSymbol};

use super::setup::{deploy_token_contract, deploy_vote_pool_contract, tst, VotePoolTest, ONE};
use crate::error::ContractError;

fn foreign(amount: i128, code: soroban_sdk::Symbol, decimals: u32) -> Asset {
    Asset {
        amount,
        symbol: CoreSymbol { code, decimals },
    }
}

fn memo(env: &Env, len: usize) -> String {
    let bytes = [b'x'; 300];
    String::from_bytes(env, &bytes[..len])
}

#[test]
fn operations_need_configured_pools() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let other = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vote_pool = deploy_vote_pool_contract(&env, admin, &token.address, None);

    assert_eq!(
        vote_pool.try_stake_to_pool(&user, &0, &tst(ONE)),
        Err(Ok(ContractError::PoolsNotInitialized))
    );
    assert_eq!(
        vote_pool.try_claim_stake(&user, &0, &tst(ONE)),
        Err(Ok(ContractError::PoolsNotInitialized))
    );
    assert_eq!(
        vote_pool.try_transfer_stake(&user, &other, &0, &tst(ONE), &memo(&env, 0)),
        Err(Ok(ContractError::PoolsNotInitialized))
    );
}

#[test_case(2, tst(ONE), ContractError::InvalidPool ; "pool index past the table")]
#[test_case(0, foreign(ONE, symbol_short!("FOO"), 4), ContractError::SymbolMismatch ; "different code")]
#[test_case(0, foreign(ONE, symbol_short!("TST"), 3), ContractError::SymbolMismatch ; "different precision")]
#[test_case(5, foreign(0, symbol_short!("FOO"), 4), ContractError::InvalidPool ; "pool checked before symbol")]
#[test_case(0, foreign(0, symbol_short!("FOO"), 4), ContractError::SymbolMismatch ; "symbol checked before amount")]
#[test_case(0, tst(0), ContractError::AmountNotPositive ; "zero amount")]
#[test_case(1, tst(-ONE), ContractError::AmountNotPositive ; "negative amount")]
fn deposit_input_checks(pool_index: u32, amount: Asset, expected: ContractError) {
    let test = VotePoolTest::new();
    let user = test.funded_user(ONE);

    assert_eq!(
        test.vote_pool.try_stake_to_pool(&user, &pool_index, &amount),
        Err(Ok(expected))
    );
}

#[test_case(2, tst(ONE), ContractError::InvalidPool ; "pool index past the table")]
#[test_case(0, foreign(ONE, symbol_short!("FOO"), 4), ContractError::SymbolMismatch ; "different code")]
#[test_case(0, tst(0), ContractError::AmountNotPositive ; "zero request")]
fn claim_input_checks(pool_index: u32, requested: Asset, expected: ContractError) {
    let test = VotePoolTest::new();
    let user = test.funded_user(ONE);
    test.vote_pool.stake_to_pool(&user, &0, &tst(ONE));

    assert_eq!(
        test.vote_pool.try_claim_stake(&user, &pool_index, &requested),
        Err(Ok(expected))
    );
}

#[test]
fn claim_needs_upgraded_voter() {
    let test = VotePoolTest::new();
    let user = Address::generate(&test.env);

    assert_eq!(
        test.vote_pool.try_claim_stake(&user, &0, &tst(ONE)),
        Err(Ok(ContractError::VoterRecordMissing))
    );

    test.vote_pool.register_voter(&user, &vec![&test.env]);
    assert_eq!(
        test.vote_pool.try_claim_stake(&user, &0, &tst(ONE)),
        Err(Ok(ContractError::VoterNotUpgraded))
    );
}

#[test]
fn transfer_checks_accounts_first() {
    let test = VotePoolTest::new();
    let env = &test.env;
    let alice = test.funded_user(ONE);
    let bob = Address::generate(env);

    assert_eq!(
        test.vote_pool
            .try_transfer_stake(&alice, &bob, &7, &tst(0), &memo(env, 257)),
        Err(Ok(ContractError::MemoTooLong))
    );
    assert_eq!(
        test.vote_pool
            .try_transfer_stake(&alice, &alice, &7, &tst(0), &memo(env, 256)),
        Err(Ok(ContractError::SameAccount))
    );
    assert_eq!(
        test.vote_pool.try_transfer_stake(
            &alice,
            &test.vote_pool.address,
            &7,
            &tst(0),
            &memo(env, 0)
        ),
        Err(Ok(ContractError::InvalidAccount))
    );
    assert_eq!(
        test.vote_pool
            .try_transfer_stake(&alice, &bob, &7, &tst(0), &memo(env, 0)),
        Err(Ok(ContractError::InvalidPool))
    );
    assert_eq!(
        test.vote_pool.try_transfer_stake(
            &alice,
            &bob,
            &0,
            &foreign(ONE, symbol_short!("FOO"), 4),
            &memo(env, 0)
        ),
        Err(Ok(ContractError::SymbolMismatch))
    );
    assert_eq!(
        test.vote_pool
            .try_transfer_stake(&alice, &bob, &0, &tst(0), &memo(env, 0)),
        Err(Ok(ContractError::AmountNotPositive))
    );
}

#[test]
fn transfer_checks_voter_records_in_order() {
    let test = VotePoolTest::new();
    let env = &test.env;
    let alice = test.funded_user(ONE);
    let bob = Address::generate(env);

    let transfer = || {
        test.vote_pool
            .try_transfer_stake(&alice, &bob, &0, &tst(ONE), &memo(env, 256))
    };

    assert_eq!(transfer(), Err(Ok(ContractError::FromVoterRecordMissing)));

    test.vote_pool.register_voter(&alice, &vec![env]);
    assert_eq!(transfer(), Err(Ok(ContractError::ToVoterRecordMissing)));

    test.vote_pool.register_voter(&bob, &vec![env]);
    assert_eq!(transfer(), Err(Ok(ContractError::VoterNotUpgraded)));

    test.vote_pool.stake_to_pool(&alice, &0, &tst(ONE));
    // receiver is still a plain voter
    assert_eq!(transfer(), Err(Ok(ContractError::VoterNotUpgraded)));
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn deposit_requires_owner_auth() {
    let env = Env::default();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vote_pool = deploy_vote_pool_contract(&env, admin, &token.address, None);

    vote_pool.stake_to_pool(&user, &0, &tst(ONE));
}

#[test]
fn memo_of_exactly_256_bytes_is_accepted() {
    let test = VotePoolTest::new();
    let alice = test.funded_user(ONE);
    let bob = test.funded_user(ONE);
    test.vote_pool.stake_to_pool(&alice, &0, &tst(ONE));
    test.vote_pool.stake_to_pool(&bob, &0, &tst(ONE));

    let memo = memo(&test.env, 256);
    test.vote_pool
        .transfer_stake(&alice, &bob, &0, &tst(1), &memo);
    assert_eq!(
        test.vote_pool.query_share_value(&bob, &0).value,
        ONE + 1
    );
}
