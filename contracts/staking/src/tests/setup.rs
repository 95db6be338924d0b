use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Ledger},
    token::StellarAssetClient,
    vec, Address, Env,
};
use votepool::{Asset, CoreSymbol};

use crate::{
    contract::{VotePool, VotePoolClient},
    shares::SHARE_PRECISION,
    token_contract,
};

pub const DURATIONS: [u32; 2] = [1024, 2048];
pub const CLAIM_PERIODS: [u32; 2] = [64, 256];

/// 1.0000 TST
pub const ONE: i128 = 1_0000;
pub const ONE_DAY: u64 = 86_400;

pub fn core_symbol() -> CoreSymbol {
    CoreSymbol {
        code: symbol_short!("TST"),
        decimals: 4,
    }
}

pub fn tst(amount: i128) -> Asset {
    Asset::new(amount, &core_symbol())
}

pub fn shares(amount: i128) -> i128 {
    amount * SHARE_PRECISION
}

pub fn deploy_token_contract<'a>(env: &Env, admin: &Address) -> token_contract::Client<'a> {
    token_contract::Client::new(
        env,
        &env.register_stellar_asset_contract_v2(admin.clone())
            .address(),
    )
}

pub fn mint(env: &Env, token: &token_contract::Client, to: &Address, amount: i128) {
    StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

pub fn deploy_vote_pool_contract<'a>(
    env: &Env,
    admin: impl Into<Option<Address>>,
    core_token: &Address,
    vote_pay: Option<Address>,
) -> VotePoolClient<'a> {
    let admin = admin.into().unwrap_or(Address::generate(env));
    let vote_pool = VotePoolClient::new(env, &env.register(VotePool, ()));

    vote_pool.initialize(&admin, core_token, &core_symbol(), &vote_pay);
    vote_pool
}

pub fn configure_pools(env: &Env, vote_pool: &VotePoolClient) {
    vote_pool.configure(
        &Some(vec![env, DURATIONS[0], DURATIONS[1]]),
        &Some(vec![env, CLAIM_PERIODS[0], CLAIM_PERIODS[1]]),
        &None,
        &None,
    );
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp = timestamp;
    });
}

pub struct VotePoolTest<'a> {
    pub env: Env,
    pub admin: Address,
    pub token: token_contract::Client<'a>,
    pub vote_pool: VotePoolClient<'a>,
}

impl VotePoolTest<'_> {
    /// Deployed, configured with the two default pools and every auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let token = deploy_token_contract(&env, &admin);
        let vote_pool = deploy_vote_pool_contract(&env, admin.clone(), &token.address, None);
        configure_pools(&env, &vote_pool);

        VotePoolTest {
            env,
            admin,
            token,
            vote_pool,
        }
    }

    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        mint(&self.env, &self.token, &user, amount);
        user
    }

    /// Pool totals must match the voters' positions and the escrowed tokens.
    pub fn assert_ledger_consistent(&self, voters: &[&Address]) {
        let pools = self.vote_pool.query_pool_state().pools;

        let mut escrowed = 0;
        for (index, pool) in pools.iter().enumerate() {
            let owned: i128 = voters
                .iter()
                .filter_map(|voter| self.vote_pool.try_query_pool_votes(voter).ok())
                .filter_map(|votes| votes.ok())
                .map(|votes| votes.owned_shares.get(index as u32).unwrap_or(0))
                .sum();
            assert_eq!(pool.total_shares, owned);
            escrowed += pool.balance;
        }
        assert_eq!(self.token.balance(&self.vote_pool.address), escrowed);
    }
}
