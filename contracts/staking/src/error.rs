use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    ConfigNotSet = 1,
    ContractMathError = 2,
    AlreadyInitialized = 3,

    // Pool configuration
    DurationsRequired = 10,
    ClaimPeriodsRequired = 11,
    DurationsEmpty = 12,
    MismatchedVectorSizes = 13,
    DurationNotPositive = 14,
    ClaimPeriodNotPositive = 15,
    ClaimPeriodNotLessThanDuration = 16,
    DurationsNotIncreasing = 17,
    ClaimPeriodsDecreasing = 18,
    DurationsCantChange = 19,
    ClaimPeriodsCantChange = 20,
    ProdRateOutOfRange = 21,
    VoterRateOutOfRange = 22,

    // Deposit, claim and transfer
    PoolsNotInitialized = 30,
    InvalidPool = 31,
    SymbolMismatch = 32,
    AmountNotPositive = 33,
    VoterRecordMissing = 34,
    FromVoterRecordMissing = 35,
    ToVoterRecordMissing = 36,
    VoterNotUpgraded = 37,
    ClaimTooSoon = 38,
    WithdrawingZero = 39,
    MemoTooLong = 40,
    SameAccount = 41,
    InvalidAccount = 42,
    PoolHasNoShares = 43,
}
