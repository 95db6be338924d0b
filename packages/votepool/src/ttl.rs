// Constants for storage bump amounts
pub const DAY_IN_LEDGERS: u32 = 17280;

// Instance storage holds the contract config and the pool table; both are read on every call.
// Extended to 7 days whenever fewer than 6 days remain.
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// Persistent storage holds the pool ledger and the voter records.
// Extended to 30 days whenever fewer than 29 days remain.
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;
