// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

#![no_std]

/// Unsigned fixed-point number with 18 fractional digits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal(u128);

impl Decimal {
    const DECIMAL_FRACTIONAL: u128 = 1_000_000_000_000_000_000u128; // 1*10**18
    /// The number of decimal places. Since decimal types are fixed-point rather than
    /// floating-point, this is a constant.
    pub const DECIMAL_PLACES: u32 = 18;

    /// Builds a decimal from signed atomics, as they travel through contract arguments.
    ///
    /// Negative input has no unsigned representation and yields `None`.
    ///
    /// ```
    /// use soroban_decimal::Decimal;
    ///
    /// assert!(Decimal::from_atomics(-1).is_none());
    /// assert!(Decimal::from_atomics(250_000_000_000_000_000).is_some());
    /// ```
    pub fn from_atomics(atomics: i128) -> Option<Self> {
        u128::try_from(atomics).ok().map(Self)
    }

    /// `true` for values in the half-open range `[0, 1)`.
    #[must_use]
    pub const fn is_fraction(&self) -> bool {
        self.0 < Self::DECIMAL_FRACTIONAL
    }
}
