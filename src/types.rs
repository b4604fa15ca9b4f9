// 1.0: all the primitives live here. nothing in the fee engine works without these types.
// wad helpers, sizes, prices, usd amounts, gas. each is a newtype so the compiler catches mixups.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// 1.1: 18 decimal fixed point. every product and quotient is truncated toward zero to this.
pub const WAD_DECIMALS: u32 = 18;

// 1 ETH = 1e9 gwei
pub const GWEI_PER_ETH: Decimal = dec!(1_000_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("Decimal overflow in {0}")]
    Overflow(&'static str),
    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),
}

pub type MathResult<T> = Result<T, MathError>;

pub fn wad(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(WAD_DECIMALS, RoundingStrategy::ToZero)
}

pub fn mul_wad(a: Decimal, b: Decimal) -> MathResult<Decimal> {
    a.checked_mul(b).map(wad).ok_or(MathError::Overflow("mul_wad"))
}

pub fn div_wad(a: Decimal, b: Decimal) -> MathResult<Decimal> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero("div_wad"));
    }
    a.checked_div(b).map(wad).ok_or(MathError::Overflow("div_wad"))
}

pub fn checked_add(a: Decimal, b: Decimal) -> MathResult<Decimal> {
    a.checked_add(b).ok_or(MathError::Overflow("add"))
}

pub fn checked_sub(a: Decimal, b: Decimal) -> MathResult<Decimal> {
    a.checked_sub(b).ok_or(MathError::Overflow("sub"))
}

/// Divides and rounds up to the next whole number. `None` on a zero divisor.
pub fn div_ceil(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_div(b).map(|q| q.ceil())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketId(pub u32);

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: signed size: positive = long, negative = short. skew and order deltas use this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedSize(Decimal);

impl SignedSize {
    pub fn new(size: Decimal) -> Self {
        Self(size)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn abs(&self) -> Decimal {
        self.0.abs()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_long(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_short(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn add(&self, delta: SignedSize) -> MathResult<Self> {
        checked_add(self.0, delta.0).map(Self)
    }
}

impl fmt::Display for SignedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.3: price in USD per unit of base. must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: Decimal) -> Self {
        debug_assert!(value > Decimal::ZERO);
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.4: USD amount. fees, notionals, keeper rewards, pnl all use this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote(Decimal);

impl Quote {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn add(&self, other: Quote) -> MathResult<Self> {
        checked_add(self.0, other.0).map(Self)
    }

    pub fn mul(&self, factor: Decimal) -> MathResult<Self> {
        mul_wad(self.0, factor).map(Self)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for Quote {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quote {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

// 1.5: gas price in gwei. block base fee comes in this unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Gwei(Decimal);

impl Gwei {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    // the only place the 1e9 scale is applied. dividing by 1e9 cannot overflow
    pub fn to_eth(&self) -> Decimal {
        wad(self.0 / GWEI_PER_ETH)
    }
}

impl fmt::Display for Gwei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gwei", self.0)
    }
}

// 1.6: gas consumed by a keeper transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GasUnits(pub u64);

impl GasUnits {
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}
