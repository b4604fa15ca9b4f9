// 2.0: side agreement between two signed quantities. zero is wild and agrees with anything.
// fee allocation branches on this at the skew-crossing boundary.

use crate::types::SignedSize;
use rust_decimal::Decimal;

pub fn is_same_side(a: Decimal, b: Decimal) -> bool {
    a.is_zero() || b.is_zero() || (a > Decimal::ZERO) == (b > Decimal::ZERO)
}

impl SignedSize {
    pub fn is_same_side(&self, other: SignedSize) -> bool {
        is_same_side(self.value(), other.value())
    }
}
