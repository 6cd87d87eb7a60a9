use fixed::types::I32F32;

/// Q32.32 fixed-point money. Bills and totals never touch floating point, so
/// sums taken in any order compare equal.
pub type Amount = I32F32;

/// Convert an f64 price to Amount. Use only when building a menu.
#[inline]
pub fn f64_to_amount(v: f64) -> Amount {
    Amount::from_num(v)
}

/// Convert Amount to f64. Use only for display.
#[inline]
pub fn amount_to_f64(v: Amount) -> f64 {
    v.to_num::<f64>()
}

/// Unit price times quantity. Returns None on overflow.
#[inline]
pub fn checked_bill(unit_price: Amount, quantity: u32) -> Option<Amount> {
    unit_price.checked_mul(Amount::checked_from_num(quantity)?)
}

/// Sum a sequence of amounts.
pub fn total<I>(amounts: I) -> Amount
where
    I: IntoIterator<Item = Amount>,
{
    amounts.into_iter().fold(Amount::ZERO, |acc, v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_is_price_times_quantity() {
        let price = f64_to_amount(250.0);
        assert_eq!(checked_bill(price, 2), Some(f64_to_amount(500.0)));
    }

    #[test]
    fn bill_keeps_fractional_prices_exact() {
        let price = f64_to_amount(12.5);
        assert_eq!(amount_to_f64(checked_bill(price, 3).unwrap()), 37.5);
    }

    #[test]
    fn bill_overflow_is_none() {
        assert!(checked_bill(Amount::MAX, 2).is_none());
    }

    #[test]
    fn total_of_nothing_is_zero() {
        assert_eq!(total(std::iter::empty()), Amount::ZERO);
    }

    #[test]
    fn total_is_order_independent() {
        let a = f64_to_amount(0.1);
        let b = f64_to_amount(0.2);
        let c = f64_to_amount(0.3);
        assert_eq!(total([a, b, c]), total([c, a, b]));
    }
}
