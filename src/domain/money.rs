use bigdecimal::{BigDecimal, RoundingMode};

/// Currency every order is priced in.
pub const CURRENCY: &str = "BRL";

/// Round a currency amount to two decimal places, half-up.
///
/// Applied after every arithmetic step, so intermediate rounding is part of
/// the observable result.
pub fn round2(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// Build a two-place amount from an integer number of cents, e.g. `15000` -> `150.00`.
pub fn from_cents(cents: i64) -> BigDecimal {
    BigDecimal::new(cents.into(), 2)
}

/// A whole-number percentage as a decimal rate, e.g. `5` -> `0.05`.
pub fn percent(value: i64) -> BigDecimal {
    BigDecimal::new(value.into(), 2)
}

/// `rate_pct` percent of `amount`, rounded to cents.
///
/// The product is taken in binary floating point and rounded with
/// `Math.round(x * 100) / 100` semantics, which is how rate discounts have
/// always been priced: `698.65 * 10%` is `69.86`, not the half-up `69.87`
/// of the exact `69.865`.
pub fn apply_rate(amount: &BigDecimal, rate_pct: i64) -> BigDecimal {
    match round2(amount).to_string().parse::<f64>() {
        Ok(base) => from_cents(round_cents(base * (rate_pct as f64 / 100.0))),
        Err(_) => round2(&(amount * percent(rate_pct))),
    }
}

// Ties go toward positive infinity.
fn round_cents(value: f64) -> i64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    let cents = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    cents as i64
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(&dec("1.225")), dec("1.23"));
        assert_eq!(round2(&dec("5.985")), dec("5.99"));
        assert_eq!(round2(&dec("1.224")), dec("1.22"));
    }

    #[test]
    fn round2_pads_to_two_places() {
        assert_eq!(round2(&dec("119.8")).to_string(), "119.80");
        assert_eq!(round2(&dec("1500")).to_string(), "1500.00");
    }

    #[test]
    fn from_cents_keeps_scale() {
        assert_eq!(from_cents(15000).to_string(), "150.00");
    }

    #[test]
    fn apply_rate_rounds_the_binary_product() {
        // 698.65 * 0.1 lands just below 69.865 in binary
        assert_eq!(apply_rate(&dec("698.65"), 10), dec("69.86"));
        assert_eq!(apply_rate(&dec("12.25"), 10), dec("1.23"));
        assert_eq!(apply_rate(&dec("119.70"), 5), dec("5.99"));
        assert_eq!(apply_rate(&dec("399.00"), 5).to_string(), "19.95");
        assert_eq!(apply_rate(&dec("0"), 20).to_string(), "0.00");
    }

    #[test]
    fn percent_is_a_rate() {
        assert_eq!(percent(5), dec("0.05"));
        assert_eq!(percent(20), dec("0.2"));
    }
}
