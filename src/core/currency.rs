//! Currency display formatting.
//!
//! Amounts are only rounded here, for presentation. Sums elsewhere keep full
//! precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Anything that can turn an amount into display text.
pub trait CurrencyFormatter {
    fn format(&self, amount: Decimal) -> String;
}

impl<F> CurrencyFormatter for F
where
    F: Fn(Decimal) -> String,
{
    fn format(&self, amount: Decimal) -> String {
        self(amount)
    }
}

/// Symbol-prefixed amount with digit grouping.
///
/// The default renders Indonesian rupiah without fractional digits:
/// `Rp 1.250.000`, `-Rp 5.000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    /// Placed between symbol and digits.
    pub symbol_separator: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::rupiah()
    }
}

impl CurrencyFormat {
    pub fn rupiah() -> Self {
        Self {
            symbol: "Rp".into(),
            symbol_separator: " ".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
            fraction_digits: 0,
        }
    }

    /// `$1,234.50` style.
    pub fn dollar() -> Self {
        Self {
            symbol: "$".into(),
            symbol_separator: String::new(),
            thousands_separator: ",".into(),
            decimal_separator: ".".into(),
            fraction_digits: 2,
        }
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!(
            "{:.prec$}",
            rounded.abs(),
            prec = self.fraction_digits as usize
        );

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let grouped = int_part
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join(&self.thousands_separator);

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&self.symbol_separator);
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}
