use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Business categories of the simplified taxation scheme.
///
/// Each category carries a statutory deemed-purchase rate. A filing uses
/// exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    /// Wholesale (90%).
    First,
    /// Retail (80%).
    Second,
    /// Manufacturing, construction, agriculture (70%).
    Third,
    /// Other businesses, e.g. restaurants (60%).
    Fourth,
    /// Services, finance, insurance (50%).
    Fifth,
    /// Real estate (40%).
    Sixth,
}

impl BusinessCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
            Self::Third => "3",
            Self::Fourth => "4",
            Self::Fifth => "5",
            Self::Sixth => "6",
        }
    }

    /// Deemed-purchase rate fixed by statute for this category.
    pub fn statutory_deemed_purchase_rate(&self) -> Decimal {
        match self {
            Self::First => dec!(0.90),
            Self::Second => dec!(0.80),
            Self::Third => dec!(0.70),
            Self::Fourth => dec!(0.60),
            Self::Fifth => dec!(0.50),
            Self::Sixth => dec!(0.40),
        }
    }
}
