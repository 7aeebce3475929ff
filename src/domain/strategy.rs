use super::debt::Debt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Debt prioritisation policy.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first.
    #[default]
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Avalanche, Strategy::Snowball];

    /// Priority comparator: `Less` means `a` is paid down before `b`.
    ///
    /// Equal keys compare `Equal` so a stable sort keeps input order on ties.
    pub fn compare(self, a: &Debt, b: &Debt) -> Ordering {
        match self {
            Strategy::Avalanche => b.annual_rate_percent.cmp(&a.annual_rate_percent),
            Strategy::Snowball => a.balance.cmp(&b.balance),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            other => Err(format!(
                "unknown strategy `{other}` (expected `avalanche` or `snowball`)"
            )),
        }
    }
}
