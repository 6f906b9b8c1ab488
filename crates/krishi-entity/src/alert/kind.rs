//! Alert kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of an alert, matched against per-user subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Weather warnings (storms, heat waves, unseasonal rain).
    Weather,
    /// Pest and disease outbreaks.
    Pest,
    /// Market price movements.
    Market,
    /// Government schemes and announcements.
    Government,
}

impl AlertKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Pest => "pest",
            Self::Market => "market",
            Self::Government => "government",
        }
    }

    /// All alert kinds, in declaration order.
    pub fn all() -> [AlertKind; 4] {
        [Self::Weather, Self::Pest, Self::Market, Self::Government]
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = krishi_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weather" => Ok(Self::Weather),
            "pest" => Ok(Self::Pest),
            "market" => Ok(Self::Market),
            "government" => Ok(Self::Government),
            _ => Err(krishi_core::AppError::validation(format!(
                "Invalid alert type: '{s}'. Expected one of: weather, pest, market, government"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for kind in AlertKind::all() {
            assert_eq!(kind.as_str().parse::<AlertKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_invalid_kind_rejected() {
        assert!("flood".parse::<AlertKind>().is_err());
    }
}
