use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Income-tax regime a taxpayer elects for the financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Regime {
    /// Default regime: larger standard deduction, no itemized deductions.
    #[default]
    New,
    /// Optional regime: smaller standard deduction plus 80C/80D-style deductions.
    Old,
}

impl Regime {
    pub const ALL: [Regime; 2] = [Regime::New, Regime::Old];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Old => "OLD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New Tax Regime",
            Self::Old => "Old Tax Regime",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "OLD" => Ok(Self::Old),
            _ => Err(InvalidInput::UnknownRegime(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("NEW".parse::<Regime>(), Ok(Regime::New));
        assert_eq!("old".parse::<Regime>(), Ok(Regime::Old));
        assert_eq!(" New ".parse::<Regime>(), Ok(Regime::New));
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(
            "flat".parse::<Regime>(),
            Err(InvalidInput::UnknownRegime("flat".to_string()))
        );
    }

    #[test]
    fn display_matches_as_str() {
        for regime in Regime::ALL {
            assert_eq!(regime.to_string(), regime.as_str());
        }
    }

    #[test]
    fn default_is_new_regime() {
        assert_eq!(Regime::default(), Regime::New);
    }
}
