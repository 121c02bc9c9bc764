use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which debt receives money left over once every minimum is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Smallest balance first.
    #[default]
    Snowball,
    /// Highest interest rate first.
    Avalanche,
}

impl Strategy {
    pub fn token(&self) -> &'static str {
        match self {
            Strategy::Snowball => "Snowball",
            Strategy::Avalanche => "Avalanche",
        }
    }

    /// Case-insensitive; anything unrecognized (including blank) is `Snowball`.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("avalanche") {
            Strategy::Avalanche
        } else {
            Strategy::Snowball
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Strategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_case_insensitive() {
        assert_eq!(Strategy::from_token("avalanche"), Strategy::Avalanche);
        assert_eq!(Strategy::from_token("AVALANCHE"), Strategy::Avalanche);
        assert_eq!(Strategy::from_token(" Avalanche "), Strategy::Avalanche);
        assert_eq!(Strategy::from_token("snowBall"), Strategy::Snowball);
    }

    #[test]
    fn test_unknown_token_defaults_to_snowball() {
        assert_eq!(Strategy::from_token(""), Strategy::Snowball);
        assert_eq!(Strategy::from_token("compare"), Strategy::Snowball);
        assert_eq!("whatever".parse::<Strategy>().unwrap(), Strategy::Snowball);
    }

    #[test]
    fn test_display_uses_stable_token() {
        assert_eq!(Strategy::Snowball.to_string(), "Snowball");
        assert_eq!(Strategy::Avalanche.to_string(), "Avalanche");
        assert_eq!(
            serde_json::to_string(&Strategy::Avalanche).unwrap(),
            "\"Avalanche\""
        );
    }
}
