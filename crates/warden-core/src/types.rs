use std::str::FromStr;

use crate::error::CoreError;

/// How an access decision manager combines the votes of its voters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecisionStrategy {
    /// Grant as soon as one voter grants.
    #[default]
    Affirmative,
    /// Grant if more voters grant than deny.
    Consensus,
    /// Grant only if no voter denies any attribute.
    Unanimous,
    /// The first voter that does not abstain decides.
    Priority,
}

impl DecisionStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Affirmative => "affirmative",
            Self::Consensus => "consensus",
            Self::Unanimous => "unanimous",
            Self::Priority => "priority",
        }
    }
}

impl std::fmt::Display for DecisionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "affirmative" => Ok(Self::Affirmative),
            "consensus" => Ok(Self::Consensus),
            "unanimous" => Ok(Self::Unanimous),
            "priority" => Ok(Self::Priority),
            _ => Err(CoreError::InvalidConfiguration(format!(
                "The strategy \"{s}\" is not supported."
            ))),
        }
    }
}
