use serde::{Deserialize, Serialize};

/// Whether an item can be fixed directly or needs further decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCauseFlag {
    #[default]
    Undetermined,
    RootCause,
    NotRootCause,
}

impl RootCauseFlag {
    pub fn from_bool(possible_root_cause: bool) -> Self {
        if possible_root_cause {
            Self::RootCause
        } else {
            Self::NotRootCause
        }
    }

    /// `None` while undetermined.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Undetermined => None,
            Self::RootCause => Some(true),
            Self::NotRootCause => Some(false),
        }
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, Self::Undetermined)
    }
}
