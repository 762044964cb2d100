use serde::{Deserialize, Serialize};

/// How bad an anomaly is. `Unknown` marks a suspect that still needs verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Unknown,
    Normal,
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::Unknown,
        Self::Normal,
        Self::Minor,
        Self::Major,
        Self::Critical,
    ];

    /// Integer status as used by rule reports.
    pub fn status(&self) -> i64 {
        match self {
            Self::Unknown => -1,
            Self::Normal => 0,
            Self::Minor => 1,
            Self::Major => 2,
            Self::Critical => 3,
        }
    }

    pub fn from_status(status: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.status() == status)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Normal => "normal",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Critical => "critical",
        }
    }

    /// Case-insensitive name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == lowered)
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::Unknown
    }

    pub fn is_normal(&self) -> bool {
        *self == Self::Normal
    }

    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::Minor | Self::Major | Self::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
