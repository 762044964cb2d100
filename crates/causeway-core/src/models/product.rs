//! Subsystem tags. Ids are stable because rule reports carry them numerically.

use serde::{Deserialize, Serialize};

/// Which subsystem an anomaly belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Product {
    Other,
    #[default]
    Spark,
    Supersql,
    Us,
    Yarn,
    Hdfs,
    Idex,
    Mapreduce,
    Thive,
}

impl Product {
    pub const ALL: [Product; 9] = [
        Self::Other,
        Self::Spark,
        Self::Supersql,
        Self::Us,
        Self::Yarn,
        Self::Hdfs,
        Self::Idex,
        Self::Mapreduce,
        Self::Thive,
    ];

    /// Numeric id used by rule reports.
    pub fn id(&self) -> i64 {
        match self {
            Self::Other => 0,
            Self::Spark => 4,
            Self::Supersql => 5,
            Self::Us => 6,
            Self::Yarn => 7,
            Self::Hdfs => 9,
            Self::Idex => 16,
            Self::Mapreduce => 19,
            Self::Thive => 23,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Spark => "spark",
            Self::Supersql => "supersql",
            Self::Us => "us",
            Self::Yarn => "yarn",
            Self::Hdfs => "hdfs",
            Self::Idex => "idex",
            Self::Mapreduce => "mapreduce",
            Self::Thive => "thive",
        }
    }

    /// Case-insensitive lookup. Unrecognised names fall back to `Other`.
    pub fn from_name(name: &str) -> Self {
        let lowered = name.trim().to_ascii_lowercase();
        match Self::ALL.into_iter().find(|p| p.as_str() == lowered) {
            Some(product) => product,
            None => {
                tracing::warn!(product = %name, "unknown product name, using `other`");
                Self::Other
            }
        }
    }
}

impl From<String> for Product {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Product> for String {
    fn from(product: Product) -> Self {
        product.as_str().to_string()
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
