use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Resource-cost counters reported by the reasoning service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub sent: u64,
    pub received: u64,
    pub total: u64,
}

impl TokenUsage {
    pub fn new(sent: u64, received: u64) -> Self {
        Self {
            sent,
            received,
            total: sent + received,
        }
    }
}

impl Add for TokenUsage {
    type Output = TokenUsage;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            sent: self.sent + rhs.sent,
            received: self.received + rhs.received,
            total: self.total + rhs.total,
        }
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
