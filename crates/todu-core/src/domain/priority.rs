//! Priority - Task の優先度
//!
//! 値が大きいほど優先度が高く、`SortBy::Priority` では降順に並びます。

use serde::{Deserialize, Serialize};

use super::errors::TodoError;

/// Priority は 0（低）/ 1（中）/ 2（高）
///
/// serde では整数としてやり取りします。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Priority {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = TodoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            other => Err(TodoError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.value()
    }
}
