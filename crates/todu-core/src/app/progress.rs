//! Progress - 進捗バー用の集計

use serde::{Deserialize, Serialize};

/// Progress は完了数と総数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
}

impl Progress {
    /// 0.0..=1.0。Task が 0 件なら 0.0
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    /// 整数パーセント（切り捨て）
    pub fn percent(&self) -> u8 {
        (self.ratio() * 100.0) as u8
    }
}
