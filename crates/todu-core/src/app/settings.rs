//! Settings - ユーザー設定
//!
//! 元々は key-value ストレージにグローバルに置かれていた設定を、
//! 明示的な struct として Task Store / Scheduler の呼び出しごとに渡します。
//! コアは設定の永続化を持ちません（読み込みは TOML からの便宜関数のみ）。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use super::view::{CategoryFilter, SortBy};
use crate::domain::errors::TodoError;

/// 事前リマインダーの許容範囲（時間）
pub const REMINDER_LEAD_RANGE: std::ops::RangeInclusive<u32> = 1..=24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 期限の何時間前にリマインドするか。小数は切り捨て。
    #[serde(deserialize_with = "whole_hours")]
    pub reminder_lead_hours: u32,
    pub notifications_enabled: bool,
    pub show_completed_tasks: bool,
    pub sort_by: SortBy,
    pub selected_category: CategoryFilter,
    pub appearance: Appearance,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_lead_hours: 2,
            notifications_enabled: true,
            show_completed_tasks: true,
            sort_by: SortBy::default(),
            selected_category: CategoryFilter::default(),
            appearance: Appearance::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, TodoError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, TodoError> {
        let text = fs::read_to_string(path).map_err(|source| TodoError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        info!(
            reminder_lead_hours = settings.reminder_lead_hours,
            notifications_enabled = settings.notifications_enabled,
            sort_by = %settings.sort_by,
            "settings loaded"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), TodoError> {
        if !REMINDER_LEAD_RANGE.contains(&self.reminder_lead_hours) {
            return Err(TodoError::InvalidSetting {
                key: "reminder_lead_hours",
                reason: format!(
                    "{} is outside {}..={}",
                    self.reminder_lead_hours,
                    REMINDER_LEAD_RANGE.start(),
                    REMINDER_LEAD_RANGE.end()
                ),
            });
        }
        if self.sort_by == SortBy::Unsorted {
            debug!("unrecognized sort_by; list keeps insertion order");
        }
        Ok(())
    }
}

/// 外観設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub use_system_theme: bool,
    /// `use_system_theme` が false のときだけ参照される
    pub dark_mode: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            use_system_theme: true,
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl Appearance {
    pub fn resolve(self, system_is_dark: bool) -> ColorScheme {
        let dark = if self.use_system_theme {
            system_is_dark
        } else {
            self.dark_mode
        };
        if dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

/// 整数でも小数でも受け付け、時間単位に切り捨てる
fn whole_hours<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Hours {
        Whole(i64),
        Fractional(f64),
    }

    let whole = match Hours::deserialize(deserializer)? {
        Hours::Whole(h) => h,
        Hours::Fractional(h) if h.is_finite() => h.trunc() as i64,
        Hours::Fractional(h) => {
            return Err(serde::de::Error::custom(format!("invalid hour value {h}")));
        }
    };
    u32::try_from(whole)
        .map_err(|_| serde::de::Error::custom(format!("hours must be non-negative, got {whole}")))
}
