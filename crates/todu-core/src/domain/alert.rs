//! Alert - 外部通知サービスに登録する一回限りの通知
//!
//! 1 つの Task につき最大 2 件:
//! - 事前リマインダー（`"{notification_id}-reminder"`）
//! - 期限時刻の通知（`"{notification_id}"`）

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::NotificationId;

const REMINDER_SUFFIX: &str = "-reminder";

/// AlertId は通知サービスに登録するときのキー
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlertId(String);

impl AlertId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn due(notification_id: NotificationId) -> Self {
        Self(notification_id.to_string())
    }

    pub fn reminder(notification_id: NotificationId) -> Self {
        Self(format!("{notification_id}{REMINDER_SUFFIX}"))
    }

    pub fn is_reminder(&self) -> bool {
        self.0.ends_with(REMINDER_SUFFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// AlertRequest は 1 回だけ発火する alert の登録要求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub id: AlertId,
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
}

/// AlertTemplate は reminder と期限通知で共有する title / body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTemplate {
    pub title: String,
    /// `{title}` は Task の title に置き換わる
    pub body: String,
}

impl AlertTemplate {
    pub fn render_body(&self, task_title: &str) -> String {
        self.body.replace("{title}", task_title)
    }
}

impl Default for AlertTemplate {
    fn default() -> Self {
        Self {
            title: "To-do reminder".to_string(),
            body: "You have a to-do \"{title}\" that is not finished yet".to_string(),
        }
    }
}
