//! Task - To-do 1 件分のレコード
//!
//! `notification_id` は作成時に一度だけ振られ、alert キーの元になります。
//! `update` で中身が差し替わっても変わりません。

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::AlertId;
use super::category::Category;
use super::ids::{NotificationId, TaskId};
use super::priority::Priority;

/// Task は 1 件の To-do
///
/// `title` が空のものは下書き（編集中）で、Task Store には追加されません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub due_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
    pub notification_id: NotificationId,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    pub fn new(
        id: TaskId,
        notification_id: NotificationId,
        title: impl Into<String>,
        due_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            due_at,
            is_completed: false,
            notification_id,
            category: Category::default(),
            note: String::new(),
            priority: Priority::default(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    pub fn is_draft(&self) -> bool {
        self.title.is_empty()
    }

    pub fn due_alert_id(&self) -> AlertId {
        AlertId::due(self.notification_id)
    }

    pub fn reminder_alert_id(&self) -> AlertId {
        AlertId::reminder(self.notification_id)
    }

    /// 両方の alert キー（実際に登録済みかどうかは問わない）
    pub fn alert_ids(&self) -> BTreeSet<AlertId> {
        BTreeSet::from([self.due_alert_id(), self.reminder_alert_id()])
    }
}
