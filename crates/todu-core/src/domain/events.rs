//! Events - Task Store が発行するドメインイベント
//!
//! UI は EventSink を subscribe して、変更のたびに一覧を描き直します。
//! イベントは mutation が実際に適用されたときだけ発行されます（no-op では発行しない）。

use serde::{Deserialize, Serialize};

use super::ids::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "task_id", rename_all = "snake_case")]
pub enum StoreEvent {
    Added(TaskId),
    Updated(TaskId),
    Completed(TaskId),
    /// completed → incomplete（alert は再登録されない）
    Reopened(TaskId),
    Deleted(TaskId),
}

impl StoreEvent {
    pub fn task_id(&self) -> TaskId {
        match *self {
            StoreEvent::Added(id)
            | StoreEvent::Updated(id)
            | StoreEvent::Completed(id)
            | StoreEvent::Reopened(id)
            | StoreEvent::Deleted(id) => id,
        }
    }
}
