//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（Clock の時刻 + 乱数）

use crate::domain::ids::{NotificationId, TaskId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は Task と Notification の ID を生成
///
/// 生成される ID は毎回新しいものを返すこと。
/// Task Store は既に存在する TaskId の `add` を無視します。
pub trait IdGenerator: Send + Sync {
    fn generate_task_id(&self) -> TaskId;

    fn generate_notification_id(&self) -> NotificationId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_task_id(&self) -> TaskId {
        TaskId::from(self.next_ulid())
    }

    fn generate_notification_id(&self) -> NotificationId {
        NotificationId::from(self.next_ulid())
    }
}
