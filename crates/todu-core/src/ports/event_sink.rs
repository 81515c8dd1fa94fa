//! EventSink port - Task Store の変更通知
//!
//! UI は two-way binding ではなく、EventSink を subscribe して
//! read-only に状態を観測します。

use crate::domain::events::StoreEvent;

/// EventSink は StoreEvent を受け取る
///
/// Task Store の mutation と同じスレッドで同期的に呼ばれます。
/// 重い処理はしないこと。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &StoreEvent);
}

/// 何もしない EventSink
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &StoreEvent) {}
}

impl<F> EventSink for F
where
    F: Fn(&StoreEvent) + Send + Sync,
{
    fn emit(&self, event: &StoreEvent) {
        self(event)
    }
}
