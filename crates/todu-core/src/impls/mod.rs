//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryNotificationService**: alert をメモリに保持する通知サービス
//! - **RecordingEventSink**: StoreEvent を記録する EventSink
//!
//! OS の通知センターへの実装は UI シェル側に置きます。

pub mod inmem_notifier;
pub mod recording_sink;

pub use self::inmem_notifier::{InMemoryNotificationService, NotifierCall};
pub use self::recording_sink::RecordingEventSink;
