//! todu-core
//!
//! To-do アプリのヘッドレスなコア: Task Store と通知スケジューリング。
//! UI シェルは TaskStore の操作を呼び、StoreEvent を受けて描画するだけです。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, category, priority, alert, events, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, NotificationService, EventSink）
//! - **app**: アプリケーションロジック（builder, store, scheduler, settings, view）
//! - **impls**: 実装（InMemoryNotificationService など開発用）
//! - **logging**: tracing の初期化

pub mod app;
pub mod domain;
pub mod impls;
pub mod logging;
pub mod ports;

pub use app::{Settings, TaskStore, TaskStoreBuilder};
pub use domain::{Category, Priority, Task, TaskId};
