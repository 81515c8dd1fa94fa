//! App - アプリケーション層
//!
//! ports を組み合わせて Task Store と通知スケジューリングを実装します。
//!
//! # 主要コンポーネント
//! - **TaskStoreBuilder**: 構築とワイヤリング
//! - **TaskStore**: タスク一覧の正本と read view
//! - **NotificationScheduler**: alert の計算と登録・取消
//! - **PublisherLoop**: alert 要求を通知サービスへ配送する背景タスク
//! - **Settings**: 呼び出しごとに渡すユーザー設定

pub mod builder;
mod publisher_loop;
pub mod progress;
pub mod scheduler;
pub mod settings;
pub mod store;
pub mod view;

pub use self::builder::{BuildError, TaskStoreBuilder};
pub use self::progress::Progress;
pub use self::scheduler::{NotificationScheduler, plan_alerts};
pub use self::settings::{Appearance, ColorScheme, Settings};
pub use self::store::{SubscriptionId, TaskStore};
pub use self::view::{CategoryFilter, SortBy};
