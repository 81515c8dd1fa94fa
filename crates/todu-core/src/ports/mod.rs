//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! OS の通知センター、時計、ID 生成、UI への変更通知を trait で隠蔽し、
//! テストでは差し替えられるようにします。

pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod notification_service;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{EventSink, NoopEventSink};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::notification_service::NotificationService;
