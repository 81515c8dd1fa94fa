//! Domain model (ids, task, category, priority, alert, events, errors).
//!
//! 純粋なデータ型のみ。時刻・ID 生成・通知サービスへの依存は ports 側に置きます。

pub mod alert;
pub mod category;
pub mod errors;
pub mod events;
pub mod ids;
pub mod priority;
pub mod task;

pub use self::alert::{AlertId, AlertRequest, AlertTemplate};
pub use self::category::{Category, CategoryColor};
pub use self::errors::{NotifyError, TodoError};
pub use self::events::StoreEvent;
pub use self::ids::{NotificationId, TaskId};
pub use self::priority::Priority;
pub use self::task::Task;
