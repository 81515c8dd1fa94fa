//! NotificationService port - OS のローカル通知センター
//!
//! コアが依存するのは `register` と `cancel_all` の 2 つだけです。
//! 呼び出しは AlertPublisher の背景タスクから行われ、
//! 失敗はログに残すだけで Task Store には返りません。

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::alert::{AlertId, AlertRequest};
use crate::domain::errors::NotifyError;

/// NotificationService は point-in-time の alert を登録・取消する
///
/// # 契約
/// - `register` は同じ id で再登録されたら上書きする
/// - `cancel_all` は冪等（未登録・取消済みの id はエラーにしない）
/// - 過去時刻の alert はサービス側が発火しないことを期待する（コアでは検証しない）
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn register(&self, alert: AlertRequest) -> Result<(), NotifyError>;

    async fn cancel_all(&self, ids: BTreeSet<AlertId>) -> Result<(), NotifyError>;

    /// alert / badge / sound の許可を求める。`Ok(false)` はユーザーが拒否した場合。
    async fn request_authorization(&self) -> Result<bool, NotifyError> {
        Ok(true)
    }
}
