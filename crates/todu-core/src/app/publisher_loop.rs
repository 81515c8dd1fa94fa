//! PublisherLoop - alert outbox を NotificationService に配送する
//!
//! # フロー
//! 1. Scheduler が AlertCommand を outbox（unbounded channel）に積む。送信側は待たない
//! 2. 背景タスクが FIFO で取り出して NotificationService を呼ぶ
//! 3. 失敗は `warn!` に残して次へ進む（リトライしない）
//!
//! 1 本のループで順番に処理するので、同じ alert id への
//! cancel → register が逆転することはありません。

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::alert::{AlertId, AlertRequest};
use crate::ports::NotificationService;

#[derive(Debug)]
pub(crate) enum AlertCommand {
    Register(AlertRequest),
    Cancel(BTreeSet<AlertId>),
    /// ここまでに積まれたコマンドが処理済みになったら通知する
    Flush(oneshot::Sender<()>),
}

/// PublisherLoop は outbox の送信側と背景タスクの JoinHandle を持つ
///
/// 受信側は背景タスク（`run`）が所有します。
pub(crate) struct PublisherLoop {
    outbox: mpsc::UnboundedSender<AlertCommand>,
    join: JoinHandle<()>,
}

impl PublisherLoop {
    /// `runtime` 上で背景タスクを起動する
    pub(crate) fn spawn(runtime: &Handle, service: Arc<dyn NotificationService>) -> Self {
        let (outbox, rx) = mpsc::unbounded_channel();
        let join = runtime.spawn(run(rx, service));
        Self { outbox, join }
    }

    /// fire-and-forget で積む。ループが止まっていたら捨ててログに残す。
    pub(crate) fn submit(&self, command: AlertCommand) {
        if let Err(err) = self.outbox.send(command) {
            warn!(command = ?err.0, "alert publisher is gone; dropping command");
        }
    }

    pub(crate) async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        self.submit(AlertCommand::Flush(tx));
        // ループが落ちていれば Err になるが、待つものもないので無視する
        let _ = rx.await;
    }

    /// outbox を閉じ、残りのコマンドを処理し終えるまで待つ
    pub(crate) async fn shutdown_and_join(self) {
        drop(self.outbox);
        if let Err(err) = self.join.await {
            warn!(error = %err, "alert publisher task ended abnormally");
        }
    }
}

async fn run(mut rx: mpsc::UnboundedReceiver<AlertCommand>, service: Arc<dyn NotificationService>) {
    while let Some(command) = rx.recv().await {
        match command {
            AlertCommand::Register(alert) => {
                let alert_id = alert.id.clone();
                let fire_at = alert.fire_at;
                match service.register(alert).await {
                    Ok(()) => debug!(%alert_id, %fire_at, "alert registered"),
                    Err(err) => warn!(%alert_id, error = %err, "failed to register alert"),
                }
            }
            AlertCommand::Cancel(ids) => {
                let count = ids.len();
                if let Err(err) = service.cancel_all(ids).await {
                    warn!(count, error = %err, "failed to cancel alerts");
                } else {
                    debug!(count, "alerts canceled");
                }
            }
            AlertCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("alert publisher stopped");
}
