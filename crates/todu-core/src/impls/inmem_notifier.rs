//! InMemoryNotificationService - 開発用・テスト用の通知サービス
//!
//! # 実装詳細
//! - pending の alert を BTreeMap<AlertId, AlertRequest> で保持
//! - 呼び出しを順番どおり `calls` に記録（cancel → register の順序検証用）
//! - `set_authorized(false)` で「通知を許可しない」ユーザーを再現

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::alert::{AlertId, AlertRequest};
use crate::domain::errors::NotifyError;
use crate::ports::NotificationService;

/// 記録された呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Register(AlertRequest),
    CancelAll(BTreeSet<AlertId>),
}

#[derive(Debug)]
struct NotifierState {
    pending: BTreeMap<AlertId, AlertRequest>,
    calls: Vec<NotifierCall>,
    authorized: bool,
}

/// InMemoryNotificationService は alert をメモリ上に保持するだけの実装
///
/// Clone は同じ状態を共有します。Task Store に渡した後も
/// テスト側のハンドルから中身を確認できます。
#[derive(Debug, Clone)]
pub struct InMemoryNotificationService {
    state: Arc<Mutex<NotifierState>>,
}

impl InMemoryNotificationService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(NotifierState {
                pending: BTreeMap::new(),
                calls: Vec::new(),
                authorized: true,
            })),
        }
    }

    /// false にすると以降の `register` が PermissionDenied を返す
    pub fn set_authorized(&self, authorized: bool) {
        self.lock().authorized = authorized;
    }

    pub fn pending(&self) -> Vec<AlertRequest> {
        self.lock().pending.values().cloned().collect()
    }

    pub fn pending_alert(&self, id: &AlertId) -> Option<AlertRequest> {
        self.lock().pending.get(id).cloned()
    }

    pub fn calls(&self) -> Vec<NotifierCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, NotifierState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn register(&self, alert: AlertRequest) -> Result<(), NotifyError> {
        let mut state = self.lock();
        state.calls.push(NotifierCall::Register(alert.clone()));
        if !state.authorized {
            return Err(NotifyError::PermissionDenied);
        }
        state.pending.insert(alert.id.clone(), alert);
        Ok(())
    }

    async fn cancel_all(&self, ids: BTreeSet<AlertId>) -> Result<(), NotifyError> {
        let mut state = self.lock();
        for id in &ids {
            state.pending.remove(id);
        }
        state.calls.push(NotifierCall::CancelAll(ids));
        Ok(())
    }

    async fn request_authorization(&self) -> Result<bool, NotifyError> {
        Ok(self.lock().authorized)
    }
}
