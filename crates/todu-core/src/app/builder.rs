//! TaskStoreBuilder - Task Store の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - NotificationService は必須。未設定なら build() が BuildError を返す
//! - Clock / IdGenerator / AlertTemplate は省略時に本番用のデフォルトを使う
//! - PublisherLoop を載せる Tokio runtime は `.runtime(handle)` で渡すか、
//!   runtime の中から build() を呼ぶ。どちらも無ければ BuildError::NoRuntime

use std::sync::Arc;

use tokio::runtime::Handle;

use super::scheduler::NotificationScheduler;
use super::store::TaskStore;
use crate::domain::alert::AlertTemplate;
use crate::ports::{Clock, EventSink, IdGenerator, NotificationService, SystemClock, UlidGenerator};

/// TaskStoreBuilder は TaskStore を構築
///
/// # 使用例
/// ```ignore
/// let store = TaskStoreBuilder::new()
///     .notification_service(Arc::new(InMemoryNotificationService::new()))
///     .subscribe(Arc::new(|event: &StoreEvent| println!("{event:?}")))
///     .build()?;
/// ```
#[derive(Default)]
pub struct TaskStoreBuilder {
    service: Option<Arc<dyn NotificationService>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    template: Option<AlertTemplate>,
    runtime: Option<Handle>,
    sinks: Vec<Arc<dyn EventSink>>,
}

/// BuildError は TaskStore 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("a notification service must be configured before building the task store")]
    MissingNotificationService,

    #[error("no tokio runtime: call build() inside a runtime or pass one with .runtime(handle)")]
    NoRuntime,
}

impl TaskStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notification_service(mut self, service: Arc<dyn NotificationService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn template(mut self, template: AlertTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// UI スレッドなど runtime の外から build する場合に使う
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// build 直後から EventSink にイベントを流す
    pub fn subscribe(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// TaskStore を構築し、PublisherLoop を起動する
    pub fn build(self) -> Result<TaskStore, BuildError> {
        let service = self.service.ok_or(BuildError::MissingNotificationService)?;
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| BuildError::NoRuntime)?,
        };
        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids: Arc<dyn IdGenerator> = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(Arc::clone(&clock))));
        let scheduler = NotificationScheduler::spawn(
            &runtime,
            service,
            clock,
            self.template.unwrap_or_default(),
        );

        let mut store = TaskStore::new(scheduler, ids);
        for sink in self.sinks {
            store.subscribe(sink);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryNotificationService;

    #[tokio::test]
    async fn build_requires_notification_service() {
        let result = TaskStoreBuilder::new().build();
        assert!(matches!(result, Err(BuildError::MissingNotificationService)));
    }

    #[tokio::test]
    async fn build_with_defaults() {
        let store = TaskStoreBuilder::new()
            .notification_service(Arc::new(InMemoryNotificationService::new()))
            .build()
            .unwrap();
        assert!(store.is_empty());
        store.shutdown().await;
    }

    #[test]
    fn build_outside_runtime_returns_error() {
        let result = TaskStoreBuilder::new()
            .notification_service(Arc::new(InMemoryNotificationService::new()))
            .build();
        assert!(matches!(result, Err(BuildError::NoRuntime)));
    }

    #[test]
    fn build_outside_runtime_with_explicit_handle() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let service = InMemoryNotificationService::new();
        let mut store = TaskStoreBuilder::new()
            .notification_service(Arc::new(service.clone()))
            .runtime(runtime.handle().clone())
            .build()
            .unwrap();

        let mut task = store.new_draft(chrono::Utc::now() + chrono::Duration::hours(5));
        task.title = "from the ui thread".to_string();
        assert!(store.add(task, &crate::app::Settings::default()));

        runtime.block_on(async {
            store.flush().await;
            assert_eq!(service.pending().len(), 2);
            store.shutdown().await;
        });
    }
}
