//! TaskStore - タスク一覧の正本（source of truth）
//!
//! すべての mutation はここを通り、alert の状態を Task と一致させます。
//!
//! # 設計原則
//! - 見つからない id への操作はエラーではなく no-op（UI を単純に保つ）
//! - title が空の Task（draft）は一覧に入れない
//! - 完了済みの Task には有効な alert が残らない
//! - 通知サービスの失敗は Task Store の状態に影響しない
//!
//! 保持は「挿入順の連番 → Task」の BTreeMap と「TaskId → 連番」の索引です。

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::progress::Progress;
use super::scheduler::NotificationScheduler;
use super::settings::Settings;
use super::view::{CategoryFilter, SortBy, filter_and_sort};
use crate::domain::events::StoreEvent;
use crate::domain::ids::TaskId;
use crate::domain::task::Task;
use crate::ports::{EventSink, IdGenerator};

/// subscribe の解除に使うハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct TaskStore {
    tasks: BTreeMap<u64, Task>,
    index: HashMap<TaskId, u64>,
    next_seq: u64,
    scheduler: NotificationScheduler,
    ids: Arc<dyn IdGenerator>,
    sinks: Vec<(SubscriptionId, Arc<dyn EventSink>)>,
    next_subscription: u64,
}

impl TaskStore {
    pub fn new(scheduler: NotificationScheduler, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            tasks: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
            scheduler,
            ids,
            sinks: Vec::new(),
            next_subscription: 0,
        }
    }

    /// 新規作成シート用の空の draft（新しい id と notification id 付き）
    pub fn new_draft(&self, due_at: DateTime<Utc>) -> Task {
        Task::new(
            self.ids.generate_task_id(),
            self.ids.generate_notification_id(),
            String::new(),
            due_at,
        )
    }

    /// 期限を現在時刻にした draft
    pub fn new_draft_now(&self) -> Task {
        self.new_draft(self.scheduler.clock().now())
    }

    /// Task を末尾に追加して alert を登録する。
    ///
    /// title が空なら何もしない。追加したら true。
    pub fn add(&mut self, task: Task, settings: &Settings) -> bool {
        if task.is_draft() {
            debug!(task_id = %task.id, "discarding empty draft");
            return false;
        }
        if self.index.contains_key(&task.id) {
            warn!(task_id = %task.id, "task id already present; ignoring add");
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.scheduler.schedule(
            &task,
            settings.reminder_lead_hours,
            settings.notifications_enabled,
        );
        let id = task.id;
        info!(task_id = %id, title = %task.title, due_at = %task.due_at, "task added");
        self.index.insert(id, seq);
        self.tasks.insert(seq, task);

        self.emit(StoreEvent::Added(id));
        true
    }

    /// 完了フラグを反転する。
    ///
    /// 完了になったら alert を取消す。未完了に戻しても alert は再登録しない
    /// （既知の挙動として維持している）。
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        let Some(task) = self
            .index
            .get(&id)
            .and_then(|seq| self.tasks.get_mut(seq))
        else {
            debug!(task_id = %id, "toggle_complete: task not found");
            return false;
        };

        task.is_completed = !task.is_completed;
        let event = if task.is_completed {
            self.scheduler.cancel(task);
            StoreEvent::Completed(id)
        } else {
            StoreEvent::Reopened(id)
        };
        info!(task_id = %id, is_completed = task.is_completed, "task toggled");

        self.emit(event);
        true
    }

    /// レコードを丸ごと置き換える。
    ///
    /// `id` と `notification_id` は保存済みの値を引き継ぐ。古い alert を取消し、
    /// 新しい期限で登録してから置き換える。完了済みのレコードには登録しない。
    /// title が空のレコードでは置き換えない。
    pub fn update(&mut self, id: TaskId, new_record: Task, settings: &Settings) -> bool {
        let Some(&seq) = self.index.get(&id) else {
            debug!(task_id = %id, "update: task not found");
            return false;
        };
        if new_record.is_draft() {
            debug!(task_id = %id, "update: refusing to blank the title");
            return false;
        }
        let Some(current) = self.tasks.get(&seq) else {
            return false;
        };

        let mut replacement = new_record;
        replacement.id = current.id;
        replacement.notification_id = current.notification_id;

        self.scheduler.cancel(current);
        if !replacement.is_completed {
            self.scheduler.schedule(
                &replacement,
                settings.reminder_lead_hours,
                settings.notifications_enabled,
            );
        }
        info!(task_id = %id, due_at = %replacement.due_at, "task updated");
        self.tasks.insert(seq, replacement);

        self.emit(StoreEvent::Updated(id));
        true
    }

    /// alert を取消してから削除する。
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(seq) = self.index.remove(&id) else {
            debug!(task_id = %id, "delete: task not found");
            return false;
        };
        if let Some(task) = self.tasks.get(&seq) {
            self.scheduler.cancel(task);
        }
        self.tasks.remove(&seq);
        info!(task_id = %id, "task deleted");

        self.emit(StoreEvent::Deleted(id));
        true
    }

    /// 絞り込み・並べ替え済みの一覧（純粋な read view）
    pub fn filtered_sorted(
        &self,
        show_completed: bool,
        category: CategoryFilter,
        sort_by: SortBy,
    ) -> Vec<Task> {
        filter_and_sort(self.tasks.values(), show_completed, category, sort_by)
    }

    /// 設定の表示オプションで `filtered_sorted` を呼ぶ
    pub fn view(&self, settings: &Settings) -> Vec<Task> {
        self.filtered_sorted(
            settings.show_completed_tasks,
            settings.selected_category,
            settings.sort_by,
        )
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).and_then(|seq| self.tasks.get(seq))
    }

    /// 挿入順
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            total: self.tasks.len(),
            completed: self.tasks.values().filter(|t| t.is_completed).count(),
        }
    }

    pub fn subscribe(&mut self, sink: Arc<dyn EventSink>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.sinks.push((id, sink));
        id
    }

    /// 解除できたら true
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sid, _)| *sid != id);
        self.sinks.len() != before
    }

    pub fn scheduler(&self) -> &NotificationScheduler {
        &self.scheduler
    }

    /// 積まれた alert 要求が通知サービスに渡るまで待つ
    pub async fn flush(&self) {
        self.scheduler.flush().await;
    }

    pub async fn shutdown(self) {
        self.scheduler.shutdown().await;
    }

    fn emit(&self, event: StoreEvent) {
        for (_, sink) in &self.sinks {
            sink.emit(&event);
        }
    }
}
