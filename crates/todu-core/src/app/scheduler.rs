//! NotificationScheduler - Task の期限から alert を計算して登録・取消する
//!
//! # alert の状態遷移
//! - Unscheduled → Scheduled: `add` / `update`
//! - Scheduled → Canceled: `delete`、完了への toggle、`update`（取消してから再登録）
//!
//! 登録と取消は PublisherLoop 経由の fire-and-forget です。
//! 呼び出し側は結果を待たず、失敗は Task Store に影響しません。

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::runtime::Handle;
use tracing::debug;

use super::publisher_loop::{AlertCommand, PublisherLoop};
use crate::domain::alert::{AlertId, AlertRequest, AlertTemplate};
use crate::domain::task::Task;
use crate::ports::{Clock, NotificationService};

/// `task` に対して登録すべき alert を計算する（副作用なし）
///
/// - 通知が無効なら空
/// - reminder は `due_at - lead_hours` が `now` より厳密に未来のときだけ
/// - 期限の alert は過去でも常に含める（発火するかは通知サービス次第）
pub fn plan_alerts(
    template: &AlertTemplate,
    task: &Task,
    reminder_lead_hours: u32,
    notifications_enabled: bool,
    now: DateTime<Utc>,
) -> Vec<AlertRequest> {
    let mut alerts = Vec::with_capacity(2);
    if !notifications_enabled {
        return alerts;
    }

    let body = template.render_body(&task.title);
    let reminder_at = task
        .due_at
        .checked_sub_signed(Duration::hours(i64::from(reminder_lead_hours)));

    if let Some(reminder_at) = reminder_at
        && reminder_at > now
    {
        alerts.push(AlertRequest {
            id: AlertId::reminder(task.notification_id),
            fire_at: reminder_at,
            title: template.title.clone(),
            body: body.clone(),
        });
    }

    alerts.push(AlertRequest {
        id: AlertId::due(task.notification_id),
        fire_at: task.due_at,
        title: template.title.clone(),
        body,
    });

    alerts
}

pub struct NotificationScheduler {
    clock: Arc<dyn Clock>,
    template: AlertTemplate,
    publisher: PublisherLoop,
}

impl NotificationScheduler {
    /// `runtime` 上で PublisherLoop を起動して Scheduler を作る
    pub fn spawn(
        runtime: &Handle,
        service: Arc<dyn NotificationService>,
        clock: Arc<dyn Clock>,
        template: AlertTemplate,
    ) -> Self {
        Self {
            clock,
            template,
            publisher: PublisherLoop::spawn(runtime, service),
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn template(&self) -> &AlertTemplate {
        &self.template
    }

    pub fn plan(
        &self,
        task: &Task,
        reminder_lead_hours: u32,
        notifications_enabled: bool,
    ) -> Vec<AlertRequest> {
        plan_alerts(
            &self.template,
            task,
            reminder_lead_hours,
            notifications_enabled,
            self.clock.now(),
        )
    }

    /// alert を計算して登録要求を積む。積んだ件数を返す。
    pub fn schedule(
        &self,
        task: &Task,
        reminder_lead_hours: u32,
        notifications_enabled: bool,
    ) -> usize {
        let alerts = self.plan(task, reminder_lead_hours, notifications_enabled);
        debug!(
            task_id = %task.id,
            notification_id = %task.notification_id,
            due_at = %task.due_at,
            reminder_lead_hours,
            alerts = alerts.len(),
            "scheduling alerts"
        );
        let count = alerts.len();
        for alert in alerts {
            self.publisher.submit(AlertCommand::Register(alert));
        }
        count
    }

    /// 両方の alert id の取消要求を積む（冪等）
    pub fn cancel(&self, task: &Task) {
        debug!(
            task_id = %task.id,
            notification_id = %task.notification_id,
            "canceling alerts"
        );
        self.publisher.submit(AlertCommand::Cancel(task.alert_ids()));
    }

    /// ここまでに積んだ要求が通知サービスに渡るまで待つ
    pub async fn flush(&self) {
        self.publisher.flush().await;
    }

    pub async fn shutdown(self) {
        self.publisher.shutdown_and_join().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{NotificationId, TaskId};
    use crate::impls::{InMemoryNotificationService, NotifierCall};
    use crate::ports::FixedClock;
    use chrono::TimeZone;
    use rstest::rstest;
    use ulid::Ulid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 9, 9, 0, 0).unwrap()
    }

    fn task_due_in(hours: i64) -> Task {
        Task::new(
            TaskId::from_ulid(Ulid::new()),
            NotificationId::from_ulid(Ulid::new()),
            "buy milk",
            now() + Duration::hours(hours),
        )
    }

    #[test]
    fn far_due_date_gets_reminder_and_due_alert() {
        let task = task_due_in(5);
        let alerts = plan_alerts(&AlertTemplate::default(), &task, 2, true, now());

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].id, task.reminder_alert_id());
        assert_eq!(alerts[0].fire_at, now() + Duration::hours(3));
        assert_eq!(alerts[1].id, task.due_alert_id());
        assert_eq!(alerts[1].fire_at, now() + Duration::hours(5));
    }

    #[test]
    fn past_reminder_is_skipped() {
        let task = task_due_in(1);
        let alerts = plan_alerts(&AlertTemplate::default(), &task, 2, true, now());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, task.due_alert_id());
        assert_eq!(alerts[0].fire_at, now() + Duration::hours(1));
    }

    #[test]
    fn reminder_exactly_now_is_skipped() {
        let task = task_due_in(2);
        let alerts = plan_alerts(&AlertTemplate::default(), &task, 2, true, now());
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn overdue_task_still_gets_due_alert() {
        let task = task_due_in(-3);
        let alerts = plan_alerts(&AlertTemplate::default(), &task, 2, true, now());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].fire_at, now() - Duration::hours(3));
    }

    #[rstest]
    #[case::one_hour(1, 6, Some(5))]
    #[case::five_hours(5, 6, Some(1))]
    #[case::five_hours_exactly_now(5, 5, None)]
    #[case::full_day(24, 30, Some(6))]
    #[case::full_day_too_late(24, 6, None)]
    fn reminder_follows_lead_time(
        #[case] lead_hours: u32,
        #[case] due_in: i64,
        #[case] reminder_in: Option<i64>,
    ) {
        let task = task_due_in(due_in);
        let alerts = plan_alerts(&AlertTemplate::default(), &task, lead_hours, true, now());

        let reminder = alerts.iter().find(|a| a.id.is_reminder()).map(|a| a.fire_at);
        assert_eq!(reminder, reminder_in.map(|h| now() + Duration::hours(h)));
        assert_eq!(alerts.last().unwrap().fire_at, task.due_at);
        assert_eq!(alerts.len(), if reminder_in.is_some() { 2 } else { 1 });
    }

    #[rstest]
    #[case::due_soon(1)]
    #[case::due_later(48)]
    fn disabled_notifications_plan_nothing(#[case] hours: i64) {
        let task = task_due_in(hours);
        assert!(plan_alerts(&AlertTemplate::default(), &task, 2, false, now()).is_empty());
    }

    #[test]
    fn both_alerts_share_the_template() {
        let task = task_due_in(10);
        let alerts = plan_alerts(&AlertTemplate::default(), &task, 2, true, now());

        assert!(alerts.iter().all(|a| a.title == "To-do reminder"));
        assert!(alerts.iter().all(|a| a.body.contains("\"buy milk\"")));
    }

    #[tokio::test]
    async fn schedule_and_cancel_reach_the_service() {
        let service = InMemoryNotificationService::new();
        let scheduler = NotificationScheduler::spawn(
            &Handle::current(),
            Arc::new(service.clone()),
            Arc::new(FixedClock::new(now())),
            AlertTemplate::default(),
        );
        let task = task_due_in(5);

        assert_eq!(scheduler.schedule(&task, 2, true), 2);
        scheduler.flush().await;
        assert_eq!(service.pending().len(), 2);

        scheduler.cancel(&task);
        scheduler.flush().await;
        assert!(service.pending().is_empty());

        let last = service.calls().pop().unwrap();
        assert_eq!(last, NotifierCall::CancelAll(task.alert_ids()));

        scheduler.shutdown().await;
    }

    #[tokio::test]
    async fn cancel_without_schedule_is_harmless() {
        let service = InMemoryNotificationService::new();
        let scheduler = NotificationScheduler::spawn(
            &Handle::current(),
            Arc::new(service.clone()),
            Arc::new(FixedClock::new(now())),
            AlertTemplate::default(),
        );
        let task = task_due_in(5);

        scheduler.cancel(&task);
        scheduler.cancel(&task);
        scheduler.flush().await;

        assert!(service.pending().is_empty());
        assert_eq!(service.calls().len(), 2);
    }

    #[tokio::test]
    async fn service_failure_does_not_stop_the_publisher() {
        let service = InMemoryNotificationService::new();
        service.set_authorized(false);
        let scheduler = NotificationScheduler::spawn(
            &Handle::current(),
            Arc::new(service.clone()),
            Arc::new(FixedClock::new(now())),
            AlertTemplate::default(),
        );

        scheduler.schedule(&task_due_in(5), 2, true);
        scheduler.flush().await;
        assert!(service.pending().is_empty());

        service.set_authorized(true);
        scheduler.schedule(&task_due_in(6), 2, true);
        scheduler.flush().await;
        assert_eq!(service.pending().len(), 2);
    }
}
