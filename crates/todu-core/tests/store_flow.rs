use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use todu_core::app::{CategoryFilter, Settings, SortBy, TaskStore, TaskStoreBuilder};
use todu_core::domain::{AlertId, Category, Priority, Task};
use todu_core::impls::{InMemoryNotificationService, NotifierCall};
use todu_core::ports::FixedClock;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 9, 9, 0, 0).unwrap()
}

fn setup() -> (TaskStore, InMemoryNotificationService) {
    let service = InMemoryNotificationService::new();
    let store = TaskStoreBuilder::new()
        .notification_service(Arc::new(service.clone()))
        .clock(Arc::new(FixedClock::new(now())))
        .build()
        .unwrap();
    (store, service)
}

fn task(store: &TaskStore, title: &str, due_in_hours: i64) -> Task {
    let mut task = store.new_draft(now() + Duration::hours(due_in_hours));
    task.title = title.to_string();
    task
}

fn registered(calls: &[NotifierCall]) -> Vec<(AlertId, DateTime<Utc>)> {
    calls
        .iter()
        .filter_map(|call| match call {
            NotifierCall::Register(alert) => Some((alert.id.clone(), alert.fire_at)),
            NotifierCall::CancelAll(_) => None,
        })
        .collect()
}

#[tokio::test]
async fn due_in_five_hours_registers_reminder_and_due_alert() {
    let (mut store, service) = setup();
    let t = task(&store, "submit form", 5);
    let reminder = t.reminder_alert_id();
    let due = t.due_alert_id();

    store.add(t, &Settings::default());
    store.flush().await;

    assert_eq!(
        registered(&service.calls()),
        vec![
            (reminder, now() + Duration::hours(3)),
            (due, now() + Duration::hours(5)),
        ]
    );
}

#[tokio::test]
async fn due_in_one_hour_registers_only_due_alert() {
    let (mut store, service) = setup();
    let t = task(&store, "call back", 1);
    let due = t.due_alert_id();

    store.add(t, &Settings::default());
    store.flush().await;

    assert_eq!(
        registered(&service.calls()),
        vec![(due, now() + Duration::hours(1))]
    );
}

#[tokio::test]
async fn update_cancels_old_alerts_before_registering_new_ones() {
    let (mut store, service) = setup();
    let t = task(&store, "dentist", 5);
    let id = t.id;
    let old_ids = t.alert_ids();
    store.add(t.clone(), &Settings::default());
    store.flush().await;
    service.clear_calls();

    let mut moved = t;
    moved.due_at = now() + Duration::hours(12);
    store.update(id, moved, &Settings::default());
    store.flush().await;

    let calls = service.calls();
    assert_eq!(calls[0], NotifierCall::CancelAll(old_ids));
    let fire_times: Vec<_> = registered(&calls[1..]).into_iter().map(|(_, at)| at).collect();
    assert_eq!(
        fire_times,
        vec![now() + Duration::hours(10), now() + Duration::hours(12)]
    );
    // 同じ notification id を使い回すので pending は 2 件のまま
    assert_eq!(service.pending().len(), 2);
}

#[tokio::test]
async fn delete_cancels_both_alert_ids() {
    let (mut store, service) = setup();
    let t = task(&store, "temp", 5);
    let id = t.id;
    let expected = t.alert_ids();
    store.add(t, &Settings::default());

    store.delete(id);
    store.flush().await;

    assert!(store.is_empty());
    assert!(service.pending().is_empty());
    assert_eq!(
        service.calls().last(),
        Some(&NotifierCall::CancelAll(expected))
    );
}

#[tokio::test]
async fn toggle_twice_restores_completion_state() {
    let (mut store, _) = setup();
    let t = task(&store, "flip", 5);
    let id = t.id;
    store.add(t, &Settings::default());

    store.toggle_complete(id);
    store.toggle_complete(id);

    assert!(!store.get(id).unwrap().is_completed);
}

#[tokio::test]
async fn category_filter_keeps_insertion_order_for_unknown_sort() {
    let (mut store, _) = setup();
    let first = task(&store, "first", 9).with_category(Category::Work);
    let middle = task(&store, "middle", 1).with_category(Category::Study);
    let last = task(&store, "last", 3).with_category(Category::Work);
    for t in [first, middle, last] {
        store.add(t, &Settings::default());
    }

    let sort_by: SortBy = "whatever".parse().unwrap();
    let view = store.filtered_sorted(true, CategoryFilter::Only(Category::Work), sort_by);

    let titles: Vec<_> = view.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "last"]);
}

#[tokio::test]
async fn sorted_views_are_monotonic_and_hide_completed() {
    let (mut store, _) = setup();
    let specs = [
        ("a", 7, Priority::Low),
        ("b", 2, Priority::High),
        ("c", 5, Priority::Medium),
        ("d", 1, Priority::Low),
        ("e", 3, Priority::High),
    ];
    let mut ids = Vec::new();
    for (title, hours, priority) in specs {
        let t = task(&store, title, hours).with_priority(priority);
        ids.push(t.id);
        store.add(t, &Settings::default());
    }
    store.toggle_complete(ids[1]);

    let by_date = store.filtered_sorted(true, CategoryFilter::All, SortBy::Date);
    assert!(by_date.windows(2).all(|w| w[0].due_at <= w[1].due_at));

    let by_priority = store.filtered_sorted(true, CategoryFilter::All, SortBy::Priority);
    assert!(by_priority.windows(2).all(|w| w[0].priority >= w[1].priority));

    let open_only = store.filtered_sorted(false, CategoryFilter::All, SortBy::Date);
    assert_eq!(open_only.len(), 4);
    assert!(open_only.iter().all(|t| !t.is_completed));
}

#[tokio::test]
async fn permission_denied_leaves_store_authoritative() {
    let (mut store, service) = setup();
    service.set_authorized(false);

    let t = task(&store, "still here", 5);
    let id = t.id;
    assert!(store.add(t, &Settings::default()));
    store.flush().await;

    assert!(store.get(id).is_some());
    assert!(service.pending().is_empty());

    store.shutdown().await;
}

#[tokio::test]
async fn lead_time_setting_moves_the_reminder() {
    let (mut store, service) = setup();
    let settings = Settings {
        reminder_lead_hours: 24,
        ..Settings::default()
    };
    let t = task(&store, "renew passport", 30);
    let reminder = t.reminder_alert_id();
    let due = t.due_alert_id();

    store.add(t, &settings);
    store.flush().await;

    assert_eq!(
        registered(&service.calls()),
        vec![
            (reminder, now() + Duration::hours(6)),
            (due, now() + Duration::hours(30)),
        ]
    );
}
