use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::todo_response::TodoResponse;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Creation day (UTC) → todos created that day, newest first.
    pub timeline: BTreeMap<NaiveDate, Vec<TodoResponse>>,
    pub stats: AnalyticsStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub total_todos: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage with one decimal; 0 for an empty window.
    pub completion_rate: f64,
}

/// `period_days` days before `now`, keeping the time of day. Periods that
/// run off the calendar start at the earliest representable instant.
pub fn window_start(now: DateTime<Utc>, period_days: u64) -> DateTime<Utc> {
    now.checked_sub_days(Days::new(period_days))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Bucket the todos `user_id` created or was assigned, created within the
/// trailing window, by creation day. `todos` must be newest first.
pub fn build_analytics(
    user_id: Uuid,
    todos: Vec<TodoResponse>,
    period_days: u64,
    now: DateTime<Utc>,
) -> Analytics {
    let since = window_start(now, period_days);

    let mut timeline: BTreeMap<NaiveDate, Vec<TodoResponse>> = BTreeMap::new();
    let mut stats = AnalyticsStats::default();

    for todo in todos {
        let involved = todo.created_by.id == user_id || todo.assigned_to.id == user_id;
        if !involved || todo.created_at < since {
            continue;
        }

        stats.total_todos += 1;
        if todo.status.is_completed() {
            stats.completed += 1;
        }
        timeline.entry(todo.created_at.date_naive()).or_default().push(todo);
    }

    stats.pending = stats.total_todos - stats.completed;
    stats.completion_rate = completion_rate(stats.completed, stats.total_todos);

    Analytics { timeline, stats }
}

pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (completed as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::view_at;
    use crate::todo_status::TodoStatus;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-11T15:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn completion_rate_rounds_to_one_decimal() {
        assert_eq!(completion_rate(0, 0), 0.0);
        assert_eq!(completion_rate(1, 3), 33.3);
        assert_eq!(completion_rate(2, 3), 66.7);
        assert_eq!(completion_rate(3, 3), 100.0);
    }

    #[test]
    fn window_keeps_time_of_day() {
        assert_eq!(window_start(now(), 0), now());
        assert_eq!(window_start(now(), 30).to_rfc3339(), "2026-01-12T15:30:00+00:00");
        assert_eq!(window_start(now(), u64::MAX), DateTime::<Utc>::MIN_UTC);
        assert_eq!(window_start(now(), 5_000_000_000), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn todo_just_past_the_period_is_excluded() {
        let me = Uuid::from_u128(1);
        let cutoff = now() - Duration::days(30);
        let todos = vec![
            view_at("Inside", me, me, TodoStatus::Pending, cutoff + Duration::minutes(1)),
            view_at("Same day, too early", me, me, TodoStatus::Pending, cutoff - Duration::hours(10)),
        ];

        let analytics = build_analytics(me, todos, 30, now());
        assert_eq!(analytics.stats.total_todos, 1);
        assert_eq!(analytics.timeline[&day("2026-01-12")][0].title, "Inside");
    }

    #[test]
    fn period_zero_keeps_only_todos_from_now_on() {
        let me = Uuid::from_u128(1);
        let todos = vec![
            view_at("Right now", me, me, TodoStatus::Completed, now()),
            view_at("Earlier today", me, me, TodoStatus::Pending, now() - Duration::hours(1)),
        ];

        let analytics = build_analytics(me, todos, 0, now());
        assert_eq!(analytics.stats.total_todos, 1);
        assert_eq!(analytics.timeline[&day("2026-02-11")][0].title, "Right now");
        assert_eq!(analytics.stats.completion_rate, 100.0);
    }

    #[test]
    fn huge_period_includes_everything() {
        let me = Uuid::from_u128(1);
        let ancient = now() - Duration::days(20_000);
        let todos = vec![view_at("Ancient", me, me, TodoStatus::Pending, ancient)];

        let analytics = build_analytics(me, todos, u64::MAX, now());
        assert_eq!(analytics.stats.total_todos, 1);
    }

    #[test]
    fn groups_by_day_and_keeps_order() {
        let me = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);
        let todos = vec![
            view_at("b2", me, other, TodoStatus::Pending, now() - Duration::days(1)),
            view_at("b1", other, me, TodoStatus::Completed, now() - Duration::days(1) - Duration::hours(1)),
            view_at("a1", me, me, TodoStatus::Pending, now() - Duration::days(3)),
            view_at("unrelated", other, other, TodoStatus::Completed, now() - Duration::days(1)),
            view_at("too old", me, me, TodoStatus::Completed, now() - Duration::days(40)),
        ];

        let analytics = build_analytics(me, todos, 30, now());
        let titles: Vec<_> = analytics.timeline[&day("2026-02-10")]
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, ["b2", "b1"]);
        assert_eq!(analytics.timeline[&day("2026-02-08")].len(), 1);
        assert_eq!(
            analytics.stats,
            AnalyticsStats { total_todos: 3, completed: 1, pending: 2, completion_rate: 33.3 }
        );
    }

    #[test]
    fn empty_window_has_zero_rate() {
        let analytics = build_analytics(Uuid::nil(), Vec::new(), 0, now());
        assert!(analytics.timeline.is_empty());
        assert_eq!(analytics.stats.completion_rate, 0.0);
    }

    #[test]
    fn timeline_serializes_with_iso_date_keys() {
        let me = Uuid::from_u128(1);
        let todos = vec![view_at("x", me, me, TodoStatus::Pending, now())];
        let json = serde_json::to_value(build_analytics(me, todos, 30, now())).unwrap();
        assert!(json["timeline"]["2026-02-11"].is_array());
        assert_eq!(json["stats"]["completionRate"], 0.0);
    }
}
