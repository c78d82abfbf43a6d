use chrono::{NaiveDate, NaiveDateTime};
use routine_core::{
    Classification, EngineConfig, NewTask, OccurrenceStatus, Priority, RecurringTask,
    RoutineState, TaskValidationError,
};

fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
}

fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    day0().and_hms_opt(hour, minute, second).unwrap()
}

fn new_task(title: &str, time: &str, days: &[u8]) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: None,
        time: time.to_string(),
        duration_minutes: 30,
        priority: Priority::High,
        days_of_week: days.to_vec(),
    }
}

#[test]
fn hydrate_scenario() {
    let mut state = RoutineState::default();
    let hydrate = state
        .add_task(&NewTask {
            title: "Hydrate".to_string(),
            description: None,
            time: "08:00".to_string(),
            duration_minutes: 5,
            priority: Priority::Low,
            days_of_week: (0..=6).collect(),
        })
        .unwrap();

    let reference = at(8, 0, 30);
    let agenda = state.agenda_for_date(reference.date());
    assert_eq!(agenda.len(), 1);
    assert_eq!(
        state.classify_occurrence(agenda[0].scheduled, reference),
        Classification::DueNow
    );

    assert_eq!(state.current_streak(reference), 0);
    assert!(state.toggle_completion(hydrate, day0()));
    assert!(state.is_completed(hydrate, day0()));
    assert_eq!(state.current_streak(reference), 1);

    assert!(state.delete_task(hydrate));
    assert!(state.agenda_for_date(day0()).is_empty());
    assert!(state.list_agenda(3, day0()).unwrap().is_empty());
    assert!(state.is_completed(hydrate, day0()));
    assert_eq!(state.current_streak(reference), 1);
}

#[test]
fn add_task_rejects_invalid_definition_without_mutating() {
    let mut state = RoutineState::default();
    let err = state.add_task(&new_task("Read", "25:00", &[1])).unwrap_err();
    assert!(matches!(err, TaskValidationError::InvalidTimeOfDay(_)));
    assert!(state.tasks().is_empty());
}

#[test]
fn insert_task_rejects_duplicate_id() {
    let mut state = RoutineState::default();
    let id = state.add_task(&new_task("Read", "21:00", &[3])).unwrap();
    let copy = RecurringTask::with_id(id, &new_task("Copy", "07:00", &[3])).unwrap();

    let err = state.insert_task(copy).unwrap_err();
    assert_eq!(err, TaskValidationError::DuplicateId(id));
    assert_eq!(state.tasks().len(), 1);
    assert_eq!(state.agenda_for_date(day0()).len(), 1);
}

#[test]
fn delete_unknown_task_is_noop() {
    let mut state = RoutineState::default();
    state.add_task(&new_task("Read", "21:00", &[3])).unwrap();
    assert!(!state.delete_task(uuid::Uuid::new_v4()));
    assert_eq!(state.tasks().len(), 1);
}

#[test]
fn toggling_orphan_id_is_tolerated() {
    let mut state = RoutineState::default();
    let orphan = uuid::Uuid::new_v4();
    assert!(state.toggle_completion(orphan, day0()));
    assert!(state.is_completed(orphan, day0()));
    assert_eq!(state.current_streak(at(9, 0, 0)), 1);
}

#[test]
fn today_view_reports_status_per_row() {
    let mut state = RoutineState::default();
    let done = state.add_task(&new_task("Done", "07:00", &[3])).unwrap();
    state.add_task(&new_task("Missed", "08:00", &[3])).unwrap();
    state.add_task(&new_task("Due", "09:00", &[3])).unwrap();
    state.add_task(&new_task("Soon", "09:30", &[3])).unwrap();
    state.add_task(&new_task("Later", "13:00", &[3])).unwrap();
    state.toggle_completion(done, day0());

    let rows: Vec<(String, OccurrenceStatus, bool)> = state
        .today(at(9, 0, 10))
        .into_iter()
        .map(|item| (item.task.title.clone(), item.status, item.is_imminent))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Done".to_string(), OccurrenceStatus::Done, false),
            ("Missed".to_string(), OccurrenceStatus::Missed, false),
            ("Due".to_string(), OccurrenceStatus::DueNow, true),
            ("Soon".to_string(), OccurrenceStatus::StartsIn { minutes: 30 }, true),
            ("Later".to_string(), OccurrenceStatus::StartsIn { minutes: 240 }, false),
        ]
    );
}

#[test]
fn day_summary_counts_only_todays_agenda() {
    let mut state = RoutineState::default();
    let a = state.add_task(&new_task("A", "07:00", &[3])).unwrap();
    state.add_task(&new_task("B", "08:00", &[3])).unwrap();
    state.add_task(&new_task("C", "09:00", &[3])).unwrap();
    let other = state.add_task(&new_task("Thursday", "09:00", &[4])).unwrap();

    state.toggle_completion(a, day0());
    // Completed but not on today's agenda; it still feeds the streak.
    state.toggle_completion(other, day0());

    let summary = state.day_summary(at(10, 0, 0));
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.completion_percent, 33);
    assert_eq!(summary.streak, 1);
}

#[test]
fn empty_day_summary_is_zero() {
    let state = RoutineState::default();
    let summary = state.day_summary(at(10, 0, 0));
    assert_eq!(summary.total, 0);
    assert_eq!(summary.completion_percent, 0);
    assert_eq!(summary.streak, 0);
}

#[test]
fn upcoming_uses_configured_window() {
    let config = EngineConfig {
        lookahead_minutes: 60,
        ..EngineConfig::default()
    };
    let mut state = RoutineState::new(config);
    state.add_task(&new_task("Soon", "09:45", &[3])).unwrap();
    state.add_task(&new_task("Beyond", "10:30", &[3])).unwrap();

    let upcoming = state.upcoming(at(9, 0, 0));
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].task.title, "Soon");
    assert_eq!(upcoming[0].minutes_until, 45);
}

#[test]
fn upcoming_rounds_gap_from_reference_with_seconds() {
    let mut state = RoutineState::default();
    state.add_task(&new_task("Soon", "09:10", &[3])).unwrap();
    state.add_task(&new_task("Edge", "11:00", &[3])).unwrap();

    let found: Vec<(String, i64)> = state
        .upcoming(at(9, 0, 30))
        .into_iter()
        .map(|entry| (entry.task.title.clone(), entry.minutes_until))
        .collect();
    assert_eq!(
        found,
        vec![("Soon".to_string(), 10), ("Edge".to_string(), 120)]
    );

    let statuses: Vec<OccurrenceStatus> = state
        .today(at(9, 0, 50))
        .into_iter()
        .map(|item| item.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            OccurrenceStatus::StartsIn { minutes: 9 },
            OccurrenceStatus::StartsIn { minutes: 119 },
        ]
    );
}

#[test]
fn weekday_counts_follow_task_set() {
    let mut state = RoutineState::default();
    let weekdays = state.add_task(&NewTask::new("Standup")).unwrap();
    assert_eq!(state.weekday_task_counts(), [0, 1, 1, 1, 1, 1, 0]);
    assert_eq!(state.task_count_on(routine_core::DayIndex::MONDAY), 1);

    state.delete_task(weekdays);
    assert_eq!(state.weekday_task_counts(), [0; 7]);
}
