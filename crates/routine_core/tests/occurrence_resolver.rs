use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use routine_core::schedule::weekday_task_counts;
use routine_core::{
    agenda_for_date, classify, list_agenda, resolve, upcoming_within_window, CalendarError,
    Classification, NewTask, Priority, RecurringTask, DEFAULT_LOOKAHEAD_MINUTES,
};

fn task(title: &str, time: &str, days: &[u8]) -> RecurringTask {
    RecurringTask::create(&NewTask {
        title: title.to_string(),
        description: None,
        time: time.to_string(),
        duration_minutes: 15,
        priority: Priority::Medium,
        days_of_week: days.to_vec(),
    })
    .unwrap()
}

// Wednesday.
fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn resolve_applies_time_to_date_with_zero_seconds() {
    let run = task("Run", "06:45", &[3]);
    let scheduled = resolve(&run, wednesday());
    assert_eq!(scheduled, at(wednesday(), 6, 45));
    assert_eq!(resolve(&run, wednesday()), scheduled);
}

#[test]
fn resolve_does_not_filter_by_weekday() {
    let run = task("Run", "06:45", &[3]);
    let thursday = wednesday().succ_opt().unwrap();
    assert_eq!(resolve(&run, thursday), at(thursday, 6, 45));
}

#[test]
fn weekday_filter_matches_only_listed_days_over_two_weeks() {
    let tasks = vec![task("Gym", "18:00", &[1, 3, 5])];
    let start = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

    for offset in 0..21 {
        let date = start.checked_add_days(Days::new(offset)).unwrap();
        let weekday = date.weekday().num_days_from_sunday();
        let agenda = agenda_for_date(&tasks, date);
        assert_eq!(
            agenda.len() == 1,
            matches!(weekday, 1 | 3 | 5),
            "unexpected agenda on {date}"
        );
    }
}

#[test]
fn classification_boundaries_at_nine() {
    let reference = at(wednesday(), 9, 0);
    let window = DEFAULT_LOOKAHEAD_MINUTES;

    assert_eq!(classify(at(wednesday(), 9, 0), reference, window), Classification::DueNow);
    assert_eq!(classify(at(wednesday(), 8, 59), reference, window), Classification::Past);
    assert_eq!(
        classify(at(wednesday(), 10, 59), reference, window),
        Classification::Upcoming { minutes_until: 119 }
    );
    assert_eq!(
        classify(at(wednesday(), 11, 1), reference, window),
        Classification::FarFuture
    );
}

#[test]
fn agenda_sorts_by_time_and_keeps_creation_order_for_ties() {
    let tasks = vec![
        task("Late", "21:00", &[3]),
        task("Tie A", "07:30", &[3]),
        task("Early", "06:00", &[3]),
        task("Tie B", "07:30", &[3]),
        task("Other day", "05:00", &[4]),
    ];

    let titles: Vec<&str> = agenda_for_date(&tasks, wednesday())
        .iter()
        .map(|entry| entry.task.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Early", "Tie A", "Tie B", "Late"]);

    // Repeated calls keep the same order.
    let again: Vec<&str> = agenda_for_date(&tasks, wednesday())
        .iter()
        .map(|entry| entry.task.title.as_str())
        .collect();
    assert_eq!(titles, again);
}

#[test]
fn list_agenda_projects_onto_the_week_of_the_reference_date() {
    let tasks = vec![task("Weekend", "10:00", &[6])];

    let agenda = list_agenda(&tasks, 6, wednesday()).unwrap();
    assert_eq!(agenda.len(), 1);
    assert_eq!(
        agenda[0].scheduled,
        at(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(), 10, 0)
    );

    assert!(list_agenda(&tasks, 2, wednesday()).unwrap().is_empty());
}

#[test]
fn list_agenda_rejects_out_of_range_day_index() {
    let tasks = vec![task("Any", "10:00", &[0])];
    assert_eq!(
        list_agenda(&tasks, 7, wednesday()).unwrap_err(),
        CalendarError::InvalidDayIndex(7)
    );
}

#[test]
fn list_agenda_reports_projection_past_calendar_edge() {
    let tasks = vec![task("Any", "10:00", &[0, 1, 2, 3, 4, 5, 6])];
    let last = NaiveDate::MAX;
    let first = NaiveDate::MIN;
    let last_index = last.weekday().num_days_from_sunday() as u8;
    let first_index = first.weekday().num_days_from_sunday() as u8;

    if last_index < 6 {
        let err = list_agenda(&tasks, last_index + 1, last).unwrap_err();
        assert!(matches!(err, CalendarError::DateOutOfRange { .. }));
    }
    if let Some(earlier) = first_index.checked_sub(1) {
        let err = list_agenda(&tasks, earlier, first).unwrap_err();
        assert!(matches!(err, CalendarError::DateOutOfRange { .. }));
    }
    assert_eq!(list_agenda(&tasks, last_index, last).unwrap().len(), 1);
}

#[test]
fn upcoming_window_measures_gap_from_reference_seconds() {
    let tasks = vec![task("Soon", "09:10", &[3]), task("Edge", "11:00", &[3])];
    let agenda = agenda_for_date(&tasks, wednesday());

    let reference = wednesday().and_hms_opt(9, 0, 50).unwrap();
    let found: Vec<(&str, i64)> = upcoming_within_window(&agenda, reference, 120)
        .iter()
        .map(|entry| (entry.task.title.as_str(), entry.minutes_until))
        .collect();
    assert_eq!(found, vec![("Soon", 9), ("Edge", 119)]);

    let reference = wednesday().and_hms_opt(9, 0, 30).unwrap();
    assert_eq!(
        classify(at(wednesday(), 11, 0), reference, 120),
        Classification::Upcoming { minutes_until: 120 }
    );
}

#[test]
fn upcoming_window_keeps_only_upcoming_sorted_by_minutes() {
    let tasks = vec![
        task("Past", "08:00", &[3]),
        task("Now", "09:00", &[3]),
        task("Later", "10:30", &[3]),
        task("Soon", "09:10", &[3]),
        task("Far", "12:00", &[3]),
    ];
    let agenda = agenda_for_date(&tasks, wednesday());

    let upcoming = upcoming_within_window(&agenda, at(wednesday(), 9, 0), 120);
    let found: Vec<(&str, i64)> = upcoming
        .iter()
        .map(|entry| (entry.task.title.as_str(), entry.minutes_until))
        .collect();
    assert_eq!(found, vec![("Soon", 10), ("Later", 90)]);

    let narrow = upcoming_within_window(&agenda, at(wednesday(), 9, 0), 30);
    assert_eq!(narrow.len(), 1);
}

#[test]
fn weekday_counts_cover_every_day() {
    let tasks = vec![
        task("Daily", "07:00", &[0, 1, 2, 3, 4, 5, 6]),
        task("Weekdays", "08:00", &[1, 2, 3, 4, 5]),
    ];
    assert_eq!(weekday_task_counts(&tasks), [1, 2, 2, 2, 2, 2, 1]);
}
