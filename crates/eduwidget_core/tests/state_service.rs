use chrono::{NaiveDate, NaiveTime};
use eduwidget_core::{
    last_stuck_text, open_store_in_memory, CourseType, Moment, ServiceError, SqliteKeyValueStore,
    StateRepository, StateService, TimeRange, UserMode, DEFAULT_CLASS_GROUP_ID,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> StateService<SqliteKeyValueStore<'_>> {
    StateService::new(StateRepository::new(SqliteKeyValueStore::new(conn)))
}

fn monday_morning() -> Moment {
    Moment::new(
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    )
}

#[test]
fn set_mode_persists() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    service.set_mode(UserMode::Teacher).unwrap();
    assert_eq!(
        service.repository().get_state().mode,
        Some(UserMode::Teacher)
    );
}

#[test]
fn add_class_group_appends_and_selects_it() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    let id = service.add_class_group("  7/D  ").unwrap();

    let state = service.repository().get_state();
    assert_eq!(state.class_groups.len(), 2);
    let added = state.class_groups.iter().find(|g| g.id == id).unwrap();
    assert_eq!(added.label, "7/D");
    assert_eq!(state.selected_class_group_id.as_deref(), Some(id.as_str()));
}

#[test]
fn blank_class_group_label_is_rejected() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    assert!(matches!(
        service.add_class_group("   "),
        Err(ServiceError::EmptyLabel)
    ));
}

#[test]
fn select_class_group_requires_a_known_id() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    let id = service.add_class_group("7/D").unwrap();
    service.select_class_group(DEFAULT_CLASS_GROUP_ID).unwrap();
    assert_eq!(
        service.repository().get_state().selected_class_group_id.as_deref(),
        Some(DEFAULT_CLASS_GROUP_ID)
    );
    service.select_class_group(&id).unwrap();

    assert!(matches!(
        service.select_class_group("cg-gone"),
        Err(ServiceError::ClassGroupNotFound(_))
    ));
}

#[test]
fn add_course_attaches_to_the_selected_class() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    let group = service.add_class_group("7/D").unwrap();
    let course = service
        .add_course("Biology", CourseType::Lesson, Some("  bring atlas  "))
        .unwrap();

    let state = service.repository().get_state();
    let added = state.courses.iter().find(|c| c.id == course).unwrap();
    assert_eq!(added.class_group_id, group);
    assert_eq!(added.title, "Biology");
    assert_eq!(added.default_note.as_deref(), Some("bring atlas"));

    assert!(matches!(
        service.add_course("  ", CourseType::Lesson, None),
        Err(ServiceError::EmptyTitle)
    ));
}

#[test]
fn assigning_an_occupied_cell_replaces_instead_of_duplicating() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    let math = service.add_course("Math", CourseType::Lesson, None).unwrap();
    let before = service.repository().get_state().schedule_items.len();

    // The empty state's demo item occupies (Monday, slot 1).
    let occupant = service.assign_course_to_slot(0, 1, &math).unwrap();

    let state = service.repository().get_state();
    assert_eq!(state.schedule_items.len(), before);
    assert_eq!(occupant, "sched-demo-1");
    let item = state
        .schedule_items
        .iter()
        .find(|i| i.id == occupant)
        .unwrap();
    assert_eq!(item.course_id, math);

    // A free cell grows the schedule by one.
    service.assign_course_to_slot(0, 2, &math).unwrap();
    assert_eq!(
        service.repository().get_state().schedule_items.len(),
        before + 1
    );
}

#[test]
fn assign_validates_day_and_course() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    let math = service.add_course("Math", CourseType::Lesson, None).unwrap();

    assert!(matches!(
        service.assign_course_to_slot(7, 1, &math),
        Err(ServiceError::InvalidDayIndex(7))
    ));
    assert!(matches!(
        service.assign_course_to_slot(0, 1, "course-gone"),
        Err(ServiceError::CourseNotFound(_))
    ));
}

#[test]
fn clear_slot_removes_only_the_selected_class_cell() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    let math = service.add_course("Math", CourseType::Lesson, None).unwrap();
    service.assign_course_to_slot(1, 3, &math).unwrap();

    // Another class keeps its own (1, 3) cell.
    service.add_class_group("7/D").unwrap();
    let biology = service
        .add_course("Biology", CourseType::Lesson, None)
        .unwrap();
    service.assign_course_to_slot(1, 3, &biology).unwrap();
    service.select_class_group(DEFAULT_CLASS_GROUP_ID).unwrap();

    service.clear_slot(1, 3).unwrap();

    let state = service.repository().get_state();
    assert!(!state
        .schedule_items
        .iter()
        .any(|item| item.course_id == math && item.day_index == 1 && item.slot_index == 3));
    assert!(state
        .schedule_items
        .iter()
        .any(|item| item.course_id == biology && item.day_index == 1 && item.slot_index == 3));

    // Clearing an already-empty cell is a no-op.
    service.clear_slot(1, 3).unwrap();
}

#[test]
fn update_lesson_notes_trims_and_clears() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    service
        .update_lesson_notes("sched-demo-1", "  new default  ", "  only today  ")
        .unwrap();

    let state = service.repository().get_state();
    assert_eq!(
        state.courses[0].default_note.as_deref(),
        Some("new default")
    );
    assert_eq!(
        state.schedule_items[0].note_override.as_deref(),
        Some("only today")
    );

    service.update_lesson_notes("sched-demo-1", "", "   ").unwrap();
    let state = service.repository().get_state();
    assert_eq!(state.courses[0].default_note, None);
    assert_eq!(state.schedule_items[0].note_override, None);

    assert!(matches!(
        service.update_lesson_notes("sched-gone", "a", "b"),
        Err(ServiceError::ScheduleItemNotFound(_))
    ));
}

#[test]
fn time_override_is_validated_and_cleared() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    service
        .set_time_override(
            "sched-demo-1",
            Some(TimeRange {
                start: "10:15".to_string(),
                end: "10:55".to_string(),
            }),
        )
        .unwrap();
    let state = service.repository().get_state();
    assert_eq!(
        state.schedule_items[0].time_override.as_ref().unwrap().start,
        "10:15"
    );

    assert!(matches!(
        service.set_time_override(
            "sched-demo-1",
            Some(TimeRange {
                start: "25:00".to_string(),
                end: "26:00".to_string(),
            }),
        ),
        Err(ServiceError::InvalidTime(_))
    ));

    service.set_time_override("sched-demo-1", None).unwrap();
    assert_eq!(
        service.repository().get_state().schedule_items[0].time_override,
        None
    );
}

#[test]
fn homework_roundtrip_and_validation() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    let id = service.add_homework("Worksheet", "2026-02-01").unwrap();
    let state = service.repository().get_state();
    let homework = state.homeworks.iter().find(|h| h.id == id).unwrap();
    assert_eq!(homework.class_group_id, DEFAULT_CLASS_GROUP_ID);
    assert_eq!(homework.created_by, "teacher");
    assert!(!homework.is_done);

    service.set_homework_done(&id, true).unwrap();
    assert!(service.repository().get_state().homeworks[0].is_done);

    assert!(matches!(
        service.add_homework("Worksheet", "tomorrow"),
        Err(ServiceError::InvalidDate(_))
    ));
    assert!(matches!(
        service.set_homework_done("hw-gone", true),
        Err(ServiceError::HomeworkNotFound(_))
    ));
}

#[test]
fn achievements_need_at_least_one_display_field() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    assert!(matches!(
        service.add_achievement(None, Some("  "), None),
        Err(ServiceError::EmptyAchievement)
    ));

    let id = service
        .add_achievement(None, Some("Forces and Motion"), Some("Explains friction"))
        .unwrap();
    let state = service.repository().get_state();
    let added = state.achievements.iter().find(|a| a.id == id).unwrap();
    assert_eq!(added.unit.as_deref(), Some("Forces and Motion"));
}

#[test]
fn record_stuck_appends_so_the_newest_record_wins() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);
    let moment = monday_morning();

    let first = service
        .add_achievement(Some("First topic"), None, None)
        .unwrap();
    let second = service
        .add_achievement(Some("Second topic"), None, None)
        .unwrap();

    service.record_stuck(&first, "", None, None, &moment).unwrap();
    service
        .record_stuck(&second, "halfway through", None, None, &moment)
        .unwrap();

    let state = service.repository().get_state();
    assert_eq!(state.daily_stuck.len(), 2);
    assert_eq!(state.daily_stuck[1].date_iso, "2026-01-05");
    assert_eq!(
        state.daily_stuck[1].note.as_deref(),
        Some("halfway through")
    );
    assert_eq!(last_stuck_text(&state).as_deref(), Some("Second topic"));

    assert!(matches!(
        service.record_stuck("ach-gone", "", None, None, &moment),
        Err(ServiceError::AchievementNotFound(_))
    ));
}

#[test]
fn reset_restores_the_first_run_state() {
    let conn = open_store_in_memory().unwrap();
    let service = service(&conn);

    service.set_mode(UserMode::Teacher).unwrap();
    service.add_class_group("7/D").unwrap();
    service.reset().unwrap();

    let state = service.repository().get_state();
    assert_eq!(state, eduwidget_core::AppState::empty());
}
