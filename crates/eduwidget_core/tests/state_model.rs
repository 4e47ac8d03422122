use eduwidget_core::{
    default_time_slots, uid, AppState, CourseType, Homework, UserMode, DEFAULT_CLASS_GROUP_ID,
};

#[test]
fn empty_state_sets_defaults() {
    let state = AppState::empty();

    assert_eq!(state.mode, None);
    assert_eq!(
        state.selected_class_group_id.as_deref(),
        Some(DEFAULT_CLASS_GROUP_ID)
    );
    assert_eq!(state.class_groups.len(), 1);
    assert_eq!(state.class_groups[0].label, "Default Class");

    assert_eq!(state.courses.len(), 1);
    assert_eq!(state.courses[0].kind, CourseType::Lesson);
    assert_eq!(state.courses[0].class_group_id, DEFAULT_CLASS_GROUP_ID);

    assert_eq!(state.schedule_items.len(), 1);
    assert_eq!(state.schedule_items[0].course_id, state.courses[0].id);
    assert_eq!(state.schedule_items[0].day_index, 0);
    assert_eq!(state.schedule_items[0].slot_index, 1);

    assert!(state.homeworks.is_empty());
    assert!(state.achievements.is_empty());
    assert!(state.daily_stuck.is_empty());
}

#[test]
fn default_time_slots_cover_the_school_day() {
    let slots = default_time_slots();

    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0].slot_index, 1);
    assert_eq!(slots[0].start, "08:30");
    assert_eq!(slots[0].end, "09:10");
    assert_eq!(slots[7].slot_index, 8);
    assert_eq!(slots[7].start, "15:10");
    assert_eq!(slots[7].end, "15:50");

    let indices: Vec<u32> = slots.iter().map(|slot| slot.slot_index).collect();
    assert_eq!(indices, (1..=8).collect::<Vec<u32>>());
}

#[test]
fn state_serialization_uses_expected_wire_fields() {
    let mut state = AppState::empty();
    state.mode = Some(UserMode::Teacher);
    state
        .homeworks
        .push(Homework::new(DEFAULT_CLASS_GROUP_ID, "Read ch. 4", "2026-03-02"));

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["mode"], "teacher");
    assert_eq!(json["selectedClassGroupId"], DEFAULT_CLASS_GROUP_ID);
    assert!(json["classGroups"].is_array());
    assert!(json["scheduleItems"].is_array());
    assert!(json["timeSlots"].is_array());
    assert!(json["dailyStuck"].is_array());

    assert_eq!(json["courses"][0]["type"], "lesson");
    assert_eq!(json["courses"][0]["classGroupId"], DEFAULT_CLASS_GROUP_ID);
    assert_eq!(json["courses"][0]["defaultNote"], "Bring lab materials");

    assert_eq!(json["homeworks"][0]["dueDateISO"], "2026-03-02");
    assert_eq!(json["homeworks"][0]["createdBy"], "teacher");
    assert_eq!(json["homeworks"][0]["isDone"], false);

    let decoded: AppState = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, state);
}

#[test]
fn unset_mode_is_omitted_from_the_wire() {
    let json = serde_json::to_value(AppState::empty()).unwrap();
    assert!(json.get("mode").is_none());
}

#[test]
fn uid_is_prefixed_and_unique() {
    let first = uid("sched");
    let second = uid("sched");

    assert!(first.starts_with("sched-"));
    assert!(second.starts_with("sched-"));
    assert_ne!(first, second);
}
