//! Today's lessons and the current/next lesson computation.

use crate::model::state::{AppState, Course, ScheduleItem, TimeSlot};
use crate::select::moment::{minutes_from_hhmm, Moment};
use std::collections::{HashMap, HashSet};

/// One lesson occurrence of the selected class's day, with its effective
/// times and note resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayLessonView {
    pub schedule_item: ScheduleItem,
    pub course: Course,
    pub slot_index: u32,
    pub start: String,
    pub end: String,
    /// `note_override` if non-blank, else the course default note, else none.
    pub effective_note: Option<String>,
}

/// Courses belonging to the selected class group; empty when none selected.
pub fn courses_for_selected_class(state: &AppState) -> Vec<&Course> {
    let Some(selected) = state.selected_class_group_id.as_deref() else {
        return Vec::new();
    };
    state
        .courses
        .iter()
        .filter(|course| course.class_group_id == selected)
        .collect()
}

/// Schedule items whose course belongs to the selected class group.
pub fn schedule_for_selected_class(state: &AppState) -> Vec<&ScheduleItem> {
    let course_ids: HashSet<&str> = courses_for_selected_class(state)
        .into_iter()
        .map(|course| course.id.as_str())
        .collect();
    state
        .schedule_items
        .iter()
        .filter(|item| course_ids.contains(item.course_id.as_str()))
        .collect()
}

pub fn course_by_id<'a>(state: &'a AppState, course_id: &str) -> Option<&'a Course> {
    state.courses.iter().find(|course| course.id == course_id)
}

/// The selected class's occupant of a (day, slot) cell, if any.
pub fn schedule_item_for_day_slot(
    state: &AppState,
    day_index: u8,
    slot_index: u32,
) -> Option<&ScheduleItem> {
    schedule_for_selected_class(state)
        .into_iter()
        .find(|item| item.day_index == day_index && item.slot_index == slot_index)
}

/// The selected class's lessons for `moment`'s day, ordered by slot.
///
/// Effective start/end come from the item's time override, else the slot
/// table, else "00:00". Items referencing a missing course are skipped.
pub fn today_lessons(state: &AppState, moment: &Moment) -> Vec<TodayLessonView> {
    let today = moment.day_index();
    let slots_by_index: HashMap<u32, &TimeSlot> = state
        .time_slots
        .iter()
        .map(|slot| (slot.slot_index, slot))
        .collect();

    let mut items: Vec<&ScheduleItem> = schedule_for_selected_class(state)
        .into_iter()
        .filter(|item| item.day_index == today)
        .collect();
    items.sort_by_key(|item| item.slot_index);

    let mut lessons = Vec::with_capacity(items.len());
    for item in items {
        let Some(course) = course_by_id(state, &item.course_id) else {
            continue;
        };

        let slot = slots_by_index.get(&item.slot_index);
        let start = item
            .time_override
            .as_ref()
            .map(|range| range.start.clone())
            .or_else(|| slot.map(|slot| slot.start.clone()))
            .unwrap_or_else(|| "00:00".to_string());
        let end = item
            .time_override
            .as_ref()
            .map(|range| range.end.clone())
            .or_else(|| slot.map(|slot| slot.end.clone()))
            .unwrap_or_else(|| "00:00".to_string());

        let effective_note = non_blank(item.note_override.as_deref())
            .or_else(|| non_blank(course.default_note.as_deref()));

        lessons.push(TodayLessonView {
            schedule_item: item.clone(),
            course: course.clone(),
            slot_index: item.slot_index,
            start,
            end,
            effective_note,
        });
    }

    lessons
}

/// The current lesson, the next lesson, and the upcoming prefix for
/// compact widget previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentNext {
    /// First lesson whose [start, end) interval contains now.
    pub current: Option<TodayLessonView>,
    /// First lesson whose start is strictly after now.
    pub next: Option<TodayLessonView>,
    /// Lessons still upcoming today (from the current lesson's end, or
    /// from now when none is running), capped at 3.
    pub next_list: Vec<TodayLessonView>,
}

pub fn current_and_next(state: &AppState, moment: &Moment) -> CurrentNext {
    let lessons = today_lessons(state, moment);
    if lessons.is_empty() {
        return CurrentNext::default();
    }

    let now = moment.minutes_since_midnight();

    let current = lessons
        .iter()
        .find(|lesson| {
            let start = minutes_from_hhmm(&lesson.start);
            let end = minutes_from_hhmm(&lesson.end);
            // Half-open: a lesson is current at its start minute but no
            // longer at its end minute.
            now >= start && now < end
        })
        .cloned();

    let next = lessons
        .iter()
        .find(|lesson| minutes_from_hhmm(&lesson.start) > now)
        .cloned();

    let pivot = current
        .as_ref()
        .map_or(now, |lesson| minutes_from_hhmm(&lesson.end));
    let next_list = lessons
        .iter()
        .filter(|lesson| minutes_from_hhmm(&lesson.start) >= pivot)
        .take(3)
        .cloned()
        .collect();

    CurrentNext {
        current,
        next,
        next_list,
    }
}

/// Trims and collapses blank text to none.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
