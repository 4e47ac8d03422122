//! Migration of legacy (pre-multi-class) documents.
//!
//! # Responsibility
//! - Rebuild the slot table, course list and schedule from flat legacy
//!   lesson records.
//! - Carry homeworks/achievements/stuck records over with backfilled ids.
//!
//! # Invariants
//! - Every legacy lesson with a non-blank title produces exactly one
//!   schedule item; courses are deduplicated by exact title.
//! - Migration never fails; unusable legacy fields fall back to defaults.

use crate::model::state::{
    default_time_slots, AppState, Course, CourseType, ScheduleItem, TimeSlot, UserMode,
    DEFAULT_CLASS_GROUP_ID,
};
use crate::repo::normalize::{lenient_list, lenient_value, normalize_state};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Flat lesson record as written by the legacy single-class schema.
///
/// Every field is parsed leniently: a malformed value degrades to absent
/// instead of dropping the lesson.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyLesson {
    #[serde(default, deserialize_with = "lenient_field")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_field")]
    note: Option<String>,
    #[serde(default, deserialize_with = "lenient_field")]
    day_index: Option<u8>,
    #[serde(default, deserialize_with = "lenient_field")]
    start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_field")]
    end_time: Option<String>,
}

fn lenient_field<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Migrates a legacy-shaped document into the current schema.
///
/// The single migrated class group is the default one; the empty state's
/// demo course and schedule item are replaced by the migrated records.
pub(crate) fn migrate_legacy(doc: &Map<String, Value>) -> AppState {
    let base = AppState::empty();
    let class_group_id = DEFAULT_CLASS_GROUP_ID;

    let lessons: Vec<LegacyLesson> = lenient_list(doc.get("lessons"));
    let time_slots = time_slots_from_lessons(&lessons);

    let mut courses: Vec<Course> = Vec::new();
    let mut course_id_by_title: HashMap<String, String> = HashMap::new();
    let mut schedule_items: Vec<ScheduleItem> = Vec::new();

    for lesson in &lessons {
        let title = lesson.title.as_deref().unwrap_or("").trim();
        if title.is_empty() {
            continue;
        }

        let course_id = course_id_by_title
            .entry(title.to_string())
            .or_insert_with(|| {
                let course = Course::new(class_group_id, title, CourseType::Lesson);
                let id = course.id.clone();
                courses.push(course);
                id
            })
            .clone();

        let slot_index = match (&lesson.start_time, &lesson.end_time) {
            (Some(start), Some(end)) => find_slot_index(&time_slots, start, end),
            _ => 1,
        };

        let mut item = ScheduleItem::new(course_id, lesson.day_index.unwrap_or(0), slot_index);
        item.note_override = lesson.note.clone().filter(|note| !note.is_empty());
        schedule_items.push(item);
    }

    let mode: Option<UserMode> = lenient_value(doc.get("mode"));

    let migrated = AppState {
        mode,
        selected_class_group_id: base.selected_class_group_id,
        class_groups: base.class_groups,
        courses,
        schedule_items,
        time_slots,
        homeworks: lenient_list(doc.get("homeworks")),
        achievements: lenient_list(doc.get("achievements")),
        daily_stuck: lenient_list(doc.get("dailyStuck")),
    };

    // Shares the backfill pass (homework class group, stuck ids) with the
    // current-schema path.
    normalize_state(migrated)
}

/// Rebuilds the slot table from distinct legacy (start, end) pairs, sorted
/// by start time, numbered from 1. Falls back to the canonical defaults
/// when no legacy lesson carries a usable pair.
fn time_slots_from_lessons(lessons: &[LegacyLesson]) -> Vec<TimeSlot> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut pairs: Vec<(String, String)> = Vec::new();

    for lesson in lessons {
        let (Some(start), Some(end)) = (&lesson.start_time, &lesson.end_time) else {
            continue;
        };
        if start.is_empty() || end.is_empty() {
            continue;
        }
        if seen.insert((start.clone(), end.clone())) {
            pairs.push((start.clone(), end.clone()));
        }
    }

    if pairs.is_empty() {
        return default_time_slots();
    }

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (start, end))| TimeSlot {
            slot_index: (i + 1) as u32,
            start,
            end,
        })
        .collect()
}

/// Resolves a legacy lesson's (start, end) against the rebuilt slot table.
/// Unmatched pairs land in slot 1.
fn find_slot_index(time_slots: &[TimeSlot], start: &str, end: &str) -> u32 {
    time_slots
        .iter()
        .find(|slot| slot.start == start && slot.end == end)
        .map_or(1, |slot| slot.slot_index)
}
