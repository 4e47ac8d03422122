//! Application state document and its entity records.
//!
//! # Responsibility
//! - Define the value records of the weekly timetable domain.
//! - Keep the wire shape byte-compatible with documents written by earlier
//!   app versions.
//!
//! # Invariants
//! - Wire field names are camelCase (`classGroups`, `dueDateISO`, ...);
//!   Rust-side names are snake_case.
//! - Deserialization is tolerant: optional fields default instead of
//!   rejecting the document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every record in the state document.
///
/// Ids carry a semantic prefix (`cg-`, `course-`, `sched-`, ...) so raw
/// documents stay readable during support sessions.
pub type EntityId = String;

/// Id of the class group seeded into a fresh document.
pub const DEFAULT_CLASS_GROUP_ID: &str = "cg-default";

/// Generates a fresh prefixed id.
pub fn uid(prefix: &str) -> EntityId {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Which side of the app the device owner uses.
///
/// A document without a mode belongs to a user who has not picked a side
/// on the mode-select screen yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMode {
    Teacher,
    Student,
}

/// A cohort/section such as "5/A" that owns courses and a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: EntityId,
    #[serde(default)]
    pub label: String,
}

impl ClassGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: uid("cg"),
            label: label.into(),
        }
    }
}

/// Category of a course occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    /// Regular curriculum lesson.
    #[default]
    Lesson,
    /// Exam-prep support course.
    Dyk,
    /// Private tutoring.
    Private,
    /// Supervised study period.
    Study,
}

/// A subject taught to one class group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: EntityId,
    #[serde(default)]
    pub class_group_id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: CourseType,
    /// Week-spanning note shown for every occurrence unless overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_note: Option<String>,
}

impl Course {
    pub fn new(
        class_group_id: impl Into<EntityId>,
        title: impl Into<String>,
        kind: CourseType,
    ) -> Self {
        Self {
            id: uid("course"),
            class_group_id: class_group_id.into(),
            title: title.into(),
            kind,
            default_note: None,
        }
    }
}

/// A start/end pair in `HH:MM` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// A canonical period of the school day, shared across class groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub slot_index: u32,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// One occupied (day, slot) cell of a class group's weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: EntityId,
    #[serde(default)]
    pub course_id: EntityId,
    /// 0 = Monday ... 6 = Sunday.
    #[serde(default)]
    pub day_index: u8,
    /// Matches `TimeSlot::slot_index`; slot numbering starts at 1, so the
    /// lenient default 0 never resolves to a real slot.
    #[serde(default)]
    pub slot_index: u32,
    /// Per-occurrence replacement for the slot's start/end times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_override: Option<TimeRange>,
    /// Per-occurrence note, preferred over `Course::default_note`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_override: Option<String>,
}

impl ScheduleItem {
    pub fn new(course_id: impl Into<EntityId>, day_index: u8, slot_index: u32) -> Self {
        Self {
            id: uid("sched"),
            course_id: course_id.into(),
            day_index,
            slot_index,
            time_override: None,
            note_override: None,
        }
    }
}

fn default_created_by() -> String {
    "teacher".to_string()
}

/// An assignment handed to one class group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub class_group_id: EntityId,
    #[serde(default)]
    pub title: String,
    /// Due date in `YYYY-MM-DD` form.
    #[serde(rename = "dueDateISO", default)]
    pub due_date_iso: String,
    #[serde(default = "default_created_by")]
    pub created_by: String,
    #[serde(default)]
    pub is_done: bool,
}

impl Homework {
    pub fn new(
        class_group_id: impl Into<EntityId>,
        title: impl Into<String>,
        due_date_iso: impl Into<String>,
    ) -> Self {
        Self {
            id: uid("hw"),
            class_group_id: class_group_id.into(),
            title: title.into(),
            due_date_iso: due_date_iso.into(),
            created_by: default_created_by(),
            is_done: false,
        }
    }
}

/// A curriculum achievement that stuck records can point at.
///
/// At least one of `title`/`unit`/`outcome` is expected to be present for
/// display; the record is still tolerated without any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

/// Teacher-entered marker of where a class group stopped on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStuck {
    #[serde(default)]
    pub id: EntityId,
    #[serde(rename = "dateISO", default)]
    pub date_iso: String,
    #[serde(default)]
    pub class_group_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_item_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<EntityId>,
    #[serde(default)]
    pub achievement_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The single persisted document owning every entity collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<UserMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_class_group_id: Option<EntityId>,
    #[serde(default)]
    pub class_groups: Vec<ClassGroup>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub homeworks: Vec<Homework>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub daily_stuck: Vec<DailyStuck>,
}

impl AppState {
    /// Deterministic first-run document: one default class group, one demo
    /// course with a demo schedule item, the canonical time slots, and
    /// empty homework/achievement/stuck lists.
    pub fn empty() -> Self {
        let demo_course = Course {
            id: "course-science-demo".to_string(),
            class_group_id: DEFAULT_CLASS_GROUP_ID.to_string(),
            title: "Science".to_string(),
            kind: CourseType::Lesson,
            default_note: Some("Bring lab materials".to_string()),
        };
        let demo_item = ScheduleItem {
            id: "sched-demo-1".to_string(),
            course_id: demo_course.id.clone(),
            day_index: 0,
            slot_index: 1,
            time_override: None,
            note_override: None,
        };

        Self {
            mode: None,
            selected_class_group_id: Some(DEFAULT_CLASS_GROUP_ID.to_string()),
            class_groups: vec![ClassGroup {
                id: DEFAULT_CLASS_GROUP_ID.to_string(),
                label: "Default Class".to_string(),
            }],
            courses: vec![demo_course],
            schedule_items: vec![demo_item],
            time_slots: default_time_slots(),
            homeworks: Vec::new(),
            achievements: Vec::new(),
            daily_stuck: Vec::new(),
        }
    }
}

/// The canonical 8-slot school day (08:30-15:50 with two breaks).
pub fn default_time_slots() -> Vec<TimeSlot> {
    const PERIODS: [(&str, &str); 8] = [
        ("08:30", "09:10"),
        ("09:20", "10:00"),
        ("10:10", "10:50"),
        ("11:00", "11:40"),
        ("11:50", "12:30"),
        ("13:30", "14:10"),
        ("14:20", "15:00"),
        ("15:10", "15:50"),
    ];

    PERIODS
        .iter()
        .enumerate()
        .map(|(i, (start, end))| TimeSlot {
            slot_index: (i + 1) as u32,
            start: (*start).to_string(),
            end: (*end).to_string(),
        })
        .collect()
}
