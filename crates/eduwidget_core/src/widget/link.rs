//! Deep-link route table and lesson resolution.

use crate::model::state::{AppState, Course, EntityId, ScheduleItem};

/// URI scheme the app registers with the OS.
pub const DEEP_LINK_SCHEME: &str = "eduwidget";

/// In-app destinations addressable from outside (widget taps, OS links).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ModeSelect,
    Home,
    Schedule,
    AddLesson,
    Homework,
    Achievement,
    /// Lesson detail, addressed by schedule item id.
    Lesson { schedule_item_id: EntityId },
}

pub fn home_deep_link() -> String {
    format!("{DEEP_LINK_SCHEME}://home")
}

pub fn lesson_deep_link(schedule_item_id: &str) -> String {
    format!("{DEEP_LINK_SCHEME}://lesson/{schedule_item_id}")
}

/// Parses an `eduwidget://` URI into a route. Anything unrecognized is
/// `None`; the caller falls back to its default screen.
pub fn parse_deep_link(uri: &str) -> Option<Route> {
    let rest = uri.strip_prefix("eduwidget://")?;
    let mut segments = rest.trim_matches('/').splitn(2, '/');

    match (segments.next()?, segments.next()) {
        ("mode", None) => Some(Route::ModeSelect),
        ("home", None) => Some(Route::Home),
        ("schedule", None) => Some(Route::Schedule),
        ("add-lesson", None) => Some(Route::AddLesson),
        ("homework", None) => Some(Route::Homework),
        ("achievement", None) => Some(Route::Achievement),
        ("lesson", Some(id)) if !id.is_empty() => Some(Route::Lesson {
            schedule_item_id: id.to_string(),
        }),
        _ => None,
    }
}

/// Lesson-detail data for a deep-linked schedule item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDetailView {
    pub schedule_item: ScheduleItem,
    pub course: Course,
    /// "<class label> • <course title>", or just the title when the class
    /// group is unknown.
    pub header: String,
}

/// Resolves a schedule item id to its detail view.
///
/// An unknown id, or an item whose course is gone, yields `None` — the
/// caller shows a not-found screen rather than an error.
pub fn resolve_lesson(state: &AppState, schedule_item_id: &str) -> Option<LessonDetailView> {
    let item = state
        .schedule_items
        .iter()
        .find(|item| item.id == schedule_item_id)?;
    let course = state
        .courses
        .iter()
        .find(|course| course.id == item.course_id)?;

    let group_label = state
        .class_groups
        .iter()
        .find(|group| group.id == course.class_group_id)
        .map(|group| group.label.as_str())
        .unwrap_or("");
    let header = if group_label.is_empty() {
        course.title.clone()
    } else {
        format!("{group_label} \u{2022} {}", course.title)
    };

    Some(LessonDetailView {
        schedule_item: item.clone(),
        course: course.clone(),
        header,
    })
}
