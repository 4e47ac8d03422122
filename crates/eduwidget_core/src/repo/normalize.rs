//! Defensive normalization of persisted state documents.
//!
//! # Responsibility
//! - Parse raw document JSON into one of two explicit schema branches:
//!   the current multi-class shape or the legacy single-class shape.
//! - Fill every missing or malformed field with a usable default.
//!
//! # Invariants
//! - Normalization never fails; every input degrades to a valid state.
//! - Normalization is idempotent: re-normalizing a normalized state is a
//!   no-op (generated ids are only backfilled where absent).
//! - A normalized document always has a non-empty `timeSlots` list and a
//!   `selectedClassGroupId`.

use crate::model::state::{default_time_slots, uid, AppState, DEFAULT_CLASS_GROUP_ID};
use crate::repo::legacy;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// The two schema branches a persisted document can take.
///
/// Detection is by shape, not by version tag: the legacy (pre-multi-class)
/// writer stored a `lessons` array and knew nothing of `classGroups`.
enum ParsedDocument {
    Absent,
    Legacy(Map<String, Value>),
    Current(Map<String, Value>),
}

fn parse_document(value: Option<Value>) -> ParsedDocument {
    let Some(Value::Object(doc)) = value else {
        return ParsedDocument::Absent;
    };

    let has_lessons = doc.get("lessons").is_some_and(Value::is_array);
    let has_class_groups = doc.get("classGroups").is_some_and(Value::is_array);
    if has_lessons && !has_class_groups {
        return ParsedDocument::Legacy(doc);
    }

    ParsedDocument::Current(doc)
}

/// Normalizes a raw persisted document into a fully populated state.
///
/// Absent or non-object input yields the empty state; a legacy-shaped
/// document is migrated; anything else is merged over the empty state
/// field by field.
pub fn normalize_document(value: Option<Value>) -> AppState {
    match parse_document(value) {
        ParsedDocument::Absent => AppState::empty(),
        ParsedDocument::Legacy(doc) => legacy::migrate_legacy(&doc),
        ParsedDocument::Current(doc) => normalize_state(state_from_document(&doc)),
    }
}

/// Builds an `AppState` from a current-schema document, field by field.
///
/// Collections fall back to `[]` when missing or not an array, except
/// `classGroups`, which falls back to the default class list so a document
/// never loses its only class group to a dropped field.
fn state_from_document(doc: &Map<String, Value>) -> AppState {
    let base = AppState::empty();

    let class_groups = match doc.get("classGroups") {
        Some(Value::Array(_)) => lenient_list(doc.get("classGroups")),
        _ => base.class_groups,
    };

    AppState {
        mode: lenient_value(doc.get("mode")),
        selected_class_group_id: doc
            .get("selectedClassGroupId")
            .and_then(Value::as_str)
            .map(str::to_string),
        class_groups,
        courses: lenient_list(doc.get("courses")),
        schedule_items: lenient_list(doc.get("scheduleItems")),
        time_slots: lenient_list(doc.get("timeSlots")),
        homeworks: lenient_list(doc.get("homeworks")),
        achievements: lenient_list(doc.get("achievements")),
        daily_stuck: lenient_list(doc.get("dailyStuck")),
    }
}

/// Applies the typed normalization steps to an already-parsed state.
///
/// Used both after document parsing and before every persist, so malformed
/// in-process writes self-heal instead of propagating.
pub fn normalize_state(mut state: AppState) -> AppState {
    // A document must never have zero time slots.
    if state.time_slots.is_empty() {
        state.time_slots = default_time_slots();
    }

    let class_group_ids: HashSet<&str> = state
        .class_groups
        .iter()
        .map(|group| group.id.as_str())
        .collect();
    let selected_is_valid = state
        .selected_class_group_id
        .as_deref()
        .is_some_and(|id| class_group_ids.contains(id));
    if !selected_is_valid {
        state.selected_class_group_id = Some(
            state
                .class_groups
                .first()
                .map(|group| group.id.clone())
                .unwrap_or_else(|| DEFAULT_CLASS_GROUP_ID.to_string()),
        );
    }

    let selected = state
        .selected_class_group_id
        .clone()
        .unwrap_or_else(|| DEFAULT_CLASS_GROUP_ID.to_string());

    for homework in &mut state.homeworks {
        if homework.class_group_id.is_empty() {
            homework.class_group_id = selected.clone();
        }
    }

    for stuck in &mut state.daily_stuck {
        if stuck.id.is_empty() {
            stuck.id = uid("stuck");
        }
        if stuck.class_group_id.is_empty() {
            stuck.class_group_id = selected.clone();
        }
    }

    state
}

/// Deserializes a list leniently: a missing or non-array value yields an
/// empty list, and elements that do not conform are dropped rather than
/// rejecting the whole document.
pub(crate) fn lenient_list<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Deserializes a single value leniently, discarding mismatches.
pub(crate) fn lenient_value<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|item| serde_json::from_value(item.clone()).ok())
}
