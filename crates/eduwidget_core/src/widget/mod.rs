//! Widget render contract and deep-link addressing.
//!
//! # Responsibility
//! - Assemble the snapshot the OS widget host renders (two text fields,
//!   a click target, a layout choice).
//! - Parse and resolve `eduwidget://` deep links.
//!
//! # Invariants
//! - Snapshot assembly is total over a normalized state; it never fails.
//! - Unknown deep-link ids resolve to a graceful "not found" (`None`),
//!   never an error.

pub mod link;
pub mod snapshot;

pub use link::{
    home_deep_link, lesson_deep_link, parse_deep_link, resolve_lesson, LessonDetailView, Route,
    DEEP_LINK_SCHEME,
};
pub use snapshot::{build_widget_snapshot, WidgetSnapshot};
