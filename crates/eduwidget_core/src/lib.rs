//! Core domain logic for EduWidget.
//! This crate is the single source of truth for state normalization,
//! legacy migration and the derived views behind the home-screen widget.

pub mod logging;
pub mod model;
pub mod repo;
pub mod select;
pub mod service;
pub mod store;
pub mod widget;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::state::{
    default_time_slots, uid, Achievement, AppState, ClassGroup, Course, CourseType, DailyStuck,
    EntityId, Homework, ScheduleItem, TimeRange, TimeSlot, UserMode, DEFAULT_CLASS_GROUP_ID,
};
pub use repo::normalize::{normalize_document, normalize_state};
pub use repo::prefs_repo::{PrefsRepository, WidgetLayout, WidgetPrefs, WIDGET_PREFS_KEY};
pub use repo::state_repo::{RepoError, RepoResult, StateRepository, APP_STATE_KEY};
pub use select::{
    current_and_next, due_today_homework_count, last_stuck_text, minutes_from_hhmm, today_lessons,
    widget_summary, CurrentNext, Moment, TodayLessonView, WidgetSummary,
};
pub use service::state_service::{ServiceError, ServiceResult, StateService};
pub use store::{
    open_store, open_store_in_memory, KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use widget::{
    build_widget_snapshot, home_deep_link, lesson_deep_link, parse_deep_link, resolve_lesson,
    LessonDetailView, Route, WidgetSnapshot, DEEP_LINK_SCHEME,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
