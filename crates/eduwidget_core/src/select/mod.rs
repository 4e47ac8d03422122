//! Derived-view selectors.
//!
//! # Responsibility
//! - Compute today's lessons, the current/next lesson, due-homework counts
//!   and the widget summary from a state snapshot.
//!
//! # Invariants
//! - Selectors are pure: they never mutate or persist state.
//! - Time-dependent selectors take an explicit [`Moment`] so results are a
//!   function of (state, now) only.
//! - Records with dangling references are skipped, never errors.

pub mod moment;
pub mod summary;
pub mod today;

pub use moment::{minutes_from_hhmm, Moment};
pub use summary::{
    due_today_homework_count, homeworks_for_selected_class, last_stuck_text, widget_summary,
    WidgetSummary,
};
pub use today::{
    course_by_id, courses_for_selected_class, current_and_next, schedule_for_selected_class,
    schedule_item_for_day_slot, today_lessons, CurrentNext, TodayLessonView,
};
