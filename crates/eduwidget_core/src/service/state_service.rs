//! State mutation use-cases.
//!
//! # Responsibility
//! - Provide validated entry points for every state transition the app
//!   performs (class groups, courses, timetable cells, homework, stuck
//!   records).
//! - Enforce the one-item-per-(day, slot)-per-class rule by
//!   find-or-replace on assignment.
//!
//! # Invariants
//! - Service APIs never bypass repository normalization.
//! - Stuck records are appended, keeping array position as recency for
//!   the last-stuck selector.

use crate::model::state::{
    uid, Achievement, AppState, ClassGroup, Course, CourseType, DailyStuck, EntityId, Homework,
    ScheduleItem, TimeRange, UserMode, DEFAULT_CLASS_GROUP_ID,
};
use crate::repo::state_repo::{RepoError, StateRepository};
use crate::select::moment::Moment;
use crate::select::today::non_blank;
use crate::store::KeyValueStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d$").expect("valid time regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for state mutation use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Class group label is blank after trimming.
    EmptyLabel,
    /// Course or homework title is blank after trimming.
    EmptyTitle,
    /// Achievement has no displayable field at all.
    EmptyAchievement,
    /// Day index outside Monday(0)..Sunday(6).
    InvalidDayIndex(u8),
    /// Not an `HH:MM` time.
    InvalidTime(String),
    /// Not a `YYYY-MM-DD` date.
    InvalidDate(String),
    ClassGroupNotFound(EntityId),
    CourseNotFound(EntityId),
    ScheduleItemNotFound(EntityId),
    HomeworkNotFound(EntityId),
    AchievementNotFound(EntityId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "class group label cannot be blank"),
            Self::EmptyTitle => write!(f, "title cannot be blank"),
            Self::EmptyAchievement => {
                write!(f, "achievement needs at least one of title/unit/outcome")
            }
            Self::InvalidDayIndex(day) => write!(f, "day index out of range: {day}"),
            Self::InvalidTime(value) => write!(f, "invalid HH:MM time: `{value}`"),
            Self::InvalidDate(value) => write!(f, "invalid YYYY-MM-DD date: `{value}`"),
            Self::ClassGroupNotFound(id) => write!(f, "class group not found: {id}"),
            Self::CourseNotFound(id) => write!(f, "course not found: {id}"),
            Self::ScheduleItemNotFound(id) => write!(f, "schedule item not found: {id}"),
            Self::HomeworkNotFound(id) => write!(f, "homework not found: {id}"),
            Self::AchievementNotFound(id) => write!(f, "achievement not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case facade over the state repository.
pub struct StateService<S: KeyValueStore> {
    repo: StateRepository<S>,
}

impl<S: KeyValueStore> StateService<S> {
    pub fn new(repo: StateRepository<S>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &StateRepository<S> {
        &self.repo
    }

    /// Picks the teacher or student side of the app.
    pub fn set_mode(&self, mode: UserMode) -> ServiceResult<()> {
        self.repo.update_state(|mut state| {
            state.mode = Some(mode);
            state
        })?;
        Ok(())
    }

    /// Adds a class group and makes it the selected one.
    pub fn add_class_group(&self, label: &str) -> ServiceResult<EntityId> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ServiceError::EmptyLabel);
        }

        let group = ClassGroup::new(label);
        let id = group.id.clone();
        let selected = id.clone();
        self.repo.update_state(move |mut state| {
            state.class_groups.push(group);
            state.selected_class_group_id = Some(selected);
            state
        })?;
        Ok(id)
    }

    pub fn select_class_group(&self, class_group_id: &str) -> ServiceResult<()> {
        let mut state = self.repo.get_state();
        if !state
            .class_groups
            .iter()
            .any(|group| group.id == class_group_id)
        {
            return Err(ServiceError::ClassGroupNotFound(class_group_id.to_string()));
        }

        state.selected_class_group_id = Some(class_group_id.to_string());
        self.repo.set_state(&state)?;
        Ok(())
    }

    /// Adds a course to the selected class group.
    pub fn add_course(
        &self,
        title: &str,
        kind: CourseType,
        default_note: Option<&str>,
    ) -> ServiceResult<EntityId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::EmptyTitle);
        }

        let mut state = self.repo.get_state();
        let mut course = Course::new(selected_class_group(&state), title, kind);
        course.default_note = non_blank(default_note);
        let id = course.id.clone();
        state.courses.push(course);
        self.repo.set_state(&state)?;
        Ok(id)
    }

    /// Puts a course into a (day, slot) cell of the selected class's
    /// timetable: the existing occupant is repointed to the new course,
    /// otherwise a new schedule item is appended. Returns the occupant's
    /// id either way.
    pub fn assign_course_to_slot(
        &self,
        day_index: u8,
        slot_index: u32,
        course_id: &str,
    ) -> ServiceResult<EntityId> {
        if day_index > 6 {
            return Err(ServiceError::InvalidDayIndex(day_index));
        }

        let mut state = self.repo.get_state();
        if !state.courses.iter().any(|course| course.id == course_id) {
            return Err(ServiceError::CourseNotFound(course_id.to_string()));
        }

        let class_course_ids = selected_course_ids(&state);
        let occupant = state.schedule_items.iter_mut().find(|item| {
            class_course_ids.contains(item.course_id.as_str())
                && item.day_index == day_index
                && item.slot_index == slot_index
        });

        let id = match occupant {
            Some(item) => {
                item.course_id = course_id.to_string();
                item.id.clone()
            }
            None => {
                let item = ScheduleItem::new(course_id, day_index, slot_index);
                let id = item.id.clone();
                state.schedule_items.push(item);
                id
            }
        };

        self.repo.set_state(&state)?;
        Ok(id)
    }

    /// Empties a (day, slot) cell of the selected class's timetable.
    /// Clearing an already-empty cell is a no-op.
    pub fn clear_slot(&self, day_index: u8, slot_index: u32) -> ServiceResult<()> {
        let mut state = self.repo.get_state();
        let class_course_ids = selected_course_ids(&state);

        state.schedule_items.retain(|item| {
            !(class_course_ids.contains(item.course_id.as_str())
                && item.day_index == day_index
                && item.slot_index == slot_index)
        });

        self.repo.set_state(&state)?;
        Ok(())
    }

    /// Saves the lesson-detail note pair: the course-wide default note and
    /// the per-occurrence override. Blank text clears the note.
    pub fn update_lesson_notes(
        &self,
        schedule_item_id: &str,
        default_note: &str,
        note_override: &str,
    ) -> ServiceResult<()> {
        let mut state = self.repo.get_state();

        let course_id = state
            .schedule_items
            .iter()
            .find(|item| item.id == schedule_item_id)
            .map(|item| item.course_id.clone())
            .ok_or_else(|| ServiceError::ScheduleItemNotFound(schedule_item_id.to_string()))?;

        let course = state
            .courses
            .iter_mut()
            .find(|course| course.id == course_id)
            .ok_or_else(|| ServiceError::CourseNotFound(course_id.clone()))?;
        course.default_note = non_blank(Some(default_note));

        if let Some(item) = state
            .schedule_items
            .iter_mut()
            .find(|item| item.id == schedule_item_id)
        {
            item.note_override = non_blank(Some(note_override));
        }

        self.repo.set_state(&state)?;
        Ok(())
    }

    /// Sets or clears a per-occurrence start/end replacement.
    pub fn set_time_override(
        &self,
        schedule_item_id: &str,
        time_override: Option<TimeRange>,
    ) -> ServiceResult<()> {
        if let Some(range) = &time_override {
            for value in [&range.start, &range.end] {
                if !TIME_RE.is_match(value) {
                    return Err(ServiceError::InvalidTime(value.clone()));
                }
            }
        }

        let mut state = self.repo.get_state();
        let item = state
            .schedule_items
            .iter_mut()
            .find(|item| item.id == schedule_item_id)
            .ok_or_else(|| ServiceError::ScheduleItemNotFound(schedule_item_id.to_string()))?;
        item.time_override = time_override;

        self.repo.set_state(&state)?;
        Ok(())
    }

    /// Hands homework to the selected class group.
    pub fn add_homework(&self, title: &str, due_date_iso: &str) -> ServiceResult<EntityId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::EmptyTitle);
        }
        if !DATE_RE.is_match(due_date_iso) {
            return Err(ServiceError::InvalidDate(due_date_iso.to_string()));
        }

        let mut state = self.repo.get_state();
        let homework = Homework::new(selected_class_group(&state), title, due_date_iso);
        let id = homework.id.clone();
        state.homeworks.push(homework);
        self.repo.set_state(&state)?;
        Ok(id)
    }

    /// Student check-off.
    pub fn set_homework_done(&self, homework_id: &str, done: bool) -> ServiceResult<()> {
        let mut state = self.repo.get_state();
        let homework = state
            .homeworks
            .iter_mut()
            .find(|homework| homework.id == homework_id)
            .ok_or_else(|| ServiceError::HomeworkNotFound(homework_id.to_string()))?;
        homework.is_done = done;

        self.repo.set_state(&state)?;
        Ok(())
    }

    /// Registers a curriculum achievement. At least one of title/unit/
    /// outcome must be non-blank.
    pub fn add_achievement(
        &self,
        title: Option<&str>,
        unit: Option<&str>,
        outcome: Option<&str>,
    ) -> ServiceResult<EntityId> {
        let achievement = Achievement {
            id: uid("ach"),
            title: non_blank(title),
            unit: non_blank(unit),
            outcome: non_blank(outcome),
        };
        if achievement.title.is_none() && achievement.unit.is_none() && achievement.outcome.is_none()
        {
            return Err(ServiceError::EmptyAchievement);
        }

        let id = achievement.id.clone();
        self.repo.update_state(move |mut state| {
            state.achievements.push(achievement);
            state
        })?;
        Ok(id)
    }

    /// Marks where the selected class stopped today. Appends, so the
    /// newest record is always last in array order.
    pub fn record_stuck(
        &self,
        achievement_id: &str,
        note: &str,
        schedule_item_id: Option<&str>,
        course_id: Option<&str>,
        moment: &Moment,
    ) -> ServiceResult<EntityId> {
        let mut state = self.repo.get_state();
        if !state
            .achievements
            .iter()
            .any(|achievement| achievement.id == achievement_id)
        {
            return Err(ServiceError::AchievementNotFound(achievement_id.to_string()));
        }

        let record = DailyStuck {
            id: uid("stuck"),
            date_iso: moment.today_iso(),
            class_group_id: selected_class_group(&state),
            schedule_item_id: schedule_item_id.map(str::to_string),
            course_id: course_id.map(str::to_string),
            achievement_id: achievement_id.to_string(),
            note: non_blank(Some(note)),
        };
        let id = record.id.clone();
        state.daily_stuck.push(record);

        self.repo.set_state(&state)?;
        Ok(id)
    }

    /// Replaces the whole document with the first-run state.
    pub fn reset(&self) -> ServiceResult<()> {
        self.repo.set_state(&AppState::empty())?;
        Ok(())
    }
}

fn selected_class_group(state: &AppState) -> EntityId {
    state
        .selected_class_group_id
        .clone()
        .unwrap_or_else(|| DEFAULT_CLASS_GROUP_ID.to_string())
}

fn selected_course_ids(state: &AppState) -> HashSet<String> {
    let selected = selected_class_group(state);
    state
        .courses
        .iter()
        .filter(|course| course.class_group_id == selected)
        .map(|course| course.id.clone())
        .collect()
}
