//! Plain records exchanged with the presentation layer.
//!
//! Tasks grouped by user-defined courses, plus free-text notes. These are
//! collaborators of the timer, not part of it: the only rules are the
//! non-emptiness checks the UI performs before accepting input. Everything
//! lives in memory for the lifetime of the process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Palette offered by the course creation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

/// A user-defined course grouping tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub color: CourseColor,
    /// Which toast image decorates the course card.
    pub toast_icon: String,
}

/// In-progress course form. All three fields are required to create.
#[derive(Debug, Clone, Default)]
pub struct CourseDraft {
    pub name: String,
    pub color: Option<CourseColor>,
    pub toast_icon: Option<String>,
}

/// A task inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub due: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

/// A free-text note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub text: String,
}

/// In-memory store for courses, their tasks, and notes.
#[derive(Debug, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    tasks: Vec<Task>,
    notes: Vec<Note>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Courses ──────────────────────────────────────────────────────

    /// Create a course from a completed draft.
    ///
    /// The creation screen keeps its button disabled until a name, a
    /// color, and a toast image are all chosen; a partial draft here is
    /// the same condition surfaced as an error.
    pub fn create_course(&mut self, draft: CourseDraft) -> Result<&Course, ValidationError> {
        let (color, toast_icon) = match (draft.color, draft.toast_icon) {
            (Some(color), Some(icon)) if !draft.name.trim().is_empty() && !icon.is_empty() => {
                (color, icon)
            }
            _ => return Err(ValidationError::IncompleteCourse),
        };
        self.courses.push(Course {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            color,
            toast_icon,
        });
        Ok(self.courses.last().expect("just pushed"))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Delete a course and every task in it.
    pub fn delete_course(&mut self, id: &str) -> Result<(), ValidationError> {
        let before = self.courses.len();
        self.courses.retain(|c| c.id != id);
        if self.courses.len() == before {
            return Err(unknown("course", id));
        }
        self.tasks.retain(|t| t.course_id != id);
        Ok(())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn add_task(
        &mut self,
        course_id: &str,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        due: DateTime<Utc>,
    ) -> Result<&Task, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        if self.course(course_id).is_none() {
            return Err(unknown("course", course_id));
        }
        self.tasks.push(Task {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title,
            subtitle: subtitle.into(),
            due,
            completed: false,
        });
        Ok(self.tasks.last().expect("just pushed"))
    }

    pub fn tasks_for<'a>(&'a self, course_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.course_id == course_id)
    }

    /// Flip a task's completion flag and return the new value.
    pub fn toggle_task(&mut self, id: &str) -> Result<bool, ValidationError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| unknown("task", id))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<(), ValidationError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(unknown("task", id));
        }
        Ok(())
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub fn add_note(&mut self, text: impl Into<String>) -> Result<&Note, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "text" });
        }
        self.notes.push(Note {
            id: Uuid::new_v4().to_string(),
            text,
        });
        Ok(self.notes.last().expect("just pushed"))
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn edit_note(&mut self, id: &str, text: impl Into<String>) -> Result<(), ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "text" });
        }
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| unknown("note", id))?;
        note.text = text;
        Ok(())
    }

    pub fn delete_note(&mut self, id: &str) -> Result<(), ValidationError> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Err(unknown("note", id));
        }
        Ok(())
    }
}

fn unknown(kind: &'static str, id: &str) -> ValidationError {
    ValidationError::UnknownId {
        kind,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> CourseDraft {
        CourseDraft {
            name: name.into(),
            color: Some(CourseColor::Blue),
            toast_icon: Some("TOAST".into()),
        }
    }

    #[test]
    fn course_creation_requires_all_fields() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.create_course(CourseDraft::default()),
            Err(ValidationError::IncompleteCourse)
        );
        assert_eq!(
            catalog.create_course(CourseDraft {
                name: "Physics".into(),
                color: Some(CourseColor::Red),
                toast_icon: None,
            }),
            Err(ValidationError::IncompleteCourse)
        );
        assert!(catalog.create_course(draft("Physics")).is_ok());
        assert_eq!(catalog.courses().len(), 1);
    }

    #[test]
    fn tasks_attach_to_their_course() {
        let mut catalog = Catalog::new();
        let course_id = catalog.create_course(draft("Math")).unwrap().id.clone();
        let other_id = catalog.create_course(draft("History")).unwrap().id.clone();

        catalog
            .add_task(&course_id, "Problem set 3", "chapters 4-5", Utc::now())
            .unwrap();
        assert_eq!(catalog.tasks_for(&course_id).count(), 1);
        assert_eq!(catalog.tasks_for(&other_id).count(), 0);
    }

    #[test]
    fn empty_task_title_is_rejected() {
        let mut catalog = Catalog::new();
        let course_id = catalog.create_course(draft("Math")).unwrap().id.clone();
        assert_eq!(
            catalog.add_task(&course_id, "   ", "", Utc::now()),
            Err(ValidationError::EmptyField { field: "title" })
        );
    }

    #[test]
    fn task_for_unknown_course_is_rejected() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.add_task("nope", "Read", "", Utc::now()),
            Err(ValidationError::UnknownId { kind: "course", .. })
        ));
    }

    #[test]
    fn toggle_flips_completion() {
        let mut catalog = Catalog::new();
        let course_id = catalog.create_course(draft("Math")).unwrap().id.clone();
        let task_id = catalog
            .add_task(&course_id, "Revise", "", Utc::now())
            .unwrap()
            .id
            .clone();
        assert_eq!(catalog.toggle_task(&task_id), Ok(true));
        assert_eq!(catalog.toggle_task(&task_id), Ok(false));
    }

    #[test]
    fn deleting_a_course_drops_its_tasks() {
        let mut catalog = Catalog::new();
        let course_id = catalog.create_course(draft("Math")).unwrap().id.clone();
        catalog
            .add_task(&course_id, "Revise", "", Utc::now())
            .unwrap();
        catalog.delete_course(&course_id).unwrap();
        assert!(catalog.courses().is_empty());
        assert_eq!(catalog.tasks_for(&course_id).count(), 0);
    }

    #[test]
    fn notes_crud() {
        let mut catalog = Catalog::new();
        assert!(catalog.add_note("  ").is_err());
        let id = catalog.add_note("buy bread").unwrap().id.clone();
        catalog.edit_note(&id, "buy more bread").unwrap();
        assert_eq!(catalog.notes()[0].text, "buy more bread");
        catalog.delete_note(&id).unwrap();
        assert!(catalog.notes().is_empty());
        assert!(catalog.delete_note(&id).is_err());
    }
}
