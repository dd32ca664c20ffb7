use std::fmt;

use serde::{Deserialize, Serialize};

use super::{parse_stage, Stage};
use crate::error::InvalidStageError;

/// Identifier of a task, `<stage>-<slug(title)>` as of creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Lowercase `title` and replace each run of whitespace with a single `-`.
///
/// Leading and trailing runs are replaced too, so `" a b "` becomes `"-a-b-"`.
pub fn slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_gap = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                out.push('-');
                in_gap = true;
            }
        } else {
            in_gap = false;
            out.push(ch);
        }
    }
    out
}

/// A unit of work on the board.
///
/// The `id` is computed once in [`Task::new`] and never follows later edits
/// of `title` or `stage`. A task rebuilt from a snapshot gets a fresh id
/// computed from its current title and stage, so the two can diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    stage: Stage,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>, stage: Stage) -> Self {
        let title = title.into();
        let id = TaskId(format!("{}-{}", stage.as_str(), slug(&title)));
        Self {
            id,
            title,
            description: description.into(),
            stage,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Replace the title. The id is left as it was.
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn redescribe(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Move the task to the stage named by `target`.
    ///
    /// Returns the previous stage. An unknown name leaves the task untouched.
    pub fn transition_to(&mut self, target: &str) -> Result<Stage, InvalidStageError> {
        let stage = parse_stage(target)?;
        Ok(self.set_stage(stage))
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) -> Stage {
        std::mem::replace(&mut self.stage, stage)
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            stage: self.stage.as_str().to_string(),
        }
    }
}

/// Plain form of a task as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub stage: String,
}

/// Partial edit of a task. `None` leaves a field alone; `Some` always writes,
/// including `Some(String::new())`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub stage: Option<Stage>,
}

impl TaskUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn stage(stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.stage.is_none()
    }
}
