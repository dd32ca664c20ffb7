//! The board aggregate and the session that persists it.
//!
//! [`Board`] is plain in-memory state: one append-only lane per [`Stage`].
//! [`BoardSession`] wraps a board together with its store and observers and
//! is what collaborators talk to.

mod session;

pub use session::*;

use crate::error::UnknownStageGroupError;
use crate::models::{parse_stage, Stage, Task, TaskId, TaskRecord, TaskUpdate};

/// What an applied [`TaskUpdate`] did to the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Fields were written in place; the task kept its lane and position.
    Edited,
    /// The task left `from` and was appended to `to`.
    Moved { from: Stage, to: Stage },
}

/// Four ordered lanes of tasks, one per stage.
///
/// Every task sits in exactly one lane and that lane matches its stage.
/// Lanes keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    lanes: [Vec<Task>; 4],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lane(&self, stage: Stage) -> &[Task] {
        &self.lanes[stage.index()]
    }

    /// Lanes in stage order.
    pub fn lanes(&self) -> impl Iterator<Item = (Stage, &[Task])> {
        Stage::ALL
            .into_iter()
            .map(move |stage| (stage, self.lane(stage)))
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.lanes.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Vec::is_empty)
    }

    /// Append `task` to the lane of its stage.
    pub fn add_task(&mut self, task: Task) {
        self.lanes[task.stage().index()].push(task);
    }

    /// Rebuild a task from its plain record and append it.
    ///
    /// The id is recomputed from the record's title and stage; the record's
    /// own `id` is ignored.
    pub fn add_record(&mut self, record: &TaskRecord) -> Result<&Task, UnknownStageGroupError> {
        let stage =
            parse_stage(&record.stage).map_err(|e| UnknownStageGroupError(e.0))?;
        let lane = &mut self.lanes[stage.index()];
        lane.push(Task::new(
            record.title.clone(),
            record.description.clone(),
            stage,
        ));
        Ok(&lane[lane.len() - 1])
    }

    /// First task with `id`, scanning lanes in stage order.
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.locate(id).map(|(stage, pos)| &self.lanes[stage.index()][pos])
    }

    /// Remove the first task with `id`, scanning lanes in stage order.
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let (stage, pos) = self.locate(id)?;
        Some(self.lanes[stage.index()].remove(pos))
    }

    /// Remove the first task with `id`. Returns whether one was found.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        self.remove_task(id).is_some()
    }

    /// Apply `update` to the first task with `id`.
    ///
    /// A stage that differs from the current one is a move: the task is taken
    /// out of its lane and appended to the target lane. Its id stays as it was.
    /// Returns `None` when no task has `id`.
    pub fn update_task(&mut self, id: &TaskId, update: TaskUpdate) -> Option<UpdateOutcome> {
        let (stage, pos) = self.locate(id)?;

        let task = &mut self.lanes[stage.index()][pos];
        if let Some(title) = update.title {
            task.rename(title);
        }
        if let Some(description) = update.description {
            task.redescribe(description);
        }

        match update.stage {
            Some(target) if target != stage => {
                let mut task = self.lanes[stage.index()].remove(pos);
                task.set_stage(target);
                self.add_task(task);
                Some(UpdateOutcome::Moved {
                    from: stage,
                    to: target,
                })
            }
            _ => Some(UpdateOutcome::Edited),
        }
    }

    /// Plain records of one lane, in order.
    pub fn records(&self, stage: Stage) -> Vec<TaskRecord> {
        self.lane(stage).iter().map(Task::to_record).collect()
    }

    fn locate(&self, id: &TaskId) -> Option<(Stage, usize)> {
        Stage::ALL.into_iter().find_map(|stage| {
            self.lane(stage)
                .iter()
                .position(|task| task.id() == id)
                .map(|pos| (stage, pos))
        })
    }
}
