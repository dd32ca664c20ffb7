use crate::db::{snapshot, KeyValueStore};
use crate::error::BoardResult;
use crate::models::{parse_stage, Stage, Task, TaskId, TaskUpdate};

use super::{Board, UpdateOutcome};

/// Receives the board after every committed mutation.
pub trait BoardObserver {
    fn refresh(&mut self, board: &Board);
}

impl<F: FnMut(&Board)> BoardObserver for F {
    fn refresh(&mut self, board: &Board) {
        self(board)
    }
}

/// The application's board: loaded once from a store, saved back in full
/// after each successful mutation, then pushed to the observers.
pub struct BoardSession<S: KeyValueStore> {
    board: Board,
    store: S,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl<S: KeyValueStore> BoardSession<S> {
    /// Load the board held by `store`, or start empty if it holds none.
    pub fn open(store: S) -> BoardResult<Self> {
        let board = snapshot::load(&store)?;
        tracing::info!("Loaded board with {} tasks", board.len());
        Ok(Self {
            board,
            store,
            observers: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, observer: impl BoardObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.board.find_task(id)
    }

    /// Push the current board to every observer without saving.
    pub fn refresh(&mut self) {
        for observer in &mut self.observers {
            observer.refresh(&self.board);
        }
    }

    /// Append a task built by a collaborator.
    pub fn add_task(&mut self, task: Task) -> BoardResult<()> {
        tracing::debug!(id = %task.id(), stage = %task.stage(), "Adding task");
        self.board.add_task(task);
        self.commit()
    }

    /// Build a task from form input and append it. Returns its derived id.
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        stage: Stage,
    ) -> BoardResult<TaskId> {
        let task = Task::new(title, description, stage);
        let id = task.id().clone();
        self.add_task(task)?;
        Ok(id)
    }

    /// Apply a partial edit. Returns `false` when no task has `id`.
    ///
    /// Anything short of a missing id is committed, including an update that
    /// changes nothing.
    pub fn edit_task(&mut self, id: &TaskId, update: TaskUpdate) -> BoardResult<bool> {
        let Some(outcome) = self.board.update_task(id, update) else {
            tracing::debug!(%id, "Edit skipped, no such task");
            return Ok(false);
        };

        match outcome {
            UpdateOutcome::Moved { from, to } => {
                tracing::debug!(%id, %from, %to, "Moved task");
            }
            UpdateOutcome::Edited => tracing::debug!(%id, "Edited task"),
        }

        self.commit()?;
        Ok(true)
    }

    /// Drag-and-drop path: move the task to `target` when it is elsewhere.
    ///
    /// Returns whether the task moved. Dropping onto its own lane, or an
    /// unknown id, commits nothing.
    pub fn drop_task(&mut self, id: &TaskId, target: Stage) -> BoardResult<bool> {
        let elsewhere = self
            .board
            .find_task(id)
            .is_some_and(|task| task.stage() != target);
        if !elsewhere {
            return Ok(false);
        }
        self.edit_task(id, TaskUpdate::stage(target))
    }

    /// Selection-control path: set the stage from an untrusted name.
    pub fn change_stage(&mut self, id: &TaskId, raw_stage: &str) -> BoardResult<bool> {
        let stage = parse_stage(raw_stage)?;
        self.edit_task(id, TaskUpdate::stage(stage))
    }

    /// Remove a task. Commits only when something was removed.
    pub fn delete_task(&mut self, id: &TaskId) -> BoardResult<bool> {
        if !self.board.delete_task(id) {
            tracing::debug!(%id, "Delete skipped, no such task");
            return Ok(false);
        }
        tracing::debug!(%id, "Deleted task");
        self.commit()?;
        Ok(true)
    }

    fn commit(&mut self) -> BoardResult<()> {
        snapshot::save(&self.board, &self.store)?;
        self.refresh();
        Ok(())
    }
}
