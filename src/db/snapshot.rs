//! Whole-board snapshots under a single key.
//!
//! The stored value is JSON of the form
//! `{"planning": [...], "development": [...], "qa": [...], "deployment": [...]}`
//! with each task as `{id, title, description, stage}`. There is no version
//! field. Every save overwrites the previous snapshot.

use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::board::Board;
use crate::error::BoardResult;
use crate::models::{Stage, TaskRecord};

/// Key the board snapshot is stored under.
pub const BOARD_KEY: &str = "taskboard";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub planning: Vec<TaskRecord>,
    pub development: Vec<TaskRecord>,
    pub qa: Vec<TaskRecord>,
    pub deployment: Vec<TaskRecord>,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Self {
        Self {
            planning: board.records(Stage::Planning),
            development: board.records(Stage::Development),
            qa: board.records(Stage::Qa),
            deployment: board.records(Stage::Deployment),
        }
    }

    pub fn lane(&self, stage: Stage) -> &[TaskRecord] {
        match stage {
            Stage::Planning => &self.planning,
            Stage::Development => &self.development,
            Stage::Qa => &self.qa,
            Stage::Deployment => &self.deployment,
        }
    }

    /// Rebuild a board, recomputing every task id from its title and stage.
    ///
    /// A record filed under a lane other than its own stage is placed by its
    /// stage.
    pub fn restore(&self) -> BoardResult<Board> {
        let mut board = Board::new();
        for lane in Stage::ALL {
            for record in self.lane(lane) {
                let task = board.add_record(record)?;
                if task.stage() != lane {
                    tracing::warn!(
                        id = %task.id(),
                        lane = %lane,
                        stage = %task.stage(),
                        "Snapshot record filed under the wrong lane"
                    );
                }
            }
        }
        Ok(board)
    }
}

/// Write the whole board under [`BOARD_KEY`].
pub fn save<S: KeyValueStore + ?Sized>(board: &Board, store: &S) -> BoardResult<()> {
    let json = serde_json::to_string(&BoardSnapshot::capture(board))
        .map_err(crate::error::StoreError::from)?;
    store.put(BOARD_KEY, &json)?;
    tracing::debug!("Saved snapshot of {} tasks", board.len());
    Ok(())
}

/// Read the board under [`BOARD_KEY`]. A missing key gives an empty board.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> BoardResult<Board> {
    let Some(json) = store.get(BOARD_KEY)? else {
        tracing::debug!("No snapshot stored, starting with an empty board");
        return Ok(Board::new());
    };
    let snapshot: BoardSnapshot =
        serde_json::from_str(&json).map_err(crate::error::StoreError::from)?;
    snapshot.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::{BoardError, StoreError, UnknownStageGroupError};
    use crate::models::{Task, TaskId, TaskUpdate};

    #[test]
    fn test_load_from_empty_store() {
        let board = load(&MemoryStore::new()).unwrap();
        assert!(board.is_empty());
        assert_eq!(board.lanes().count(), 4);
    }

    #[test]
    fn test_saved_json_has_the_four_lanes() {
        let store = MemoryStore::new();
        let mut board = Board::new();
        board.add_task(Task::new("Write tests", "unit", Stage::Qa));
        save(&board, &store).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&store.get(BOARD_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(json["planning"], serde_json::json!([]));
        assert_eq!(json["development"], serde_json::json!([]));
        assert_eq!(json["deployment"], serde_json::json!([]));
        assert_eq!(
            json["qa"],
            serde_json::json!([{
                "id": "qa-write-tests",
                "title": "Write tests",
                "description": "unit",
                "stage": "qa"
            }])
        );
    }

    #[test]
    fn test_reload_recomputes_id_after_rename() {
        let store = MemoryStore::new();
        let mut board = Board::new();
        board.add_task(Task::new("Old", "", Stage::Planning));
        board.update_task(&TaskId::from("planning-old"), TaskUpdate::title("New"));
        save(&board, &store).unwrap();

        let reloaded = load(&store).unwrap();
        assert_eq!(reloaded.lane(Stage::Planning)[0].id().as_str(), "planning-new");
    }

    #[test]
    fn test_misfiled_record_is_placed_by_stage() {
        let store = MemoryStore::new();
        store
            .put(
                BOARD_KEY,
                r#"{"planning":[{"id":"x","title":"T","description":"","stage":"qa"}],
                    "development":[],"qa":[],"deployment":[]}"#,
            )
            .unwrap();

        let board = load(&store).unwrap();
        assert!(board.lane(Stage::Planning).is_empty());
        assert_eq!(board.lane(Stage::Qa)[0].id().as_str(), "qa-t");
    }

    #[test]
    fn test_unknown_stage_fails_load() {
        let store = MemoryStore::new();
        store
            .put(
                BOARD_KEY,
                r#"{"planning":[],"development":[],
                    "qa":[{"id":"sqa-t","title":"T","description":"","stage":"sqa"}],
                    "deployment":[]}"#,
            )
            .unwrap();

        let err = load(&store).unwrap_err();
        assert!(matches!(
            err,
            BoardError::UnknownStageGroup(UnknownStageGroupError(ref s)) if s == "sqa"
        ));
    }

    #[test]
    fn test_malformed_snapshot_fails_load() {
        let store = MemoryStore::new();
        store.put(BOARD_KEY, "not json").unwrap();
        assert!(matches!(
            load(&store),
            Err(BoardError::Store(StoreError::Json(_)))
        ));
    }
}
