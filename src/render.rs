//! Plain-text rendering of a board, one section per stage.

use crate::board::{Board, BoardObserver};
use crate::models::Task;

const NO_DESCRIPTION: &str = "No description provided.";

/// Render every stage in order with its cards.
///
/// Example output:
/// ```text
/// == Planning (1) ==
/// [planning-design-schema] Design Schema
///     Tables for users and sessions
/// == Development (0) ==
/// == QA (0) ==
/// == Deployment (0) ==
/// ```
pub fn render_board(board: &Board) -> String {
    let mut output = String::new();
    for (stage, tasks) in board.lanes() {
        output.push_str(&format!("== {} ({}) ==\n", stage.label(), tasks.len()));
        for task in tasks {
            render_card(&mut output, task);
        }
    }
    output
}

fn render_card(output: &mut String, task: &Task) {
    output.push_str(&format!("[{}] {}\n", task.id(), task.title()));
    let description = if task.description().is_empty() {
        NO_DESCRIPTION
    } else {
        task.description()
    };
    for line in description.lines() {
        output.push_str("    ");
        output.push_str(line);
        output.push('\n');
    }
}

/// Observer that prints the rendered board to stdout on each refresh.
#[derive(Debug, Default)]
pub struct PrintObserver;

impl BoardObserver for PrintObserver {
    fn refresh(&mut self, board: &Board) {
        print!("{}", render_board(board));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stage;

    #[test]
    fn test_empty_board() {
        let output = render_board(&Board::new());
        assert_eq!(
            output,
            "== Planning (0) ==\n== Development (0) ==\n== QA (0) ==\n== Deployment (0) ==\n"
        );
    }

    #[test]
    fn test_cards_under_their_stage() {
        let mut board = Board::new();
        board.add_task(Task::new("Design Schema", "Tables\nIndexes", Stage::Planning));
        board.add_task(Task::new("Ship", "", Stage::Deployment));

        let output = render_board(&board);
        let expected = "== Planning (1) ==\n\
                        [planning-design-schema] Design Schema\n    Tables\n    Indexes\n\
                        == Development (0) ==\n\
                        == QA (0) ==\n\
                        == Deployment (1) ==\n\
                        [deployment-ship] Ship\n    No description provided.\n";
        assert_eq!(output, expected);
    }
}
