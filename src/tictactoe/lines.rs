//! Winning line generation for an N x N board

use super::{Board, Cell, Player};

/// Cached set of winning lines for one board size.
///
/// Lines are stored in check order: every row, every column, the down
/// diagonal (top-left to bottom-right), then the up diagonal (top-right to
/// bottom-left). Only the two main diagonals are generated, so on boards
/// larger than 3x3 shorter diagonals never count as wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLines {
    size: usize,
    lines: Vec<Vec<usize>>,
}

impl WinningLines {
    pub fn new(size: usize) -> Self {
        let mut lines = Vec::with_capacity(2 * size + 2);

        for row in 0..size {
            lines.push((0..size).map(|col| row * size + col).collect());
        }
        for col in 0..size {
            lines.push((0..size).map(|row| col + row * size).collect());
        }
        lines.push((0..size).map(|i| i * size + i).collect());
        lines.push((0..size).map(|i| (i + 1) * (size - 1)).collect());

        WinningLines { size, lines }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Owner of the first completed line in check order, if any
    pub fn winner(&self, board: &Board) -> Option<Player> {
        let cells = board.cells();
        self.iter().find_map(|line| {
            let first = cells[*line.first()?];
            if first == Cell::Empty {
                return None;
            }
            if line.iter().all(|&idx| cells[idx] == first) {
                first.player()
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn board_with(size: usize, marks: &[(usize, Cell)]) -> Board {
        let mut board = Board::new(size);
        for &(pos, cell) in marks {
            board.set(pos, cell);
        }
        board
    }

    #[test]
    fn test_line_count_and_width() {
        for size in 1..=6 {
            let lines = WinningLines::new(size);
            assert_eq!(lines.len(), 2 * size + 2);
            for line in lines.iter() {
                assert_eq!(line.len(), size);
                let distinct: HashSet<_> = line.iter().collect();
                assert_eq!(distinct.len(), size);
                assert!(line.iter().all(|&idx| idx < size * size));
            }
        }
    }

    #[test]
    fn test_three_by_three_lines_in_check_order() {
        let lines: Vec<Vec<usize>> = WinningLines::new(3).iter().map(<[usize]>::to_vec).collect();
        assert_eq!(
            lines,
            vec![
                vec![0, 1, 2],
                vec![3, 4, 5],
                vec![6, 7, 8],
                vec![0, 3, 6],
                vec![1, 4, 7],
                vec![2, 5, 8],
                vec![0, 4, 8],
                vec![2, 4, 6],
            ]
        );
    }

    #[test]
    fn test_four_by_four_diagonals() {
        let lines: Vec<Vec<usize>> = WinningLines::new(4).iter().map(<[usize]>::to_vec).collect();
        assert_eq!(lines[8], vec![0, 5, 10, 15]);
        assert_eq!(lines[9], vec![3, 6, 9, 12]);
    }

    #[test]
    fn test_winner_on_row_column_and_diagonal() {
        let lines = WinningLines::new(3);
        let row = board_with(3, &[(3, Cell::X), (4, Cell::X), (5, Cell::X)]);
        assert_eq!(lines.winner(&row), Some(Player::X));

        let col = board_with(3, &[(1, Cell::O), (4, Cell::O), (7, Cell::O)]);
        assert_eq!(lines.winner(&col), Some(Player::O));

        let diag = board_with(3, &[(2, Cell::O), (4, Cell::O), (6, Cell::O)]);
        assert_eq!(lines.winner(&diag), Some(Player::O));
    }

    #[test]
    fn test_no_winner_on_empty_or_mixed_lines() {
        let lines = WinningLines::new(3);
        assert_eq!(lines.winner(&Board::new(3)), None);

        let mixed = board_with(3, &[(0, Cell::X), (1, Cell::O), (2, Cell::X)]);
        assert_eq!(lines.winner(&mixed), None);
    }

    #[test]
    fn test_off_diagonal_is_not_a_win_on_larger_boards() {
        let lines = WinningLines::new(4);
        // Diagonal 1, 6, 11 is shorter than the board and never checked.
        let board = board_with(
            4,
            &[(1, Cell::X), (6, Cell::X), (11, Cell::X), (4, Cell::X)],
        );
        assert_eq!(lines.winner(&board), None);
    }
}
