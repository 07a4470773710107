use super::direction::Direction;
use super::playfield::Cell;
use crate::consts;
use std::collections::VecDeque;

/// The snake: where it is and where it's going.
///
/// All positions are in playfield units; see [`Cell`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of the rest of the snake's body, starting with the cell
    /// just behind the head and ending with the tip of the tail
    pub(super) tail: VecDeque<Cell>,

    /// The direction in which the snake moved on the most recent tick
    pub(super) direction: Direction,

    /// The direction in which the snake will move on the next tick
    pub(super) next_direction: Direction,
}

impl Snake {
    /// Create a new snake with its head at `head`, the rest of its body at
    /// `tail`, and travelling in `direction`
    pub(super) fn new<I>(head: Cell, tail: I, direction: Direction) -> Snake
    where
        I: IntoIterator<Item = Cell>,
    {
        Snake {
            head,
            tail: tail.into_iter().collect(),
            direction,
            next_direction: direction,
        }
    }

    /// Create the snake that every game starts with, moving right
    pub(super) fn initial() -> Snake {
        let [head, tail @ ..] = consts::INITIAL_SNAKE;
        Snake::new(
            Cell::from(head),
            tail.into_iter().map(Cell::from),
            Direction::Right,
        )
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Cell {
        self.head
    }

    /// Iterate over all cells of the snake, head first
    pub(super) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.tail.iter().copied())
    }

    /// Return the number of cells the snake occupies
    pub(super) fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Does any part of the snake occupy `cell`?
    pub(super) fn occupies(&self, cell: Cell) -> bool {
        self.head == cell || self.tail.contains(&cell)
    }

    /// Ask the snake to face `direction` on the next tick.  The request is
    /// only accepted if `direction` is at right angles to the direction the
    /// snake is currently moving; returns whether it was.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_orthogonal_to(direction) {
            self.next_direction = direction;
            true
        } else {
            false
        }
    }

    /// Make the most recently accepted turn take effect
    pub(super) fn commit_direction(&mut self) {
        self.direction = self.next_direction;
    }

    /// Return the cell the head would move into on a grid with cells of side
    /// `cell_size`
    pub(super) fn next_head(&self, cell_size: i32) -> Cell {
        self.head.offset(self.direction.offset(cell_size))
    }

    /// Move the head to `head`.  Unless `grow` is true, the last cell of the
    /// tail is vacated.
    pub(super) fn advance_to(&mut self, head: Cell, grow: bool) {
        self.tail.push_front(self.head);
        self.head = head;
        if !grow {
            let _ = self.tail.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn initial_snake() {
        let snake = Snake::initial();
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [Cell::new(100, 100), Cell::new(80, 100)]
        );
        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn advance_without_growing() {
        let mut snake = Snake::initial();
        let head = snake.next_head(20);
        assert_eq!(head, Cell::new(120, 100));
        snake.advance_to(head, false);
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [Cell::new(120, 100), Cell::new(100, 100)]
        );
    }

    #[test]
    fn advance_and_grow() {
        let mut snake = Snake::initial();
        let head = snake.next_head(20);
        snake.advance_to(head, true);
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [Cell::new(120, 100), Cell::new(100, 100), Cell::new(80, 100)]
        );
    }

    #[rstest]
    #[case(Direction::Right, Direction::Left)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    fn reversal_rejected(#[case] current: Direction, #[case] requested: Direction) {
        let mut snake = Snake::new(Cell::new(100, 100), [], current);
        assert!(!snake.turn(requested));
        assert_eq!(snake.next_direction, current);
        snake.commit_direction();
        assert_eq!(snake.direction, current);
    }

    #[test]
    fn turn_takes_effect_on_commit() {
        let mut snake = Snake::initial();
        assert!(snake.turn(Direction::Up));
        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(snake.next_head(20), Cell::new(120, 100));
        snake.commit_direction();
        assert_eq!(snake.direction, Direction::Up);
        assert_eq!(snake.next_head(20), Cell::new(100, 80));
    }

    #[test]
    fn second_turn_checked_against_current_direction() {
        let mut snake = Snake::initial();
        assert!(snake.turn(Direction::Up));
        // Still moving right, so a left turn would be a reversal
        assert!(!snake.turn(Direction::Left));
        assert!(snake.turn(Direction::Down));
        snake.commit_direction();
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn occupies() {
        let snake = Snake::initial();
        assert!(snake.occupies(Cell::new(100, 100)));
        assert!(snake.occupies(Cell::new(80, 100)));
        assert!(!snake.occupies(Cell::new(120, 100)));
    }
}
