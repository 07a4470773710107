use super::playfield::{Cell, Playfield};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};

/// Pick a cell of `playfield` for the food that is not occupied by `snake`.
///
/// Random cells are drawn until a free one turns up, up to
/// [`MAX_FOOD_ATTEMPTS`][consts::MAX_FOOD_ATTEMPTS] times; after that, a free
/// cell is chosen from an exhaustive scan of the playfield.  Returns `None`
/// if the snake covers the entire playfield.
pub(super) fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    playfield: Playfield,
    snake: &Snake,
) -> Option<Cell> {
    for _ in 0..consts::MAX_FOOD_ATTEMPTS {
        let cell = playfield.random_cell(rng);
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }
    log::debug!(
        "No free cell found in {} random draws; scanning playfield",
        consts::MAX_FOOD_ATTEMPTS
    );
    playfield
        .cells()
        .filter(|&cell| !snake.occupies(cell))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    const SMALL: Playfield = Playfield {
        width: 100,
        height: 60,
        cell_size: 20,
        scoreboard_height: 40,
    };

    /// Build a snake covering every cell of `playfield` except those in
    /// `free`
    fn snake_covering(playfield: Playfield, free: &[Cell]) -> Snake {
        let mut cells = playfield.cells().filter(|c| !free.contains(c));
        let head = cells.next().expect("playfield should have an occupied cell");
        Snake::new(head, cells, Direction::Right)
    }

    #[test]
    fn food_avoids_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake::initial();
        for _ in 0..500 {
            let food = place_food(&mut rng, Playfield::STANDARD, &snake).unwrap();
            assert!(Playfield::STANDARD.contains(food));
            assert!(!snake.occupies(food), "food placed on snake at {food:?}");
        }
    }

    #[test]
    fn single_free_cell_is_found() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let free = Cell::new(60, 80);
        let snake = snake_covering(SMALL, &[free]);
        assert_eq!(snake.len(), 14);
        assert_eq!(place_food(&mut rng, SMALL, &snake), Some(free));
    }

    #[test]
    fn full_playfield_has_no_room() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = snake_covering(SMALL, &[]);
        assert_eq!(snake.len(), 15);
        assert_eq!(place_food(&mut rng, SMALL, &snake), None);
    }
}
