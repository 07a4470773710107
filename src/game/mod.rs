mod direction;
mod food;
mod paused;
mod playfield;
mod snake;
use self::direction::Direction;
use self::food::place_food;
use self::paused::Paused;
use self::playfield::{Cell, Playfield};
use self::snake::Snake;
use crate::app::AppState;
use crate::command::Command;
use crate::consts;
use crate::leaderboard::{Leaderboard, SaveError, ScoreEntry};
use crate::util::center_rect;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    playfield: Playfield,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    /// Ticks per second
    speed: u32,
    state: GameState,
    /// Where to record final scores; `None` if scores are not being saved
    leaderboard: Option<Leaderboard>,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(leaderboard: Option<Leaderboard>) -> Self {
        Game::new_with_rng(Playfield::STANDARD, leaderboard, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    fn new_with_rng(
        playfield: Playfield,
        leaderboard: Option<Leaderboard>,
        rng: R,
    ) -> Game<R> {
        log::info!("Starting new game");
        let mut game = Game {
            rng,
            playfield,
            snake: Snake::initial(),
            food: None,
            score: 0,
            speed: consts::BASE_SPEED,
            state: GameState::Running,
            leaderboard,
            next_tick: None,
        };
        game.food = place_food(&mut game.rng, game.playfield, &game.snake);
        game
    }

    /// Wait for either the next input event or the next tick, whichever comes
    /// first, and act on it.  While the snake isn't moving, this blocks until
    /// an event arrives.
    ///
    /// Returns `Some` if the application should switch to a new state.
    pub(crate) fn process_input(&mut self) -> anyhow::Result<Option<AppState>> {
        if self.running() {
            let period = self.tick_period();
            let when = *self.next_tick.get_or_insert_with(|| Instant::now() + period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.next_tick = None;
                self.advance()?;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Move the snake forwards one cell, eating any food in its way.  If the
    /// snake crashes, the game ends and the score is recorded.
    fn advance(&mut self) -> Result<(), SaveError> {
        if !self.running() {
            return Ok(());
        }
        self.snake.commit_direction();
        let head = self.snake.next_head(self.playfield.cell_size);
        if self.snake.occupies(head) || !self.playfield.contains(head) {
            return self.end();
        }
        let ate = self.food == Some(head);
        self.snake.advance_to(head, ate);
        if ate {
            self.score += 1;
            self.speed = consts::BASE_SPEED + self.score / consts::SPEEDUP_INTERVAL;
            self.food = place_food(&mut self.rng, self.playfield, &self.snake);
            if self.food.is_none() {
                log::info!("Snake fills the playfield");
                return self.end();
            }
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), SaveError> {
        log::info!(
            "Game over; final score: {}, snake length: {}",
            self.score,
            self.snake.len()
        );
        self.state = GameState::GameOver;
        if let Some(ref leaderboard) = self.leaderboard {
            leaderboard.record(self.score)?;
        }
        Ok(())
    }

    fn restart(&mut self) {
        log::info!("Restarting game");
        self.snake = Snake::initial();
        self.score = 0;
        self.speed = consts::BASE_SPEED;
        self.state = GameState::Running;
        self.next_tick = None;
        self.food = place_food(&mut self.rng, self.playfield, &self.snake);
    }

    fn handle_event(&mut self, event: Event) -> Option<AppState> {
        if event == Event::FocusLost {
            if self.running() {
                self.toggle_pause();
            }
            return None;
        }
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(AppState::Quit),
            Command::Pause => self.toggle_pause(),
            Command::Up => self.turn(Direction::Up),
            Command::Down => self.turn(Direction::Down),
            Command::Left => self.turn(Direction::Left),
            Command::Right => self.turn(Direction::Right),
            Command::Enter if self.is_over() => self.restart(),
            Command::Esc if self.is_over() => return Some(AppState::Quit),
            Command::Enter | Command::Esc => (),
        }
        None
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Has the snake crashed?  This is also true while the leaderboard is
    /// being viewed after the game ended.
    fn crashed(&self) -> bool {
        match self.state {
            GameState::Running => false,
            GameState::Paused(ref paused) => paused.game_over(),
            GameState::GameOver => true,
        }
    }

    /// Time between movements of the snake at the current speed
    fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.speed.max(1)
    }

    /// The speed as shown to the player, starting from 1
    fn speed_level(&self) -> u32 {
        self.speed.saturating_sub(consts::BASE_SPEED) + 1
    }

    fn turn(&mut self, direction: Direction) {
        if self.running() && !self.snake.turn(direction) {
            log::trace!("Ignoring turn {direction:?} while moving {:?}", self.snake.direction);
        }
    }

    fn toggle_pause(&mut self) {
        self.state = match std::mem::replace(&mut self.state, GameState::Running) {
            GameState::Running => {
                log::debug!("Pausing game");
                GameState::Paused(Paused::new(self.load_scores(), false))
            }
            GameState::GameOver => GameState::Paused(Paused::new(self.load_scores(), true)),
            GameState::Paused(paused) if paused.game_over() => GameState::GameOver,
            GameState::Paused(_) => {
                log::debug!("Resuming game");
                GameState::Running
            }
        };
        self.next_tick = None;
    }

    /// Read the leaderboard for display.  Failures are logged and shown as an
    /// empty leaderboard.
    fn load_scores(&self) -> Vec<ScoreEntry> {
        let Some(ref leaderboard) = self.leaderboard else {
            return Vec::new();
        };
        leaderboard.load().unwrap_or_else(|e| {
            log::warn!("{:#}", anyhow::Error::new(e));
            Vec::new()
        })
    }

    fn help_line(&self) -> Line<'static> {
        let keys: &[(&'static str, &'static str)] = match self.state {
            GameState::Running => &[("p", "Pause"), ("Ctrl-C", "Quit")],
            GameState::Paused(_) => &[("p", "Resume"), ("Ctrl-C", "Quit")],
            GameState::GameOver => &[("Enter", "Restart"), ("Esc", "Quit"), ("p", "Scores")],
        };
        let mut line = Line::default();
        for (i, &(key, action)) in keys.iter().enumerate() {
            line.push_span(if i == 0 { " " } else { "   " });
            line.push_span(Span::styled(key, consts::KEY_STYLE));
            line.push_span(format!(": {action}"));
        }
        line
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.playfield.grid_size();
        let score_rows = self.playfield.scoreboard_rows();
        let level_width = grid.width.saturating_mul(consts::CELL_COLUMNS);
        let display = center_rect(
            area,
            Size {
                width: level_width.saturating_add(2),
                height: score_rows.saturating_add(grid.height).saturating_add(3),
            },
        );
        let [score_area, block_area, help_area] = Layout::vertical([
            Constraint::Length(score_rows),
            Constraint::Length(grid.height.saturating_add(2)),
            Constraint::Length(1),
        ])
        .areas(display);

        buf.set_style(score_area, consts::SCORE_BAR_STYLE);
        if let Some(row) = score_area.rows().next() {
            Line::from(format!(" Score: {}", self.score)).render(row, buf);
            Line::from(format!("Speed: {} ", self.speed_level()))
                .right_aligned()
                .render(row, buf);
        }

        Block::bordered()
            .border_style(consts::BORDER_STYLE)
            .render(block_area, buf);
        let level_area = block_area.inner(Margin::new(1, 1));
        let mut level = Canvas {
            area: level_area,
            buf,
            playfield: self.playfield,
        };
        for &cell in &self.snake.tail {
            level.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(food) = self.food {
            level.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        if self.crashed() {
            level.draw_cell(
                self.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            level.draw_cell(
                self.snake.head(),
                consts::SNAKE_HEAD_SYMBOL,
                consts::SNAKE_STYLE,
            );
        }

        match self.state {
            GameState::Running => (),
            GameState::Paused(ref paused) => {
                let pause_area = center_rect(
                    level_area,
                    Size {
                        width: Paused::WIDTH,
                        height: paused.height(),
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::GameOver => {
                if let Some(row) = level_area.rows().nth(usize::from(level_area.height / 2)) {
                    Line::from(Span::styled(consts::GAME_OVER_BANNER, consts::BANNER_STYLE))
                        .centered()
                        .render(row, buf);
                }
            }
        }

        self.help_line().render(help_area, buf);
    }
}

/// Helper for drawing playfield cells into the area inside the border
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    playfield: Playfield,
}

impl Canvas<'_> {
    /// Draw `symbol` at `cell`, one character per terminal column
    fn draw_cell(&mut self, cell: Cell, symbol: &str, style: Style) {
        let Some(Position { x, y }) = self.playfield.grid_position(cell) else {
            return;
        };
        let Some(x) = x
            .checked_mul(consts::CELL_COLUMNS)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        for (i, ch) in (0..consts::CELL_COLUMNS).zip(symbol.chars()) {
            let Some(x) = x.checked_add(i) else {
                return;
            };
            if !self.area.contains(Position { x, y }) {
                return;
            }
            if let Some(c) = self.buf.cell_mut((x, y)) {
                c.set_char(ch);
                c.set_style(style);
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    /// The leaderboard is being shown.  Play is suspended until the pause key
    /// is pressed again.
    Paused(Paused),
    GameOver,
}
