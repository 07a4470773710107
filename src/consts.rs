//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};

/// Side length of one grid cell, in playfield units
pub(crate) const CELL_SIZE: i32 = 20;

/// Width of the playfield, in playfield units
pub(crate) const PLAYFIELD_WIDTH: i32 = 640;

/// Height of the playfield (not counting the scoreboard strip), in playfield
/// units
pub(crate) const PLAYFIELD_HEIGHT: i32 = 480;

/// Height of the scoreboard strip above the playfield, in playfield units.
/// The snake and the food may never occupy this strip.
pub(crate) const SCOREBOARD_HEIGHT: i32 = 40;

/// Snake speed, in ticks per second, at the start of a game
pub(crate) const BASE_SPEED: u32 = 10;

/// The speed goes up by one each time the score passes a multiple of this
pub(crate) const SPEEDUP_INTERVAL: u32 = 10;

/// Cells of the snake at the start of a game, head first
pub(crate) const INITIAL_SNAKE: [(i32, i32); 2] = [
    (CELL_SIZE * 5, CELL_SIZE * 5),
    (CELL_SIZE * 4, CELL_SIZE * 5),
];

/// How many random draws to make when placing food before falling back to
/// scanning the whole playfield for free cells
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 10_000;

/// Maximum number of entries kept in the leaderboard file
pub(crate) const LEADERBOARD_SIZE: usize = 10;

/// `strftime`-style format for leaderboard timestamps
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_COLUMNS: u16 = 2;

/// Glyphs for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: &str = "██";

/// Glyphs for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "▓▓";

/// Glyphs for the food
pub(crate) const FOOD_SYMBOL: &str = "()";

/// Glyphs for the snake's head once it has crashed
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Text shown in the middle of the playfield once the game is over
pub(crate) const GAME_OVER_BANNER: &str = "Game Over! Enter: Restart / Esc: Quit";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::Red);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for [`GAME_OVER_BANNER`]
pub(crate) const BANNER_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the border around the playfield
pub(crate) const BORDER_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for key names shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the scoreboard strip at the top of the screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
