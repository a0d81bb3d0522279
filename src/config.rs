use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::grid::Board;

/// Board width in board units.
pub const BOARD_WIDTH: i32 = 800;

/// Board height in board units.
pub const BOARD_HEIGHT: i32 = 600;

/// Side length of one cell in board units.
pub const CELL_SIZE: i32 = 25;

/// Side length of one obstacle; obstacles live on a grid twice as coarse as cells.
pub const OBSTACLE_SIZE: i32 = CELL_SIZE * 2;

/// The default playfield.
pub const DEFAULT_BOARD: Board = Board {
    width: BOARD_WIDTH,
    height: BOARD_HEIGHT,
    cell_size: CELL_SIZE,
};

/// Tick delay for a one-cell snake.
pub const INITIAL_TICK_DELAY_MS: u64 = 130;

/// Floor for the tick delay, reached once the snake is long enough.
pub const MIN_TICK_DELAY_MS: u64 = 50;

/// Tick delay reduction per body segment beyond the head.
pub const TICK_DELAY_STEP_MS: u64 = 5;

/// Points granted by ordinary food.
pub const FOOD_POINTS: u32 = 1;

/// Points granted by a banana.
pub const BONUS_POINTS: u32 = 3;

/// Minimum score before any banana appears.
pub const BONUS_MIN_SCORE: u32 = 5;

/// Food points that must be eaten between two bananas.
pub const BONUS_PACING_POINTS: u32 = 3;

/// How long an uneaten banana stays on the board.
pub const BONUS_LIFETIME: Duration = Duration::from_millis(5000);

/// How long the level-up briefing is shown.
pub const LEVEL_UP_DISPLAY: Duration = Duration::from_millis(3000);

/// How long the resume countdown lasts.
pub const COUNTDOWN_DURATION: Duration = Duration::from_millis(3000);

/// Segment count of the wandering viper.
pub const HAZARD_LENGTH: usize = 3;

/// Minimum time between two viper moves.
pub const HAZARD_MOVE_INTERVAL: Duration = Duration::from_millis(500);

/// Obstacles dropped per generation event.
pub const OBSTACLE_COUNT: usize = 3;

/// Random samples tried before placement falls back to a full board scan.
pub const PLACEMENT_ATTEMPTS: usize = 512;

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub hazard_head: Color,
    pub hazard_body: Color,
    pub food: Color,
    pub bonus: Color,
    pub obstacle: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub hud_alert: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake, orange viper and grey stones on a dark field.
pub const THEME_MEADOW: Theme = Theme {
    snake_head: Color::Rgb(0, 204, 0),
    snake_body: Color::Rgb(0, 102, 0),
    hazard_head: Color::Rgb(255, 165, 0),
    hazard_body: Color::Rgb(255, 140, 0),
    food: Color::Red,
    bonus: Color::Yellow,
    obstacle: Color::Gray,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    hud_alert: Color::Yellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Plain border with a heavier outline around the play area.
pub const BORDER_PLAYFIELD: border::Set = border::THICK;

/// Glyph pair for one snake or viper segment (a cell is two columns wide).
pub const GLYPH_SEGMENT: &str = "██";

/// Glyph pair for the snake head.
pub const GLYPH_HEAD: &str = "▓▓";

/// Glyph pair for food.
pub const GLYPH_FOOD: &str = "()";

/// Glyph pair for a banana.
pub const GLYPH_BONUS: &str = "))";

/// Glyph pair for each cell covered by a stone.
pub const GLYPH_OBSTACLE: &str = "▒▒";

/// Terminal columns used to draw one cell.
pub const COLUMNS_PER_CELL: u16 = 2;
