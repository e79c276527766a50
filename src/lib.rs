//! Nian Blast - a Lunar New Year Bomberman-style maze game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, bombs, game state)
//! - `render`: Couplet library + Canvas-2D rendering (renderer is wasm only)
//! - `settings`: Persisted preferences
//! - `highscores`: LocalStorage leaderboard

pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the display loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Maze dimensions
    pub const GRID_ROWS: i32 = 9;
    pub const GRID_COLS: i32 = 11;
    /// Cell size in CSS pixels
    pub const CELL_SIZE: f32 = 40.0;

    /// Probability that a free interior cell is generated as a brick
    pub const BRICK_PROBABILITY: f32 = 0.4;
    /// Cells with row <= SAFE_ZONE and col <= SAFE_ZONE stay clear of bricks
    pub const SAFE_ZONE: i32 = 2;

    /// Player spawn cell
    pub const PLAYER_SPAWN_ROW: i32 = 1;
    pub const PLAYER_SPAWN_COL: i32 = 1;

    /// Per-tick lerp factors for smoothed grid movement
    pub const PLAYER_LERP: f32 = 0.15;
    pub const ENEMY_LERP: f32 = 0.10;
    /// Transit completion thresholds (pixel distance to target)
    pub const PLAYER_ARRIVE_EPSILON: f32 = 0.1;
    pub const ENEMY_ARRIVE_EPSILON: f32 = 0.5;

    /// Speed buff granted when an enemy is defeated
    pub const SPEED_BUFF_FACTOR: f32 = 1.5;
    pub const SPEED_BUFF_TICKS: u32 = 300;

    /// Bomb fuse (3 seconds at 60 Hz)
    pub const BOMB_FUSE_TICKS: u32 = 180;
    /// Explosion ray range in cells
    pub const BOMB_RANGE: i32 = 2;
    /// Explosion hazard lifetime (0.5 seconds)
    pub const EXPLOSION_TICKS: u32 = 30;

    /// Couplet cutscene duration (2 seconds)
    pub const CUTSCENE_TICKS: u32 = 120;

    /// Enemies per game
    pub const ENEMY_COUNT: usize = 3;
    /// Minimum Manhattan distance between enemy spawn and player spawn
    pub const ENEMY_MIN_SPAWN_DISTANCE: i32 = 5;
    /// Pause between enemy steps (200 ms at 60 Hz)
    pub const ENEMY_PAUSE_TICKS: u32 = 12;

    /// Proximity radii (pixels)
    pub const ITEM_PICKUP_RADIUS: f32 = CELL_SIZE * 0.5;
    pub const ENEMY_CONTACT_RADIUS: f32 = CELL_SIZE * 0.6;

    /// Red envelope value
    pub const ITEM_POINTS: u64 = 888;
}

/// Pixel center of a grid cell
#[inline]
pub fn cell_center(row: i32, col: i32) -> Vec2 {
    Vec2::new(
        col as f32 * consts::CELL_SIZE + consts::CELL_SIZE / 2.0,
        row as f32 * consts::CELL_SIZE + consts::CELL_SIZE / 2.0,
    )
}

/// Canvas dimensions in CSS pixels
#[inline]
pub fn canvas_size() -> (f32, f32) {
    (
        consts::GRID_COLS as f32 * consts::CELL_SIZE,
        consts::GRID_ROWS as f32 * consts::CELL_SIZE,
    )
}
