//! Game state and entity types
//!
//! Everything the tick mutates lives here. State is ephemeral: nothing is
//! persisted, a reload regenerates the maze from a fresh seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::{Actor, Mover};
use super::bomb::{Bomb, Explosion};
use super::grid::Grid;
use crate::cell_center;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// User pause (Escape / tab hidden)
    Paused,
    /// Couplet reward cutscene; gameplay frozen, rendering continues
    Cutscene,
    /// All enemies cleared
    Won,
    /// Caught by an explosion or an enemy
    Lost,
}

/// Events emitted by a tick, for the shell to turn into floating text,
/// HUD updates, and highscore writes. Purely informational; the sim never
/// reads them back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BombPlaced { row: i32, col: i32 },
    BricksDestroyed { count: u32 },
    EnemyDefeated { row: i32, col: i32 },
    ItemCollected { pos: Vec2, points: u64 },
    PlayerDied,
    Won,
}

/// The player: a mover plus a decaying speed buff
#[derive(Debug, Clone)]
pub struct Player {
    pub mover: Mover,
    /// Remaining speed-buff ticks (1.5x lerp while positive)
    pub speed_buff_ticks: u32,
}

impl Player {
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            mover: Mover::at_cell(row, col, PLAYER_LERP, PLAYER_ARRIVE_EPSILON),
            speed_buff_ticks: 0,
        }
    }

    /// Advance interpolation and decay the speed buff
    pub fn update(&mut self) {
        if self.speed_buff_ticks > 0 {
            self.mover.lerp = PLAYER_LERP * SPEED_BUFF_FACTOR;
            self.speed_buff_ticks -= 1;
        } else {
            self.mover.lerp = PLAYER_LERP;
        }
        self.mover.update();
    }

    #[inline]
    pub fn buff_active(&self) -> bool {
        self.speed_buff_ticks > 0
    }
}

impl Actor for Player {
    fn grid_pos(&self) -> (i32, i32) {
        (self.mover.row, self.mover.col)
    }
    fn pixel_pos(&self) -> Vec2 {
        self.mover.pixel
    }
}

/// A wandering Nian monster: random walk with a pause between steps
#[derive(Debug, Clone)]
pub struct Enemy {
    pub mover: Mover,
    /// Ticks to wait before the next step is considered
    pub pause_ticks: u32,
}

impl Enemy {
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            mover: Mover::at_cell(row, col, ENEMY_LERP, ENEMY_ARRIVE_EPSILON),
            pause_ticks: 0,
        }
    }

    /// Advance interpolation; once transit completes and the pause runs
    /// out, step uniformly at random among passable cardinal neighbors.
    pub fn update(&mut self, grid: &Grid, rng: &mut Pcg32) {
        self.mover.update();
        if self.mover.in_transit() {
            return;
        }
        if self.pause_ticks > 0 {
            self.pause_ticks -= 1;
            return;
        }

        use super::actor::Direction;
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| {
                let (dr, dc) = d.delta();
                grid.is_empty(self.mover.row + dr, self.mover.col + dc)
            })
            .collect();
        if !open.is_empty() {
            let dir = open[rng.random_range(0..open.len())];
            self.mover.try_step(dir, grid);
        }
        self.pause_ticks = ENEMY_PAUSE_TICKS;
    }
}

impl Actor for Enemy {
    fn grid_pos(&self) -> (i32, i32) {
        (self.mover.row, self.mover.col)
    }
    fn pixel_pos(&self) -> Vec2 {
        self.mover.pixel
    }
}

/// A dropped red envelope, collected on proximity
#[derive(Debug, Clone)]
pub struct Item {
    pub row: i32,
    pub col: i32,
    pub pixel: Vec2,
}

impl Item {
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            row,
            col,
            pixel: cell_center(row, col),
        }
    }
}

/// Number of couplets in the reward library (render side holds the text)
pub const COUPLET_COUNT: u32 = 10;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for logging/reproduction
    pub seed: u64,
    pub grid: Grid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    pub items: Vec<Item>,
    pub score: u64,
    pub phase: GamePhase,
    /// Remaining cutscene ticks (meaningful only in `Cutscene`)
    pub cutscene_ticks: u32,
    /// Couplet shown during the cutscene
    pub couplet: Option<u32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seeded RNG owned by the state for determinism
    pub rng: Pcg32,
}

impl GameState {
    /// Generate a fresh game from a seed: maze, player at the spawn cell,
    /// and enemies scattered away from the spawn.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = Grid::generate(GRID_ROWS, GRID_COLS, &mut rng);
        let enemies = spawn_enemies(&grid, &mut rng);
        Self {
            seed,
            grid,
            player: Player::new(PLAYER_SPAWN_ROW, PLAYER_SPAWN_COL),
            enemies,
            bombs: Vec::new(),
            explosions: Vec::new(),
            items: Vec::new(),
            score: 0,
            phase: GamePhase::Playing,
            cutscene_ticks: 0,
            couplet: None,
            time_ticks: 0,
            rng,
        }
    }

    /// Whether a bomb already occupies the cell
    pub fn bomb_at(&self, row: i32, col: i32) -> bool {
        self.bombs.iter().any(|b| b.row == row && b.col == col)
    }

    /// Whether any active explosion covers the cell
    pub fn explosion_at(&self, row: i32, col: i32) -> bool {
        self.explosions.iter().any(|e| e.contains(row, col))
    }
}

/// Rejection-sample enemy spawn cells: empty interior tiles at Manhattan
/// distance > ENEMY_MIN_SPAWN_DISTANCE from the player spawn.
fn spawn_enemies(grid: &Grid, rng: &mut Pcg32) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(ENEMY_COUNT);
    while enemies.len() < ENEMY_COUNT {
        let r = rng.random_range(1..grid.rows() - 1);
        let c = rng.random_range(1..grid.cols() - 1);
        let dist = (r - PLAYER_SPAWN_ROW).abs() + (c - PLAYER_SPAWN_COL).abs();
        if grid.is_empty(r, c) && dist > ENEMY_MIN_SPAWN_DISTANCE {
            enemies.push(Enemy::new(r, c));
        }
    }
    enemies
}
