//! Fixed timestep simulation tick
//!
//! Advances the whole game by one step: player command, enemy walks, bomb
//! fuses, explosion resolution, collision rules, win/loss detection. All
//! mutation happens synchronously inside one call; the returned events let
//! the shell react (floating text, HUD, highscores) without the sim ever
//! knowing about the DOM.

use super::actor::{Actor, Direction};
use super::bomb::{Bomb, Explosion, propagate};
use super::state::{COUPLET_COUNT, GameEvent, GamePhase, GameState, Item};
use crate::consts::*;
use rand::Rng;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directional step command (one-shot)
    pub step: Option<Direction>,
    /// Place a bomb at the player's cell (one-shot)
    pub place_bomb: bool,
    /// Toggle user pause (one-shot)
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::Won | GamePhase::Lost => return events,
        GamePhase::Cutscene => {
            // Gameplay is frozen; only the countdown advances. Resume is
            // idempotent-checked: nothing else can have left the phase.
            state.cutscene_ticks = state.cutscene_ticks.saturating_sub(1);
            if state.cutscene_ticks == 0 {
                state.phase = GamePhase::Playing;
                state.couplet = None;
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Player commands. Rejected moves are silent no-ops.
    if let Some(dir) = input.step {
        state.player.mover.try_step(dir, &state.grid);
    }
    if input.place_bomb {
        let (row, col) = state.player.grid_pos();
        if !state.bomb_at(row, col) {
            state.bombs.push(Bomb::new(row, col));
            events.push(GameEvent::BombPlaced { row, col });
        }
    }

    // Movement interpolation
    state.player.update();
    for enemy in &mut state.enemies {
        enemy.update(&state.grid, &mut state.rng);
    }

    // Bomb fuses; expired bombs detonate against the current grid
    let mut detonated = Vec::new();
    state.bombs.retain_mut(|bomb| {
        if bomb.tick() {
            detonated.push((bomb.row, bomb.col));
            false
        } else {
            true
        }
    });
    for (row, col) in detonated {
        let det = propagate(&mut state.grid, row, col, BOMB_RANGE);
        if det.bricks_destroyed > 0 {
            events.push(GameEvent::BricksDestroyed {
                count: det.bricks_destroyed,
            });
        }
        state.explosions.push(Explosion::new(det.cells));
    }

    // Age explosions, dropping finished ones
    state.explosions.retain_mut(|exp| !exp.tick());

    // Explosion vs player: cell overlap loses the game
    let (player_row, player_col) = state.player.grid_pos();
    if state.explosion_at(player_row, player_col) {
        state.phase = GamePhase::Lost;
        events.push(GameEvent::PlayerDied);
    }

    // Explosion vs enemies: death, envelope drop, speed buff, cutscene
    let mut dead = Vec::new();
    for (idx, enemy) in state.enemies.iter().enumerate() {
        let (row, col) = enemy.grid_pos();
        if state.explosion_at(row, col) {
            dead.push(idx);
        }
    }
    for idx in dead.into_iter().rev() {
        let enemy = state.enemies.remove(idx);
        let (row, col) = enemy.grid_pos();
        state.items.push(Item::new(row, col));
        state.player.speed_buff_ticks = SPEED_BUFF_TICKS;
        events.push(GameEvent::EnemyDefeated { row, col });
        if state.phase == GamePhase::Playing {
            state.phase = GamePhase::Cutscene;
            state.cutscene_ticks = CUTSCENE_TICKS;
            state.couplet = Some(state.rng.random_range(0..COUPLET_COUNT));
        }
    }

    // Proximity pickups
    let player_pos = state.player.pixel_pos();
    let mut collected = Vec::new();
    state.items.retain(|item| {
        if player_pos.distance(item.pixel) < ITEM_PICKUP_RADIUS {
            collected.push(item.pixel);
            false
        } else {
            true
        }
    });
    for pos in collected {
        state.score += ITEM_POINTS;
        events.push(GameEvent::ItemCollected {
            pos,
            points: ITEM_POINTS,
        });
    }

    // Proximity enemy contact
    if state.phase != GamePhase::Lost {
        let touched = state
            .enemies
            .iter()
            .any(|e| player_pos.distance(e.pixel_pos()) < ENEMY_CONTACT_RADIUS);
        if touched {
            state.phase = GamePhase::Lost;
            events.push(GameEvent::PlayerDied);
        }
    }

    // Win: zero enemies while still playing. A kill this tick parks the
    // phase in Cutscene first; the win then lands on the tick after resume.
    if state.enemies.is_empty() && state.phase == GamePhase::Playing {
        state.phase = GamePhase::Won;
        events.push(GameEvent::Won);
    }

    events
}
