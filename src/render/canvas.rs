//! Canvas-2D renderer
//!
//! Pure presentation: reads the sim state, never mutates it. Visual-only
//! entities (floating score text, gold rain on the win screen) live here
//! so the simulation stays deterministic.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use web_sys::CanvasRenderingContext2d;

use super::COUPLETS;
use crate::consts::*;
use crate::sim::{Actor, GameEvent, GamePhase, GameState, Tile};
use crate::{Settings, canvas_size, cell_center};

/// Explosion spark palette, cycled per affected cell
const SPARK_COLORS: [&str; 5] = ["#f87171", "#fbbf24", "#34d399", "#60a5fa", "#f472b6"];

/// Rising score text, faded out over ~50 frames
struct FloatingText {
    pos: Vec2,
    text: String,
    alpha: f32,
}

/// Falling gold ingot for the win celebration
struct GoldParticle {
    pos: Vec2,
    speed: f32,
    size: f32,
    rot: f32,
    rot_speed: f32,
}

/// Maximum gold particles on the win screen
const MAX_GOLD_PARTICLES: usize = 50;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    floating_texts: Vec<FloatingText>,
    gold: Vec<GoldParticle>,
    /// RNG for visual-only jitter; seeded arbitrarily, never touches the sim
    fx_rng: Pcg32,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, dpr: f64) -> Self {
        let _ = ctx.scale(dpr, dpr);
        ctx.set_image_smoothing_enabled(false);
        Self {
            ctx,
            floating_texts: Vec::new(),
            gold: Vec::new(),
            fx_rng: Pcg32::seed_from_u64(0xD1CE),
        }
    }

    /// React to per-tick simulation events
    pub fn handle_events(&mut self, events: &[GameEvent], settings: &Settings) {
        for event in events {
            if let GameEvent::ItemCollected { pos, points } = event {
                if settings.effective_floating_text() {
                    self.floating_texts.push(FloatingText {
                        pos: *pos,
                        text: format!("大吉大利 +{points}"),
                        alpha: 1.0,
                    });
                }
            }
        }
    }

    /// Draw a complete frame
    pub fn render(&mut self, state: &GameState, time_ms: f64, settings: &Settings) {
        let (width, height) = canvas_size();
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);

        self.draw_grid(state, settings);
        self.draw_items(state, time_ms);
        self.draw_bombs(state, time_ms);
        self.draw_explosions(state);
        self.draw_enemies(state);
        self.draw_player(state, time_ms);
        self.draw_floating_texts();
        self.draw_score(state);

        if state.phase == GamePhase::Won && settings.effective_win_particles() {
            self.draw_gold_rain(width, height);
        }
        if state.phase == GamePhase::Cutscene {
            if let Some(idx) = state.couplet {
                self.draw_couplet(idx as usize, width, height);
            }
        }
    }

    fn draw_grid(&self, state: &GameState, settings: &Settings) {
        let cell = CELL_SIZE as f64;
        for r in 0..state.grid.rows() {
            for c in 0..state.grid.cols() {
                let x = c as f64 * cell;
                let y = r as f64 * cell;
                match state.grid.tile(r, c) {
                    Tile::Empty => {
                        self.ctx.set_fill_style_str("#fff1f1");
                        self.ctx.fill_rect(x, y, cell, cell);
                        if settings.grid_lines {
                            self.ctx.set_stroke_style_str("rgba(185, 28, 28, 0.1)");
                            self.ctx.set_line_width(1.0);
                            self.ctx.stroke_rect(x, y, cell, cell);
                        }
                    }
                    Tile::Wall => {
                        // Stone pillar look
                        self.ctx.set_fill_style_str("#4a0404");
                        self.ctx.fill_rect(x, y, cell, cell);
                        self.ctx.set_stroke_style_str("#2d0a0a");
                        self.ctx.set_line_width(2.0);
                        self.ctx.stroke_rect(x + 4.0, y + 4.0, cell - 8.0, cell - 8.0);
                        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.2)");
                        self.ctx.fill_rect(x + 8.0, y + 8.0, cell - 16.0, cell - 16.0);
                    }
                    Tile::Brick => {
                        // Wooden crate with a gold-framed 福
                        self.ctx.set_fill_style_str("#b91c1c");
                        self.ctx.fill_rect(x, y, cell, cell);
                        self.ctx.set_fill_style_str("#991b1b");
                        self.ctx.fill_rect(x + 2.0, y + 2.0, cell - 4.0, cell - 4.0);
                        self.ctx.set_stroke_style_str("#fbbf24");
                        self.ctx.set_line_width(2.0);
                        self.ctx
                            .stroke_rect(x + 6.0, y + 6.0, cell - 12.0, cell - 12.0);
                        self.ctx.set_fill_style_str("#fbbf24");
                        self.ctx.set_font(&format!("bold {}px serif", cell * 0.5));
                        self.ctx.set_text_align("center");
                        self.ctx.set_text_baseline("middle");
                        let _ = self.ctx.fill_text("福", x + cell / 2.0, y + cell / 2.0);
                    }
                }
            }
        }
    }

    fn draw_items(&self, state: &GameState, time_ms: f64) {
        let cell = CELL_SIZE as f64;
        let bounce = (time_ms * 0.006).sin() * 5.0;
        for item in &state.items {
            let w = cell * 0.5;
            let h = cell * 0.7;
            let x = item.pixel.x as f64 - w / 2.0;
            let y = item.pixel.y as f64 - h / 2.0 + bounce;

            // Red envelope with a gold seal
            self.ctx.set_fill_style_str("#ef4444");
            self.ctx.fill_rect(x, y, w, h);
            self.ctx.set_stroke_style_str("#fbbf24");
            self.ctx.set_line_width(2.0);
            self.ctx.stroke_rect(x, y, w, h);
            self.ctx.set_fill_style_str("#fbbf24");
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                item.pixel.x as f64,
                y + h * 0.3,
                w * 0.2,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
    }

    fn draw_bombs(&self, state: &GameState, time_ms: f64) {
        let cell = CELL_SIZE as f64;
        for bomb in &state.bombs {
            let center = cell_center(bomb.row, bomb.col);
            let w = cell * 0.4;
            let h = cell * 0.7;
            let x = center.x as f64 - w / 2.0;
            let y = center.y as f64 - h / 2.0;

            // Firecracker bundle
            self.ctx.set_fill_style_str("#dc2626");
            self.ctx.fill_rect(x, y, w, h);
            self.ctx.set_stroke_style_str("#f59e0b");
            self.ctx.set_line_width(1.0);
            for i in 0..4 {
                self.ctx.stroke_rect(x, y + i as f64 * (h / 4.0), w, h / 4.0);
            }

            // Wick burns down with the fuse; the spark pulses at its tip
            let wick = 8.0 * bomb.fuse_fraction() as f64;
            self.ctx.set_stroke_style_str("#78350f");
            self.ctx.set_line_width(2.0);
            self.ctx.begin_path();
            self.ctx.move_to(center.x as f64, y);
            self.ctx.line_to(center.x as f64, y - wick);
            self.ctx.stroke();

            let pulse = (time_ms / 100.0).sin() * 2.0;
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                y - wick,
                2.0 + pulse,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.set_fill_style_str("#fbbf24");
            self.ctx.fill();
        }
    }

    fn draw_explosions(&self, state: &GameState) {
        let cell = CELL_SIZE as f64;
        for exp in &state.explosions {
            let alpha = exp.alpha() as f64;
            self.ctx.save();
            self.ctx.set_global_alpha(alpha);
            for (idx, &(r, c)) in exp.cells().iter().enumerate() {
                let center = cell_center(r, c);
                let cx = center.x as f64;
                let cy = center.y as f64;
                self.ctx
                    .set_fill_style_str(SPARK_COLORS[idx % SPARK_COLORS.len()]);

                // Cross burst
                self.ctx
                    .fill_rect(cx - cell / 2.0 + 2.0, cy - 2.0, cell - 4.0, 4.0);
                self.ctx
                    .fill_rect(cx - 2.0, cy - cell / 2.0 + 2.0, 4.0, cell - 4.0);

                // Corner sparks fly outward as the burst fades
                let reach = (cell / 2.0) * (1.0 - alpha) * 2.0;
                for i in 0..4 {
                    let angle = i as f64 * std::f64::consts::FRAC_PI_2;
                    self.ctx.fill_rect(
                        cx + angle.cos() * reach - 2.0,
                        cy + angle.sin() * reach - 2.0,
                        4.0,
                        4.0,
                    );
                }
            }
            self.ctx.restore();
        }
    }

    fn draw_enemies(&self, state: &GameState) {
        let cell = CELL_SIZE as f64;
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx
            .set_font(&format!("bold {}px \"Segoe UI Emoji\", sans-serif", (cell * 0.95).floor()));
        for enemy in &state.enemies {
            let pos = enemy.pixel_pos();
            let _ = self.ctx.fill_text("👹", pos.x as f64, pos.y as f64);
        }
    }

    fn draw_player(&self, state: &GameState, time_ms: f64) {
        let cell = CELL_SIZE as f64;
        let pos = state.player.pixel_pos();
        let x = pos.x as f64;
        let y = pos.y as f64;

        // Auspicious cloud under the buffed horse
        if state.player.buff_active() {
            self.ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
            self.ctx.begin_path();
            let wobble = (time_ms / 100.0).sin() * 5.0;
            let _ = self.ctx.ellipse(
                x,
                y + cell * 0.4,
                cell * 0.6 + wobble,
                cell * 0.2,
                0.0,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
            self.ctx.set_stroke_style_str("#fff");
            self.ctx.stroke();
        }

        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx
            .set_font(&format!("bold {}px \"Segoe UI Emoji\", sans-serif", (cell * 0.95).floor()));
        let _ = self.ctx.fill_text("🐎", x, y);
        self.ctx
            .set_font(&format!("{}px \"Segoe UI Emoji\", sans-serif", (cell * 0.5).floor()));
        let _ = self.ctx.fill_text("💣", x + 12.0, y - 12.0);
    }

    fn draw_floating_texts(&mut self) {
        for text in &mut self.floating_texts {
            text.pos.y -= 1.0;
            text.alpha -= 0.02;
        }
        self.floating_texts.retain(|t| t.alpha > 0.0);

        for text in &self.floating_texts {
            self.ctx.save();
            self.ctx.set_global_alpha(text.alpha.max(0.0) as f64);
            self.ctx.set_fill_style_str("#fbbf24");
            self.ctx.set_font("bold 20px \"Kaiti\", serif");
            self.ctx.set_text_align("center");
            let _ = self
                .ctx
                .fill_text(&text.text, text.pos.x as f64, text.pos.y as f64);
            self.ctx.restore();
        }
    }

    fn draw_score(&self, state: &GameState) {
        self.ctx.set_fill_style_str("#b91c1c");
        self.ctx.set_font("bold 18px Arial");
        self.ctx.set_text_align("left");
        self.ctx.set_text_baseline("alphabetic");
        let _ = self
            .ctx
            .fill_text(&format!("福气值: {}", state.score), 20.0, 30.0);
    }

    fn draw_gold_rain(&mut self, width: f32, height: f32) {
        if self.gold.len() < MAX_GOLD_PARTICLES {
            self.gold.push(GoldParticle {
                pos: Vec2::new(
                    self.fx_rng.random::<f32>() * width,
                    -20.0 - self.fx_rng.random::<f32>() * 100.0,
                ),
                speed: 2.0 + self.fx_rng.random::<f32>() * 5.0,
                size: 10.0 + self.fx_rng.random::<f32>() * 10.0,
                rot: self.fx_rng.random::<f32>() * std::f32::consts::TAU,
                rot_speed: (self.fx_rng.random::<f32>() - 0.5) * 0.2,
            });
        }

        for ingot in &mut self.gold {
            ingot.pos.y += ingot.speed;
            ingot.rot += ingot.rot_speed;
            if ingot.pos.y > height + 20.0 {
                ingot.pos.y = -20.0;
                ingot.pos.x = self.fx_rng.random::<f32>() * width;
            }
        }

        for ingot in &self.gold {
            self.ctx.save();
            let _ = self.ctx.translate(ingot.pos.x as f64, ingot.pos.y as f64);
            let _ = self.ctx.rotate(ingot.rot as f64);
            self.ctx.set_fill_style_str("#fbbf24");
            self.ctx.begin_path();
            let _ = self.ctx.ellipse(
                0.0,
                0.0,
                ingot.size as f64,
                ingot.size as f64 * 0.6,
                0.0,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
            self.ctx.stroke();
            self.ctx.restore();
        }
    }

    fn draw_couplet(&self, idx: usize, width: f32, height: f32) {
        let couplet = COUPLETS[idx % COUPLETS.len()];
        let width = width as f64;
        let height = height as f64;
        let cell = CELL_SIZE as f64;

        self.ctx.save();

        // Dim the board
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
        self.ctx.fill_rect(0.0, 0.0, width, height);

        // Red scroll with a gold frame
        let scroll_w = width * 0.6;
        let scroll_h = height * 0.7;
        let x = (width - scroll_w) / 2.0;
        let y = (height - scroll_h) / 2.0;

        self.ctx.set_fill_style_str("#b91c1c");
        self.ctx.set_shadow_blur(20.0);
        self.ctx.set_shadow_color("black");
        self.ctx.fill_rect(x, y, scroll_w, scroll_h);
        self.ctx.set_stroke_style_str("#f59e0b");
        self.ctx.set_line_width(4.0);
        self.ctx
            .stroke_rect(x + 10.0, y + 10.0, scroll_w - 20.0, scroll_h - 20.0);

        // Banner
        self.ctx.set_fill_style_str("#f59e0b");
        let banner_w = scroll_w * 0.4;
        self.ctx
            .fill_rect(width / 2.0 - banner_w / 2.0, y + 25.0, banner_w, 40.0);
        self.ctx.set_fill_style_str("#b91c1c");
        self.ctx.set_font("bold 24px \"Kaiti\", serif");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text("新春大吉", width / 2.0, y + 55.0);

        // Vertical couplet columns: upper line on the right, lower on the left
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_fill_style_str("#f59e0b");
        self.ctx
            .set_font(&format!("bold {}px \"Kaiti\", \"STKaiti\", serif", (cell * 0.8).floor()));
        let left_x = x + scroll_w * 0.25;
        let right_x = x + scroll_w * 0.75;
        let start_y = y + 110.0;
        let line_spacing = cell;

        for (i, ch) in couplet[0].chars().enumerate() {
            let _ = self.ctx.fill_text(
                &ch.to_string(),
                right_x,
                start_y + i as f64 * line_spacing,
            );
        }
        for (i, ch) in couplet[1].chars().enumerate() {
            let _ = self.ctx.fill_text(
                &ch.to_string(),
                left_x,
                start_y + i as f64 * line_spacing,
            );
        }

        self.ctx.set_font("14px Arial");
        let _ = self
            .ctx
            .fill_text("年兽已除，对联送福", width / 2.0, y + scroll_h - 40.0);

        self.ctx.restore();
    }
}
