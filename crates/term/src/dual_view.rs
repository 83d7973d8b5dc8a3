//! DualView: draws both engines side by side into a terminal framebuffer.
//!
//! This module is pure (no I/O). It implements [`Presenter`], so the session
//! draws into it directly; the binary only clears it, runs one update, and
//! hands the buffer to the renderer.
//!
//! ```text
//! SCORE 120   TIME 3s   LIVES ♥♥♥♥♥            Speed Up!
//! ┌────────────────────┐ ┌─NEXT───┐ ┌──────────────────┐
//! │····················│ │        │ │     ¦     ¦      │
//! ```

use crate::core::{Feedback, Flash, Grid, Obstacle, Piece, Spark, Vehicle};
use crate::engine::Presenter;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Difficulty, PieceKind, CELL_PX, GRID_HEIGHT, GRID_WIDTH, OBSTACLE_HEIGHT, STARTING_LIVES,
};

/// Terminal columns per grid cell; 2 keeps cells roughly square.
const CELL_W: u16 = 2;
const HUD_Y: u16 = 0;
const PANE_Y: u16 = 1;

const GRID_X: u16 = 0;
const GRID_PANE_W: u16 = GRID_WIDTH as u16 * CELL_W + 2;
const GRID_PANE_H: u16 = GRID_HEIGHT as u16 + 2;

const NEXT_X: u16 = GRID_X + GRID_PANE_W + 1;
const NEXT_PANE_W: u16 = 4 * CELL_W + 2;
const NEXT_PANE_H: u16 = 6;

const ROAD_X: u16 = NEXT_X + NEXT_PANE_W + 1;
const ROAD_ROWS: u16 = GRID_HEIGHT as u16;
const LANE_W: u16 = 6;
const MAX_LANES: u16 = 5;
const DASH_PERIOD: u16 = 4;

/// Size of the full view in terminal cells.
pub const VIEW_WIDTH: u16 = ROAD_X + MAX_LANES * LANE_W + 2;
pub const VIEW_HEIGHT: u16 = PANE_Y + GRID_PANE_H;

const GRID_BG: Rgb = Rgb::new(30, 30, 40);
const ROAD_BG: Rgb = Rgb::new(38, 38, 42);
const VEHICLE_FG: Rgb = Rgb::new(80, 220, 255);
const OBSTACLE_FG: Rgb = Rgb::new(230, 90, 60);
const FLASH_FG: Rgb = Rgb::new(255, 200, 60);
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const HINT: CellStyle = CellStyle::new(Rgb::new(140, 140, 150), Rgb::BLACK).dim();

pub struct DualView {
    fb: FrameBuffer,
    field_height: f64,
    scores: Vec<(String, u64)>,
    highlight: Option<usize>,
}

impl DualView {
    /// A view for a traffic field `field_height` world units tall
    pub fn new(field_height: f64) -> Self {
        let field_height = if field_height.is_finite() && field_height > 0.0 {
            field_height
        } else {
            crate::types::DEFAULT_FIELD_HEIGHT
        };
        Self {
            fb: FrameBuffer::new(VIEW_WIDTH, VIEW_HEIGHT),
            field_height,
            scores: Vec::new(),
            highlight: None,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    /// Blank the buffer before a new frame is drawn.
    pub fn begin_frame(&mut self) {
        self.fb.resize(VIEW_WIDTH, VIEW_HEIGHT);
        self.fb.clear(Cell::default());
    }

    /// Leaderboard rows shown on the menu and results screens. `highlight`
    /// marks the row of the score just recorded.
    pub fn set_leaderboard(&mut self, rows: Vec<(String, u64)>, highlight: Option<usize>) {
        self.scores = rows;
        self.highlight = highlight;
    }

    /// Screen rows covered by the world span `[top, bottom)`, clipped to the
    /// road pane. `None` when the span is entirely off-screen.
    fn road_rows(&self, top: f64, bottom: f64) -> Option<(u16, u16)> {
        if bottom <= 0.0 || top >= self.field_height {
            return None;
        }
        let scale = ROAD_ROWS as f64 / self.field_height;
        let first = (top * scale).floor().max(0.0) as u16;
        let last = ((bottom * scale).ceil() as u16)
            .saturating_sub(1)
            .min(ROAD_ROWS - 1);
        (first <= last).then_some((first, last))
    }

    fn lane_x(lane: u8) -> u16 {
        ROAD_X + 1 + lane as u16 * LANE_W
    }

    fn draw_grid_cell(&mut self, x: i8, y: i8, kind: PieceKind) {
        if x < 0 || y < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return;
        }
        let style = CellStyle::new(Rgb::from(kind.color()), GRID_BG).bold();
        let sx = GRID_X + 1 + x as u16 * CELL_W;
        self.fb.fill_rect(sx, PANE_Y + 1 + y as u16, CELL_W, 1, '█', style);
    }

    fn draw_next(&mut self, next: &Piece) {
        self.fb.draw_box(NEXT_X, PANE_Y, NEXT_PANE_W, NEXT_PANE_H, BORDER);
        self.fb.put_str(NEXT_X + 2, PANE_Y, "NEXT", LABEL);

        let style = CellStyle::new(Rgb::from(next.kind.color()), Rgb::BLACK).bold();
        for (dx, dy) in next.shape.cells() {
            let sx = NEXT_X + 1 + dx as u16 * CELL_W;
            self.fb.fill_rect(sx, PANE_Y + 1 + dy as u16, CELL_W, 1, '█', style);
        }
    }

    fn draw_sparks(&mut self, sparks: &[Spark]) {
        for spark in sparks {
            if spark.x < 0.0 || spark.y < 0.0 {
                continue;
            }
            let col = (spark.x / CELL_PX) as u16;
            let row = (spark.y / CELL_PX) as u16;
            if col >= GRID_WIDTH as u16 || row >= GRID_HEIGHT as u16 {
                continue;
            }
            let fg = Rgb::from(spark.color.color()).fade(GRID_BG, spark.alpha);
            let sx = GRID_X + 1 + col * CELL_W;
            self.fb.put_char(sx, PANE_Y + 1 + row, '*', CellStyle::new(fg, GRID_BG));
        }
    }

    fn draw_lanes(&mut self, lane_count: u8, road_offset: f64) {
        let lanes = (lane_count as u16).clamp(1, MAX_LANES);
        let inner_w = lanes * LANE_W;
        self.fb.draw_box(ROAD_X, PANE_Y, inner_w + 2, ROAD_ROWS + 2, BORDER);
        self.fb.fill_rect(
            ROAD_X + 1,
            PANE_Y + 1,
            inner_w,
            ROAD_ROWS,
            ' ',
            CellStyle::new(Rgb::WHITE, ROAD_BG),
        );

        // Dashes move down as the road offset grows.
        let phase = ((road_offset / crate::types::ROAD_TILE_HEIGHT) * DASH_PERIOD as f64)
            .floor()
            .max(0.0) as u16
            % DASH_PERIOD;
        let dash = CellStyle::new(Rgb::new(160, 160, 160), ROAD_BG);
        for lane in 1..lanes {
            let x = ROAD_X + 1 + lane * LANE_W;
            for row in 0..ROAD_ROWS {
                if (row + DASH_PERIOD - phase) % DASH_PERIOD < 2 {
                    self.fb.put_char(x, PANE_Y + 1 + row, '¦', dash);
                }
            }
        }
    }

    fn draw_car(&mut self, lane: u8, top: f64, bottom: f64, ch: char, fg: Rgb) {
        let Some((first, last)) = self.road_rows(top, bottom) else {
            return;
        };
        let style = CellStyle::new(fg, ROAD_BG);
        let x = Self::lane_x(lane) + 1;
        for row in first..=last {
            self.fb.fill_rect(x, PANE_Y + 1 + row, LANE_W - 2, 1, ch, style);
        }
    }

    fn draw_flash(&mut self, flash: &Flash) {
        let Some((row, _)) = self.road_rows(flash.y, flash.y + 1.0) else {
            return;
        };
        let cx = ROAD_X + 1 + (flash.x * LANE_W as f64).max(0.0) as u16;
        let cy = PANE_Y + 1 + row;
        let style = CellStyle::new(FLASH_FG.fade(ROAD_BG, flash.alpha), ROAD_BG).bold();
        let reach = (flash.radius() / self.field_height * ROAD_ROWS as f64).round() as u16;

        self.fb.put_char(cx, cy, '@', style);
        for d in 1..=reach.min(2) {
            self.fb.put_char(cx.saturating_sub(d * 2), cy, '*', style);
            self.fb.put_char(cx + d * 2, cy, '*', style);
            if cy > PANE_Y + d {
                self.fb.put_char(cx, cy - d, '*', style);
            }
            if cy + d <= PANE_Y + ROAD_ROWS {
                self.fb.put_char(cx, cy + d, '*', style);
            }
        }
    }

    fn draw_scores(&mut self, x: u16, y: u16) {
        self.fb.put_str(x, y, "TOP SCORES", LABEL);
        if self.scores.is_empty() {
            self.fb.put_str(x, y + 1, "no scores yet", HINT);
            return;
        }
        for (i, (name, score)) in self.scores.iter().enumerate() {
            let style = if self.highlight == Some(i) {
                VALUE.bold()
            } else {
                VALUE
            };
            let line = format!("{}. {:<10} {:>8}", i + 1, name, score);
            self.fb.put_str(x, y + 1 + i as u16, &line, style);
        }
    }
}

impl Presenter for DualView {
    fn present_grid(&mut self, grid: &Grid, current: &Piece, next: &Piece, sparks: &[Spark]) {
        self.fb.draw_box(GRID_X, PANE_Y, GRID_PANE_W, GRID_PANE_H, BORDER);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), GRID_BG).dim();
        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                match grid.get(x, y).flatten() {
                    Some(kind) => self.draw_grid_cell(x, y, kind),
                    None => {
                        let sx = GRID_X + 1 + x as u16 * CELL_W;
                        let sy = PANE_Y + 1 + y as u16;
                        self.fb.put_char(sx, sy, '·', empty);
                        self.fb.put_char(sx + 1, sy, ' ', empty);
                    }
                }
            }
        }
        for (x, y) in current.cells() {
            self.draw_grid_cell(x, y, current.kind);
        }
        self.draw_sparks(sparks);
        self.draw_next(next);
    }

    fn present_traffic(
        &mut self,
        lane_count: u8,
        vehicle: &Vehicle,
        obstacles: &[Obstacle],
        flashes: &[Flash],
        road_offset: f64,
    ) {
        self.draw_lanes(lane_count, road_offset);
        for o in obstacles {
            self.draw_car(o.lane, o.y, o.y + OBSTACLE_HEIGHT, '▓', OBSTACLE_FG);
        }
        self.draw_car(
            vehicle.lane,
            vehicle.y,
            vehicle.y + vehicle.height,
            '█',
            VEHICLE_FG,
        );
        for flash in flashes {
            self.draw_flash(flash);
        }
    }

    fn present_hud(&mut self, score: u64, lives: u32, elapsed_seconds: u64, feedback: Option<&Feedback>) {
        let text = format!("SCORE {score:<8} TIME {elapsed_seconds}s");
        self.fb.put_str(0, HUD_Y, &text, LABEL);

        let lives_x = text.chars().count() as u16 + 3;
        self.fb.put_str(lives_x, HUD_Y, "LIVES", LABEL);
        let heart = CellStyle::new(Rgb::new(255, 80, 100), Rgb::BLACK);
        for i in 0..STARTING_LIVES.max(lives) {
            let (ch, style) = if i < lives { ('♥', heart) } else { ('·', HINT) };
            self.fb.put_char(lives_x + 6 + i as u16, HUD_Y, ch, style);
        }

        if let Some(msg) = feedback {
            let style = CellStyle::new(Rgb::from(msg.color), Rgb::BLACK).bold();
            let len = msg.message.chars().count() as u16;
            self.fb.put_str(VIEW_WIDTH.saturating_sub(len), HUD_Y, msg.message, style);
        }
    }

    fn present_menu(&mut self, choices: &[Difficulty]) {
        self.fb
            .put_str_centered(0, VIEW_WIDTH, 2, "D U A L   C O R E", LABEL);
        self.fb.put_str_centered(
            0,
            VIEW_WIDTH,
            3,
            "stack blocks and dodge traffic at the same time",
            HINT,
        );

        for (i, d) in choices.iter().enumerate() {
            let preset = d.preset();
            let line = format!(
                "[{}] {:<7} {} lanes  every {:.1}s",
                i + 1,
                d.label(),
                preset.lane_count,
                preset.spawn_interval_ms / 1000.0
            );
            self.fb.put_str(12, 6 + i as u16, &line, VALUE);
        }

        self.draw_scores(12, 11);
        self.fb.put_str_centered(
            0,
            VIEW_WIDTH,
            VIEW_HEIGHT - 2,
            "a/d move  s rotate  w drop  ←/→ lanes  esc menu  q quit",
            HINT,
        );
    }

    fn present_countdown(&mut self, label: &str) {
        let style = CellStyle::new(Rgb::new(255, 230, 120), Rgb::BLACK).bold();
        self.fb
            .put_str_centered(0, VIEW_WIDTH, VIEW_HEIGHT / 2, label, style);
    }

    fn present_results(&mut self, final_score: u64) {
        let over = CellStyle::new(Rgb::new(255, 90, 90), Rgb::BLACK).bold();
        self.fb.put_str_centered(0, VIEW_WIDTH, 3, "GAME OVER", over);
        self.fb.put_str_centered(
            0,
            VIEW_WIDTH,
            5,
            &format!("FINAL SCORE {final_score}"),
            LABEL,
        );
        self.draw_scores(20, 8);
    }
}
