//! Play field rendering: projects the camera's view of the world onto a
//! cell buffer, then flushes it to the terminal row by row.

use super::game_common::fuel_color;
use crate::world::body::Body;
use crate::world::camera::Camera;
use crate::world::player::PlayerState;
use crate::world::MainScene;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

#[derive(Clone, Copy, PartialEq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// World → cell mapping for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    scroll_x: f64,
    scroll_y: f64,
    x_scale: f64,
    y_scale: f64,
    cols: u16,
    rows: u16,
}

impl Projection {
    pub fn new(camera: &Camera, cols: u16, rows: u16) -> Self {
        Self {
            scroll_x: camera.scroll_x,
            scroll_y: camera.scroll_y,
            x_scale: cols as f64 / camera.width,
            y_scale: rows as f64 / camera.height,
            cols,
            rows,
        }
    }

    pub fn column(&self, world_x: f64) -> i64 {
        ((world_x - self.scroll_x) * self.x_scale).floor() as i64
    }

    pub fn row(&self, world_y: f64) -> i64 {
        ((world_y - self.scroll_y) * self.y_scale).floor() as i64
    }

    /// Cells covered by `body`, clipped to the field. Every visible body
    /// covers at least one cell so thin platforms never vanish.
    pub fn cells(&self, body: &Body) -> Option<(Range<usize>, Range<usize>)> {
        let cols = Self::span(
            self.column(body.left()),
            ((body.right() - self.scroll_x) * self.x_scale).ceil() as i64,
            self.cols,
        )?;
        let rows = Self::span(
            self.row(body.top()),
            ((body.bottom() - self.scroll_y) * self.y_scale).ceil() as i64,
            self.rows,
        )?;
        Some((cols, rows))
    }

    fn span(start: i64, end: i64, limit: u16) -> Option<Range<usize>> {
        let end = end.max(start + 1);
        let start = start.max(0);
        let end = end.min(limit as i64);
        if start >= end {
            return None;
        }
        Some(start as usize..end as usize)
    }
}

struct CellBuffer {
    cells: Vec<Vec<Cell>>,
    width: usize,
}

impl CellBuffer {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
            width: width as usize,
        }
    }

    fn put(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    fn text(&mut self, row: usize, col: usize, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(
                row,
                col + i,
                Cell {
                    ch,
                    fg,
                    bg: Color::Reset,
                },
            );
        }
    }

    fn fill(
        &mut self,
        (cols, rows): (Range<usize>, Range<usize>),
        pick: impl Fn(usize, usize) -> Cell,
    ) {
        for row in rows {
            for col in cols.clone() {
                self.put(row, col, pick(row, col));
            }
        }
    }

    fn flush(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row_data) in self.cells.iter().enumerate() {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for &cell in row_data {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let row_area = Rect::new(area.x, area.y + row_idx as u16, self.width as u16, 1);
            if row_area.y < area.y + area.height {
                frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
            }
        }
    }
}

pub fn render_play_field(frame: &mut Frame, area: Rect, scene: &MainScene) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let projection = Projection::new(&scene.camera, area.width, area.height);
    let mut buffer = CellBuffer::new(area.width, area.height);

    draw_sky(&mut buffer, area);

    for ground in scene.grounds.iter() {
        if let Some(span) = projection.cells(ground) {
            let surface = span.1.start;
            buffer.fill(span, |row, col| ground_cell(row == surface, row, col));
        }
    }

    let landed = scene.last_landed().map(|l| l.index);
    for (index, platform) in scene.platforms.iter().enumerate() {
        let color = if Some(index) == landed {
            Color::Green
        } else {
            Color::Cyan
        };
        if let Some(span) = projection.cells(platform) {
            buffer.fill(span, |_, _| Cell {
                ch: '=',
                fg: color,
                bg: Color::Reset,
            });
        }
    }

    draw_player(&mut buffer, &projection, scene);
    draw_hud(&mut buffer, scene);

    buffer.flush(frame, area);
}

/// Deterministic sparse stars.
fn draw_sky(buffer: &mut CellBuffer, area: Rect) {
    for row in 0..area.height as usize {
        for col in 0..area.width as usize {
            if (row * 137 + col * 251 + 97) % 211 == 0 {
                buffer.put(
                    row,
                    col,
                    Cell {
                        ch: '.',
                        fg: Color::DarkGray,
                        bg: Color::Reset,
                    },
                );
            }
        }
    }
}

fn ground_cell(surface: bool, row: usize, col: usize) -> Cell {
    if surface {
        Cell {
            ch: '^',
            fg: Color::Rgb(140, 120, 100),
            bg: Color::Reset,
        }
    } else {
        Cell {
            ch: if (row + col) % 3 == 0 { '.' } else { ' ' },
            fg: Color::Rgb(60, 50, 40),
            bg: Color::Rgb(30, 25, 20),
        }
    }
}

fn draw_player(buffer: &mut CellBuffer, projection: &Projection, scene: &MainScene) {
    let player = &scene.player;
    let Some(span) = projection.cells(&player.body) else {
        return;
    };

    let color = match player.state() {
        PlayerState::Grounded => Color::White,
        PlayerState::Airborne => Color::LightYellow,
        PlayerState::OutOfFuel => Color::Red,
    };

    // Thrust flame under the body
    if player.ay < 0.0 {
        let flame_row = span.1.end;
        let flame_ch = if scene.tick_count % 4 < 2 { '*' } else { '.' };
        for col in span.0.clone() {
            buffer.put(
                flame_row,
                col,
                Cell {
                    ch: flame_ch,
                    fg: Color::LightRed,
                    bg: Color::Reset,
                },
            );
        }
    }

    buffer.fill(span, |_, _| Cell {
        ch: '#',
        fg: color,
        bg: Color::Reset,
    });
}

/// Fuel bar top-left, score top-right.
fn draw_hud(buffer: &mut CellBuffer, scene: &MainScene) {
    let fraction = scene.fuel_gauge.shown();
    let bar_width = 10usize;
    let filled = (fraction * bar_width as f64).round() as usize;

    let label = "FUEL ";
    buffer.text(0, 0, label, Color::DarkGray);
    let bar: String = std::iter::once('[')
        .chain((0..bar_width).map(|i| if i < filled { '|' } else { ' ' }))
        .chain(std::iter::once(']'))
        .collect();
    buffer.text(0, label.len(), &bar, fuel_color(fraction));
    buffer.text(
        0,
        label.len() + bar.len(),
        &format!(" {}", scene.fuel_gauge.label()),
        Color::White,
    );

    let score = scene.score.label();
    let start = buffer.width.saturating_sub(score.len() + 1);
    buffer.text(0, start, &score, Color::Yellow);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::world::body::BodyKind;

    fn camera() -> Camera {
        Camera::new(1280.0, 720.0, CameraConfig::default())
    }

    #[test]
    fn test_projection_maps_viewport_to_field() {
        let p = Projection::new(&camera(), 128, 36);
        assert_eq!(p.column(0.0), 0);
        assert_eq!(p.column(640.0), 64);
        assert_eq!(p.row(360.0), 18);
        assert_eq!(p.column(1279.0), 127);
    }

    #[test]
    fn test_projection_follows_scroll() {
        let mut cam = camera();
        cam.scroll_x = 640.0;
        cam.scroll_y = -360.0;
        let p = Projection::new(&cam, 128, 36);
        assert_eq!(p.column(640.0), 0);
        assert_eq!(p.row(0.0), 18);
    }

    #[test]
    fn test_thin_platform_covers_one_row() {
        let p = Projection::new(&camera(), 128, 36);
        let platform = Body::resting_on(BodyKind::Platform, 250.0, 620.0, 80.0, 15.0);
        let (cols, rows) = p.cells(&platform).expect("visible");
        assert_eq!(cols, 25..33);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_offscreen_body_is_clipped() {
        let p = Projection::new(&camera(), 128, 36);
        let left = Body::new(BodyKind::Platform, -200.0, 100.0, 80.0, 15.0);
        assert!(p.cells(&left).is_none());

        let partial = Body::new(BodyKind::Ground, 1200.0, 620.0, 1280.0, 100.0);
        let (cols, rows) = p.cells(&partial).expect("partially visible");
        assert_eq!(cols, 120..128);
        assert_eq!(rows.end, 36);
    }
}
