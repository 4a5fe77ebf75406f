//! Shared layout pieces: bordered frame, status bar, info panel, prompts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Play field, top left inside the outer border
    pub content: Rect,
    /// Two-line status bar under the play field
    pub status_bar: Rect,
    /// Info panel on the right, with its own border
    pub info_panel: Rect,
}

/// Split `area` into play field, status bar and info panel.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │   [content area]                │  [info]     │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Status message on line 1, `(key, action)` hints on line 2.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Info panel border with the standard " Info " title. Returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// One bold line centred on `area`, drawn over whatever is already there.
pub fn render_centered_prompt(frame: &mut Frame, area: Rect, prompt: &str, color: Color) {
    let width = prompt.chars().count() as u16;
    if area.height < 3 || area.width < width {
        return;
    }

    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            prompt,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))),
        Rect::new(x, y, width, 1),
    );
}

/// "Terminal too small" notice.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Need: {}x{}   Have: {}x{}",
                min_width, min_height, area.width, area.height
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub const QUIT_STATUS_TEXT: &str = "Quit skyhop?";
pub const QUIT_STATUS_COLOR: Color = Color::Red;
pub const QUIT_CONTROLS: &[(&str, &str)] = &[("[Esc]", "Confirm"), ("[Any]", "Cancel")];

/// Quit confirmation status bar. Returns `true` if rendered.
pub fn render_quit_status_bar(frame: &mut Frame, area: Rect, quit_pending: bool) -> bool {
    if !quit_pending {
        return false;
    }
    render_status_bar(
        frame,
        area,
        QUIT_STATUS_TEXT,
        QUIT_STATUS_COLOR,
        QUIT_CONTROLS,
    );
    true
}

/// Colour for a fuel fraction in `[0, 1]`.
pub fn fuel_color(fraction: f64) -> Color {
    if fraction < 0.2 {
        Color::Red
    } else if fraction < 0.5 {
        Color::Yellow
    } else {
        Color::Green
    }
}
