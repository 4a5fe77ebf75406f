//! Right-hand info panel: run stats, fuel, difficulty.

use super::game_common::{fuel_color, render_info_panel_frame};
use crate::world::player::PlayerState;
use crate::world::GameSession;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn row(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Text lines for the panel. Split out so the content is testable.
pub fn info_lines(session: &GameSession) -> Vec<Line<'static>> {
    let scene = &session.scene;
    let level = scene.level();
    let range = scene.margin_table().range_for_level(level);
    let fraction = scene.fuel_gauge.shown();

    let state = match scene.player.state() {
        PlayerState::Grounded => ("Landed", Color::Green),
        PlayerState::Airborne => ("Flying", Color::LightYellow),
        PlayerState::OutOfFuel => ("No fuel", Color::Red),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                scene.score.score().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        row("Level: ", level.to_string(), Color::Cyan),
        row("Gap:   ", format!("{}..{}", range.min, range.max), Color::White),
        Line::from(""),
        Line::from(vec![
            Span::styled("Fuel:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                scene.fuel_gauge.label(),
                Style::default()
                    .fg(fuel_color(fraction))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        row("State: ", state.0.to_string(), state.1),
        Line::from(""),
        row("Run:   ", session.run_number().to_string(), Color::White),
        row("Best:  ", session.best_score.to_string(), Color::Yellow),
    ];

    if let Some(last) = session.last_run_score {
        lines.push(row("Last:  ", last.to_string(), Color::White));
    }
    if let Some(seed) = session.config().seed {
        lines.push(Line::from(""));
        lines.push(row("Seed:  ", seed.to_string(), Color::DarkGray));
    }

    lines
}

pub fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.width < 2 {
        return;
    }
    let inner = render_info_panel_frame(frame, area);
    frame.render_widget(Paragraph::new(info_lines(session)), inner);
}
