pub mod game_common;
pub mod info_panel;
pub mod play_field;

use self::game_common::{
    create_game_layout, render_centered_prompt, render_quit_status_bar, render_status_bar,
    render_too_small,
};
use crate::world::player::PlayerState;
use crate::world::GameSession;
use ratatui::{layout::Rect, style::Color, Frame};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 14;
const INFO_PANEL_WIDTH: u16 = 20;

const PLAY_CONTROLS: &[(&str, &str)] = &[
    ("[Up]", "Jump/Thrust"),
    ("[L/R]", "Steer"),
    ("[P]", "Pause"),
    ("[Esc]", "Quit"),
];

/// Draw one frame of the session.
pub fn draw(frame: &mut Frame, session: &GameSession) {
    let area = frame.size();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = create_game_layout(
        frame,
        area,
        " Skyhop ",
        Color::LightBlue,
        INFO_PANEL_WIDTH,
    );

    play_field::render_play_field(frame, layout.content, &session.scene);

    if session.waiting_to_start {
        render_centered_prompt(
            frame,
            layout.content,
            "[ Press Up to Start ]",
            Color::White,
        );
    } else if session.paused {
        render_centered_prompt(frame, layout.content, "[ Paused ]", Color::Yellow);
    }

    render_status_bar_content(frame, layout.status_bar, session);
    info_panel::render_info_panel(frame, layout.info_panel, session);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &GameSession) {
    if render_quit_status_bar(frame, area, session.quit_pending) {
        return;
    }

    if session.waiting_to_start {
        let status = match session.last_run_score {
            Some(score) => format!("Last run: {}", score),
            None => "Ready".to_string(),
        };
        render_status_bar(
            frame,
            area,
            &status,
            Color::LightBlue,
            &[("[Up]", "Start"), ("[Esc]", "Quit")],
        );
        return;
    }

    if session.paused {
        render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[P]", "Resume"), ("[Esc]", "Quit")],
        );
        return;
    }

    let (status, color) = match session.scene.player.state() {
        PlayerState::Grounded => ("Landed", Color::Green),
        PlayerState::Airborne => ("Flying", Color::LightBlue),
        PlayerState::OutOfFuel => ("NO FUEL", Color::Red),
    };
    render_status_bar(frame, area, status, color, PLAY_CONTROLS);
}
