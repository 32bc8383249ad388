//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::app::contact::SubmitPhase;

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn emphasis_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn accent_style() -> Style {
        Style::default()
            .fg(Color::Rgb(201, 42, 42))
            .add_modifier(Modifier::BOLD)
    }

    pub fn hero_image_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn tab_style(active: bool) -> Style {
        if active {
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn card_hover_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_pressed_style() -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
    }

    pub fn gauge_filled_style() -> Style {
        Style::default().fg(Color::Rgb(201, 42, 42))
    }

    pub fn gauge_unfilled_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn field_style(editing: bool) -> Style {
        if editing {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED)
        }
    }

    /// Submit button: solid while it accepts submits, dimmed while disabled.
    pub fn button_style(phase: SubmitPhase) -> Style {
        match phase {
            SubmitPhase::Idle => Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(201, 42, 42))
                .add_modifier(Modifier::BOLD),
            SubmitPhase::Sending => Style::default()
                .fg(Color::Gray)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            SubmitPhase::Sent => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Bulb colour: dim at rest, warmer the further it is tilted.
    pub fn bulb_color(active: bool, intensity: f64) -> Color {
        match (active, intensity) {
            (false, i) if i < 1.0 => Color::DarkGray,
            (_, i) if i > 15.0 => Color::LightYellow,
            _ => Color::Yellow,
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn navbar_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn curtain_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::Rgb(201, 42, 42))
    }

    pub fn selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }
}
