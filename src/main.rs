//! A terminal landing page whose hero reacts to scrolling and the pointer.
//!
//! Scroll and pointer input is coalesced to at most one update per frame;
//! the hero bulb eases towards the pointer with a self-rescheduling loop.
//! Run with `--print-config` to see the effective configuration.

mod app;
mod ui;

use std::io::{self, stderr};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hero_motion::config::AppConfig;
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Terminal};
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::ui::{
    curtain::Curtain, menu::MenuOverlay, page_widget, page_widget::PageView, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll- and pointer-driven terminal landing page")]
struct Cli {
    /// Repaint rate in frames per second (1-240).
    #[arg(long)]
    fps: Option<u32>,

    /// Smoothing factor of the bulb follow, in (0, 1].
    #[arg(long)]
    alpha: Option<f64>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "save-config")]
    save_config: bool,
}

fn effective_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load();
    if let Some(fps) = cli.fps {
        config.set_fps(fps).context("invalid --fps")?;
    }
    if let Some(alpha) = cli.alpha {
        config.set_alpha(alpha).context("invalid --alpha")?;
    }
    Ok(config)
}

fn status_line(state: &AppState) -> String {
    let text = match &state.status_message {
        Some(msg) => msg.clone(),
        None => state.config.status_bar_hint(),
    };
    format!(
        "{text}  │ scroll {}/{}  bulb {}",
        state.parallax.updates_applied(),
        state.parallax.events_seen(),
        page_widget::bulb_transform_label(state),
    )
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }
    if cli.save_config {
        let path = config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let frame_interval = config.frame_interval();
    let (width, height) = crossterm::terminal::size()?;
    let mut state = AppState::new(config, Rect::new(0, 0, width, height))?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader();
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    tracing::info!(fps = state.config.fps, "starting");

    // ── event loop ────────────────────────────────────────────
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                }
            }

            _ = frames.tick() => {
                let now = Instant::now();
                state.advance(now - last_frame);
                last_frame = now;

                // Deferred effect updates land right before the repaint.
                state.run_frame();

                terminal.draw(|frame| {
                    let layout = state.layout();
                    frame.render_widget(
                        PageView { state: &state, layout: &layout },
                        frame.area(),
                    );
                    let status = Paragraph::new(status_line(&state)).style(Theme::status_bar_style());
                    frame.render_widget(status, layout.status_area);
                    if let Some(transition) = state.transition {
                        frame.render_widget(Curtain { transition }, layout.content_area);
                    }
                    if state.menu.open {
                        frame.render_widget(MenuOverlay { selected: state.menu.selected }, frame.area());
                    }
                })?;
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.shutdown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
