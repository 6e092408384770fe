//! Event Loop - Main console entry point and event handling
//!
//! One cooperative loop owns all timing: the generator tick, the rotation
//! sub-tick, script deadline polling, and the draw cadence. The only other
//! task is the spawned relay request, which reports back over the channel.

use crate::tui_state::SentinelTuiState;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sentinel_common::config::SentinelConfig;
use sentinel_common::engine::ROTATION_SUBTICK;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::info;

use super::input::submit_prompt;
use super::render::draw_ui;

/// Messages from spawned tasks back into the loop
#[derive(Debug)]
pub enum TuiMessage {
    /// Relay reply (or the fixed failure text) for the transcript
    IntelReply(String),
}

/// Run the console
pub async fn run(config: SentinelConfig) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = SentinelTuiState::new(config);
    let (tx, mut rx) = mpsc::channel(32);

    info!(
        intel_online = state.intel_online(),
        "console started"
    );

    let result = run_event_loop(&mut terminal, &mut state, tx, &mut rx).await;

    // Always attempt terminal cleanup, even when the loop errored
    let cleanup_result = restore_terminal(&mut terminal);
    result.and(cleanup_result)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut SentinelTuiState,
    tx: mpsc::Sender<TuiMessage>,
    rx: &mut mpsc::Receiver<TuiMessage>,
) -> Result<()> {
    let tick_interval = Duration::from_millis(state.config.tick_interval_ms);

    // Seed the charts so the first frame isn't empty
    state.engine.tick();
    let mut last_tick = Instant::now();
    let mut last_subtick = Instant::now();

    loop {
        // Generator tick and rotation sub-tick are mutually exclusive
        if state.engine.is_rotating() {
            if last_subtick.elapsed() >= ROTATION_SUBTICK {
                if state.engine.rotation_tick() {
                    // Completed: restart the normal cadence from now
                    last_tick = Instant::now();
                }
                last_subtick = Instant::now();
            }
        } else if last_tick.elapsed() >= tick_interval {
            state.engine.tick();
            last_tick = Instant::now();
        }

        // Script machines advance on their own deadlines
        state.scripts.poll();

        // Advance the waiting animation
        if state.waiting {
            state.waiting_frame = (state.waiting_frame + 1) % 8;
        }

        // Drain async messages (relay replies)
        while let Ok(msg) = rx.try_recv() {
            match msg {
                TuiMessage::IntelReply(reply) => {
                    state.waiting = false;
                    state.add_core_reply(reply);
                }
            }
        }

        terminal.draw(|f| draw_ui(f, state))?;

        // Keep the poll short: the rotation sub-tick runs at 50ms
        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;

            if let Event::Mouse(mouse) = event {
                use crossterm::event::MouseEventKind;
                match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        state.scroll_offset = state.scroll_offset.saturating_sub(3);
                    }
                    MouseEventKind::ScrollDown => {
                        state.scroll_offset = state.scroll_offset.saturating_add(3);
                    }
                    _ => {}
                }
            }

            if let Event::Key(key) = event {
                match (key.code, key.modifiers) {
                    // Ctrl+C - exit
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                        break;
                    }
                    // Ctrl+L - clear transcript
                    (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                        state.clear_conversation();
                    }
                    // Ctrl+U - clear input
                    (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                        state.input.clear();
                        state.cursor_pos = 0;
                    }
                    // Ctrl+R - rotate encryption key
                    (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                        if state.engine.start_rotation() {
                            last_subtick = Instant::now();
                        }
                    }
                    // Ctrl+T - inject threat simulation
                    (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                        state.engine.inject_threat();
                    }
                    // F1 - toggle help
                    (KeyCode::F(1), _) => {
                        state.show_help = !state.show_help;
                    }
                    // F2/F3 - run embedded scripts
                    (KeyCode::F(2), _) => {
                        state.scripts.execute("neural_bridge");
                    }
                    (KeyCode::F(3), _) => {
                        state.scripts.execute("pattern_analysis");
                    }
                    // Enter - submit prompt
                    (KeyCode::Enter, _) => {
                        submit_prompt(state, tx.clone());
                    }
                    // Backspace
                    (KeyCode::Backspace, _) => {
                        if state.cursor_pos > 0 {
                            state.input.remove(state.cursor_pos - 1);
                            state.cursor_pos -= 1;
                        }
                    }
                    // Up/Down - input history
                    (KeyCode::Up, _) => {
                        state.history_up();
                    }
                    (KeyCode::Down, _) => {
                        state.history_down();
                    }
                    // PageUp/PageDown - transcript scrolling
                    (KeyCode::PageUp, _) => {
                        state.scroll_offset = state.scroll_offset.saturating_sub(10);
                    }
                    (KeyCode::PageDown, _) => {
                        state.scroll_offset = state.scroll_offset.saturating_add(10);
                    }
                    // Character input
                    (KeyCode::Char(c), KeyModifiers::NONE)
                    | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                        state.input.insert(state.cursor_pos, c);
                        state.cursor_pos += 1;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("console stopped");
    Ok(())
}
