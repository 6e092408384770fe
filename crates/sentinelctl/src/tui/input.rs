//! Input - Prompt bar drawing and submission handling

use crate::tui_state::SentinelTuiState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sentinel_common::intel::RELAY_FAILURE_MESSAGE;
use tokio::sync::mpsc;
use tracing::warn;

use super::event_loop::TuiMessage;

/// Submit the current input buffer to the intelligence core
///
/// Refused while a request is outstanding: one submission, one request. A
/// console without a configured relay reports the same fixed failure message
/// an unreachable relay would.
pub fn submit_prompt(state: &mut SentinelTuiState, tx: mpsc::Sender<TuiMessage>) {
    if state.waiting {
        return;
    }

    let prompt = state.input.trim().to_string();
    if prompt.is_empty() {
        return;
    }

    state.input.clear();
    state.cursor_pos = 0;
    state.add_operator_message(prompt.clone());
    state.waiting = true;

    match &state.intel {
        Some(client) => {
            let client = client.clone();
            tokio::spawn(async move {
                let reply = match client.generate(&prompt).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "intel relay failed");
                        RELAY_FAILURE_MESSAGE.to_string()
                    }
                };
                let _ = tx.send(TuiMessage::IntelReply(reply)).await;
            });
        }
        None => {
            tokio::spawn(async move {
                let _ = tx
                    .send(TuiMessage::IntelReply(RELAY_FAILURE_MESSAGE.to_string()))
                    .await;
            });
        }
    }
}

/// Draw the prompt bar
pub fn draw_input_bar(f: &mut Frame, area: Rect, state: &SentinelTuiState) {
    let (title, border_color) = if state.waiting {
        (" TRANSMITTING... ", Color::Yellow)
    } else {
        (" ENTER COMMAND ", Color::Indexed(63))
    };

    let mut spans = vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(state.input.clone()),
    ];
    if !state.waiting {
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );

    f.render_widget(input, area);
}
