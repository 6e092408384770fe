//! TUI State Management - Central state for the Sentinel console
//!
//! All rendering comes from this state struct. No loose println! after init.

use sentinel_common::config::SentinelConfig;
use sentinel_common::engine::DiagnosticsEngine;
use sentinel_common::intel::IntelClient;
use sentinel_common::scripts::ScriptRunner;
use std::time::Instant;

/// Greeting seeded into every fresh transcript
pub const GREETING: &str = "CORE INTELLIGENCE INITIALIZED. STANDING BY FOR COMMANDS.";

/// Transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatItem {
    /// Text typed by the operator
    Operator(String),
    /// Reply from the intelligence core
    Core(String),
    /// Local console notice
    System(String),
}

/// Central console state - everything rendered on screen comes from this
pub struct SentinelTuiState {
    /// Console configuration
    pub config: SentinelConfig,

    /// Live diagnostics engine
    pub engine: DiagnosticsEngine,

    /// Script status machines
    pub scripts: ScriptRunner,

    /// Relay client; None when the API key env var is not set
    pub intel: Option<IntelClient>,

    /// Chat transcript
    pub conversation: Vec<ChatItem>,

    /// Current input buffer
    pub input: String,

    /// Input cursor position
    pub cursor_pos: usize,

    /// Scroll offset for the transcript pane
    pub scroll_offset: usize,

    /// Input history for ↑/↓ navigation
    pub input_history: Vec<String>,

    /// Current position in history
    pub history_index: Option<usize>,

    /// Whether a relay request is outstanding (blocks resubmission)
    pub waiting: bool,

    /// Animation frame for the waiting indicator
    pub waiting_frame: usize,

    /// Whether the help overlay is shown
    pub show_help: bool,

    /// Console start time, for the uptime readout
    pub started: Instant,
}

impl SentinelTuiState {
    /// Fresh console state for a configuration
    ///
    /// A missing API key is not an error here: the console runs with the
    /// relay offline and reports the fixed failure message on submission.
    pub fn new(config: SentinelConfig) -> Self {
        let intel = IntelClient::from_config(&config.intel).ok();

        Self {
            config,
            engine: DiagnosticsEngine::new(),
            scripts: ScriptRunner::new(),
            intel,
            conversation: vec![ChatItem::Core(GREETING.to_string())],
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            input_history: Vec::new(),
            history_index: None,
            waiting: false,
            waiting_frame: 0,
            show_help: false,
            started: Instant::now(),
        }
    }

    /// Whether the relay is configured
    pub fn intel_online(&self) -> bool {
        self.intel.is_some()
    }

    /// Add operator text to the transcript and input history
    pub fn add_operator_message(&mut self, message: String) {
        self.conversation.push(ChatItem::Operator(message.clone()));

        if !message.trim().is_empty() {
            self.input_history.push(message);
            if self.input_history.len() > 100 {
                self.input_history.remove(0);
            }
        }

        self.history_index = None;
        self.scroll_to_bottom();
    }

    /// Add a core reply to the transcript
    pub fn add_core_reply(&mut self, reply: String) {
        self.conversation.push(ChatItem::Core(reply));
        self.scroll_to_bottom();
    }

    /// Add a local console notice
    pub fn add_system_message(&mut self, message: String) {
        self.conversation.push(ChatItem::System(message));
        self.scroll_to_bottom();
    }

    /// Clear the transcript back to the greeting
    pub fn clear_conversation(&mut self) {
        self.conversation.clear();
        self.conversation.push(ChatItem::Core(GREETING.to_string()));
        self.scroll_offset = 0;
    }

    /// Scroll to the transcript bottom (rendering clamps the offset)
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = usize::MAX;
    }

    /// Uptime in whole seconds
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Navigate input history up
    pub fn history_up(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        match self.history_index {
            None => {
                self.history_index = Some(self.input_history.len() - 1);
                self.input = self.input_history[self.input_history.len() - 1].clone();
            }
            Some(idx) if idx > 0 => {
                self.history_index = Some(idx - 1);
                self.input = self.input_history[idx - 1].clone();
            }
            _ => {}
        }
        self.cursor_pos = self.input.len();
    }

    /// Navigate input history down
    pub fn history_down(&mut self) {
        match self.history_index {
            Some(idx) if idx < self.input_history.len() - 1 => {
                self.history_index = Some(idx + 1);
                self.input = self.input_history[idx + 1].clone();
            }
            Some(_) => {
                self.history_index = None;
                self.input.clear();
            }
            None => {}
        }
        self.cursor_pos = self.input.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SentinelTuiState {
        SentinelTuiState::new(SentinelConfig::default())
    }

    #[test]
    fn test_transcript_starts_with_greeting() {
        let state = state();
        assert_eq!(state.conversation, vec![ChatItem::Core(GREETING.to_string())]);
        assert!(!state.waiting);
    }

    #[test]
    fn test_clear_restores_greeting() {
        let mut state = state();
        state.add_operator_message("status report".to_string());
        state.add_core_reply("all sectors nominal".to_string());
        state.clear_conversation();
        assert_eq!(state.conversation, vec![ChatItem::Core(GREETING.to_string())]);
    }

    #[test]
    fn test_history_navigation() {
        let mut state = state();
        state.add_operator_message("first".to_string());
        state.add_operator_message("second".to_string());

        state.history_up();
        assert_eq!(state.input, "second");
        state.history_up();
        assert_eq!(state.input, "first");
        state.history_up();
        assert_eq!(state.input, "first");

        state.history_down();
        assert_eq!(state.input, "second");
        state.history_down();
        assert_eq!(state.input, "");
    }

    #[test]
    fn test_input_history_is_bounded() {
        let mut state = state();
        for i in 0..150 {
            state.add_operator_message(format!("cmd {}", i));
        }
        assert_eq!(state.input_history.len(), 100);
        assert_eq!(state.input_history[0], "cmd 50");
    }
}
