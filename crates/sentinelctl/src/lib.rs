//! Sentinel Control - Terminal console for the Quantum-Super intelligence hub
//!
//! Library surface for the `sentinelctl` binary: CLI parsing, logging setup,
//! the TUI, and the headless simulate command.

pub mod cli;
pub mod logging;
pub mod simulate;
pub mod tui;
pub mod tui_state;
