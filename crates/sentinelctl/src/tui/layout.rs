//! Layout - Canonical console layout grid computation
//!
//! Centralized layout grid with stable, predictable panel sizing. Computes
//! the panel rectangles for header, metrics column, diagnostics panel, intel
//! transcript, scripts strip, input, and status bar, degrading gracefully on
//! small terminals.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Console layout grid containing all panel rectangles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLayout {
    /// Header bar (top)
    pub header: Rect,
    /// Host metrics column (left; zero-width on narrow terminals)
    pub metrics: Rect,
    /// Quantum diagnostics panel (center)
    pub diagnostics: Rect,
    /// Intel transcript (right; zero-width on very narrow terminals)
    pub intel: Rect,
    /// Scripts strip (zero-height when the terminal is too short)
    pub scripts: Rect,
    /// Input area (above the status bar)
    pub input: Rect,
    /// Status bar (bottom)
    pub status_bar: Rect,
}

/// Minimum sizes, in degradation priority order
const MIN_HEADER_HEIGHT: u16 = 1;
const MIN_STATUS_BAR_HEIGHT: u16 = 1;
const MIN_INPUT_HEIGHT: u16 = 3;
const MIN_BODY_HEIGHT: u16 = 9;
const SCRIPTS_HEIGHT: u16 = 6;

/// Body columns below these widths collapse, metrics first
const MIN_WIDTH_FOR_METRICS: u16 = 84;
const MIN_WIDTH_FOR_INTEL: u16 = 56;

/// Compute the canonical console layout grid
///
/// Degrades on small terminals in this priority order:
/// 1. Header, status bar, input (always shown)
/// 2. Diagnostics body (priority, minimum 9 lines)
/// 3. Scripts strip (omitted first when height is tight)
/// 4. Metrics column, then intel column (collapse when width is tight)
pub fn compute_layout(frame_area: Rect) -> ConsoleLayout {
    let fixed_height = MIN_HEADER_HEIGHT + MIN_STATUS_BAR_HEIGHT + MIN_INPUT_HEIGHT;
    let remaining_height = frame_area.height.saturating_sub(fixed_height);
    let show_scripts = remaining_height >= MIN_BODY_HEIGHT + SCRIPTS_HEIGHT;

    let main_chunks = if show_scripts {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(MIN_HEADER_HEIGHT),
                Constraint::Min(MIN_BODY_HEIGHT),
                Constraint::Length(SCRIPTS_HEIGHT),
                Constraint::Length(MIN_INPUT_HEIGHT),
                Constraint::Length(MIN_STATUS_BAR_HEIGHT),
            ])
            .split(frame_area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(MIN_HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(MIN_INPUT_HEIGHT),
                Constraint::Length(MIN_STATUS_BAR_HEIGHT),
            ])
            .split(frame_area)
    };

    let header = main_chunks[0];
    let body = main_chunks[1];
    let (scripts, input, status_bar) = if show_scripts {
        (main_chunks[2], main_chunks[3], main_chunks[4])
    } else {
        (Rect::new(0, 0, 0, 0), main_chunks[2], main_chunks[3])
    };

    let show_metrics = frame_area.width >= MIN_WIDTH_FOR_METRICS;
    let show_intel = frame_area.width >= MIN_WIDTH_FOR_INTEL;

    let (metrics, diagnostics, intel) = if show_metrics {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(26),
                Constraint::Percentage(42),
                Constraint::Percentage(32),
            ])
            .split(body);
        (columns[0], columns[1], columns[2])
    } else if show_intel {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(body);
        (Rect::new(0, 0, 0, 0), columns[0], columns[1])
    } else {
        (Rect::new(0, 0, 0, 0), body, Rect::new(0, 0, 0, 0))
    };

    ConsoleLayout {
        header,
        metrics,
        diagnostics,
        intel,
        scripts,
        input,
        status_bar,
    }
}

/// Compose the header line with truncation for narrow terminals
///
/// Priority (rightmost truncates first):
/// 1. "QUANTUM-SUPER v{version}"
/// 2. "THREAT {level}"
/// 3. "ENTROPY {stability}%"
pub fn compose_header_text(width: u16, version: &str, stability: f64, threat_level: &str) -> String {
    let width = width as usize;
    let title = format!("QUANTUM-SUPER v{}", version);

    if width < title.len() + 3 {
        return title.chars().take(width).collect();
    }

    let separator = " │ ";
    let with_threat = format!("{}{}THREAT {}", title, separator, threat_level);
    let full = format!(
        "{}{}ENTROPY {:.4}%",
        with_threat, separator, stability
    );

    if full.len() <= width {
        full
    } else if with_threat.len() <= width {
        with_threat
    } else {
        title
    }
}

/// Check if a scroll indicator should be shown at the top of a panel
pub fn should_show_scroll_up_indicator(scroll_offset: usize) -> bool {
    scroll_offset > 0
}

/// Check if a scroll indicator should be shown at the bottom of a panel
pub fn should_show_scroll_down_indicator(
    total_content_lines: usize,
    visible_lines: usize,
    scroll_offset: usize,
) -> bool {
    scroll_offset + visible_lines < total_content_lines
}
