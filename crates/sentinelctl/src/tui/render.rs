//! Rendering - UI drawing for the console panels
//!
//! Everything drawn here is a read-only view of `SentinelTuiState`; alert
//! styling is re-derived from the latest reading on every frame.

use crate::tui_state::{ChatItem, SentinelTuiState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Sparkline},
    Frame,
};
use sentinel_common::diagnostics::{DECAY_THRESHOLD, INTEGRITY_THRESHOLD};
use sentinel_common::scripts::{ScriptStatus, EMBEDDED_SCRIPTS};

use super::layout::{self, ConsoleLayout};
use super::utils::{draw_help_overlay, wrap_text};

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Draw the full console frame
pub fn draw_ui(f: &mut Frame, state: &SentinelTuiState) {
    let size = f.size();
    let grid = layout::compute_layout(size);

    draw_header(f, grid.header, state);
    if grid.metrics.width > 0 {
        draw_metrics_panel(f, grid.metrics, state);
    }
    draw_diagnostics_panel(f, grid.diagnostics, state);
    if grid.intel.width > 0 {
        draw_intel_panel(f, grid.intel, state);
    }
    if grid.scripts.height > 0 {
        draw_scripts_panel(f, grid.scripts, state);
    }
    draw_status_bar(f, grid.status_bar, state, &grid);
    super::input::draw_input_bar(f, grid.input, state);

    if state.show_help {
        draw_help_overlay(f, size);
    }
}

/// Threat level shown in the header
pub fn threat_level(alert: bool) -> &'static str {
    if alert {
        "CRITICAL"
    } else {
        "NOMINAL"
    }
}

/// Format uptime seconds as `HH:MM:SS`
pub fn format_uptime(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn draw_header(f: &mut Frame, area: Rect, state: &SentinelTuiState) {
    let alert = state.engine.alerts().alert;
    let text = layout::compose_header_text(
        area.width,
        env!("CARGO_PKG_VERSION"),
        state.engine.metrics().quantum_stability,
        threat_level(alert),
    );

    let color = if alert {
        Color::LightRed
    } else {
        Color::Cyan
    };

    let header = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]))
    .style(Style::default().bg(Color::Rgb(8, 12, 24)));

    f.render_widget(header, area);
}

fn meter_line(label: &str, percent: u8, width: usize, color: Color) -> Line<'static> {
    let bar_width = width.saturating_sub(16).max(4);
    let filled = (percent as usize * bar_width) / 100;
    let bar: String = (0..bar_width)
        .map(|i| if i < filled { '█' } else { '·' })
        .collect();

    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:>3}% ", percent), Style::default().fg(Color::White)),
        Span::styled(bar, Style::default().fg(color)),
    ])
}

fn draw_metrics_panel(f: &mut Frame, area: Rect, state: &SentinelTuiState) {
    let block = Block::default()
        .title(" Host Metrics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Indexed(31)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(inner);

    let metrics = state.engine.metrics();
    let width = chunks[0].width as usize;
    let lines = vec![
        meter_line("CPU_LOAD", metrics.cpu, width, Color::Cyan),
        meter_line("MEM_ALLOC", metrics.memory, width, Color::LightBlue),
        meter_line("NET_IO", metrics.network, width, Color::Green),
        Line::from(Span::styled(
            "Packet Analysis (p/s)",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);

    let packets = state.engine.packet_history().sparkline(70.0, 100);
    let sparkline = Sparkline::default()
        .data(&packets)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(sparkline, chunks[1]);
}

fn draw_diagnostics_panel(f: &mut Frame, area: Rect, state: &SentinelTuiState) {
    let reading = state.engine.reading();
    let flags = state.engine.alerts();

    let border_color = if flags.alert {
        Color::LightRed
    } else {
        Color::Green
    };
    let block = Block::default()
        .title(" Quantum Encryption Diagnostics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // alert banner / scan line
            Constraint::Length(4), // readings
            Constraint::Length(3), // decay sparkline
            Constraint::Min(0),    // vulnerabilities + latest threat
            Constraint::Length(1), // rotation gauge / footer
        ])
        .split(inner);

    // Banner row
    if flags.alert {
        let mut causes = Vec::new();
        if flags.critical_integrity {
            causes.push("INTG_BREACH");
        }
        if flags.critical_decay {
            causes.push("DECAY_OVERFLOW");
        }
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(
                " CRITICAL_INSTABILITY_DETECTED ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", causes.join(" ")),
                Style::default().fg(Color::LightRed),
            ),
        ]));
        f.render_widget(banner, chunks[0]);
    } else {
        let scan = Paragraph::new(Span::styled(
            " SCANNING SECTOR 0xFF...",
            Style::default().fg(Color::Green),
        ));
        f.render_widget(scan, chunks[0]);
    }

    // Readings
    let integrity_style = if flags.critical_integrity {
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let decay_style = if flags.critical_decay {
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let label = Style::default().fg(Color::DarkGray);

    let readings = vec![
        Line::from(vec![
            Span::styled("KEY_STRENGTH       ", label),
            Span::styled(
                format!("{} qubits", reading.key_strength),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("INTEGRITY_SCORE    ", label),
            Span::styled(format!("{:.2}%", reading.integrity_score), integrity_style),
            Span::styled(
                format!("  (breach < {:.1})", INTEGRITY_THRESHOLD),
                label,
            ),
        ]),
        Line::from(vec![
            Span::styled("ENTANGLEMENT_DECAY ", label),
            Span::styled(
                format!("{:.3} %/s", reading.entanglement_decay),
                decay_style,
            ),
            Span::styled(
                format!("  ({} > {:.2})", if flags.critical_decay { "UNSTABLE" } else { "STABLE" }, DECAY_THRESHOLD),
                label,
            ),
        ]),
        Line::from(vec![
            Span::styled("NOISE_LEVEL        ", label),
            Span::styled(
                format!("{:.3}", reading.noise_level),
                Style::default().fg(Color::White),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(readings), chunks[1]);

    // Decay chart (clamped to the documented ceiling)
    let decay = state.engine.decay_history().sparkline(0.2, 100);
    let spark_color = if flags.critical_decay {
        Color::LightRed
    } else {
        Color::Green
    };
    let sparkline = Sparkline::default()
        .data(&decay)
        .style(Style::default().fg(spark_color));
    f.render_widget(sparkline, chunks[2]);

    // Vulnerabilities and the latest threat detail
    let mut lines = vec![Line::from(Span::styled(
        "POTENTIAL_VULNERABILITIES",
        Style::default().fg(Color::DarkGray),
    ))];
    for name in &reading.active_vulnerabilities {
        lines.push(Line::from(vec![
            Span::styled(" • ", Style::default().fg(Color::Yellow)),
            Span::styled(name.clone(), Style::default().fg(Color::White)),
        ]));
    }
    if let Some(threat) = state.engine.latest_threat() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "LATEST THREAT ",
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}]", threat.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(" {}", threat.name),
            Style::default().fg(Color::LightRed),
        )));
        lines.push(Line::from(Span::styled(
            format!(" impact: {}", threat.impact),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!(" origin: {}", threat.origin),
            Style::default().fg(Color::Gray),
        )));
    }
    f.render_widget(Paragraph::new(lines), chunks[3]);

    // Footer row: rotation progress while rotating
    if let Some(progress) = state.engine.rotation_progress() {
        let gauge = Gauge::default()
            .ratio((progress / 100.0).clamp(0.0, 1.0))
            .label(format!("KEY ROTATION {:>3.0}%", progress))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Rgb(20, 30, 50)));
        f.render_widget(gauge, chunks[4]);
    } else if flags.alert {
        let recal = Paragraph::new(Span::styled(
            " RE-CALIBRATING CORE...",
            Style::default().fg(Color::LightRed),
        ));
        f.render_widget(recal, chunks[4]);
    }
}

fn draw_intel_panel(f: &mut Frame, area: Rect, state: &SentinelTuiState) {
    let content_width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();

    for item in &state.conversation {
        let (prefix, style, body) = match item {
            ChatItem::Operator(msg) => (
                "OPERATOR: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                msg,
            ),
            ChatItem::Core(msg) => (
                "CORE_AI: ",
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
                msg,
            ),
            ChatItem::System(msg) => (
                "SYS: ",
                Style::default().fg(Color::Yellow),
                msg,
            ),
        };

        let wrapped = wrap_text(body, content_width.saturating_sub(prefix.len()));
        for (i, wrapped_line) in wrapped.iter().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::raw(wrapped_line.clone()),
                ]));
            } else {
                lines.push(Line::from(Span::raw(format!(
                    "{}{}",
                    " ".repeat(prefix.len()),
                    wrapped_line
                ))));
            }
        }
        lines.push(Line::from(""));
    }

    if state.waiting {
        lines.push(Line::from(Span::styled(
            format!(
                "{} awaiting core response...",
                SPINNER_FRAMES[state.waiting_frame % SPINNER_FRAMES.len()]
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let total_lines = lines.len();
    let visible_lines = area.height.saturating_sub(2) as usize;
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let actual_scroll = if state.scroll_offset >= max_scroll {
        max_scroll
    } else {
        state.scroll_offset
    };

    let scroll_indicator = if total_lines > visible_lines {
        let up = if layout::should_show_scroll_up_indicator(actual_scroll) {
            "▲"
        } else {
            " "
        };
        let down = if layout::should_show_scroll_down_indicator(
            total_lines,
            visible_lines,
            actual_scroll,
        ) {
            "▼"
        } else {
            " "
        };
        format!(" {}{} ", up, down)
    } else {
        String::new()
    };

    let online = if state.intel_online() {
        Span::styled("ONLINE", Style::default().fg(Color::Green))
    } else {
        Span::styled("OFFLINE", Style::default().fg(Color::Red))
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::raw(format!(" Cyber Intelligence Core{} [", scroll_indicator)),
                    online,
                    Span::raw("] "),
                ]))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Indexed(63))),
        )
        .scroll((actual_scroll as u16, 0));

    f.render_widget(paragraph, area);
}

fn script_status_style(status: ScriptStatus) -> Style {
    match status {
        ScriptStatus::Idle => Style::default().fg(Color::DarkGray),
        ScriptStatus::Running => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ScriptStatus::Success => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

fn draw_scripts_panel(f: &mut Frame, area: Rect, state: &SentinelTuiState) {
    let block = Block::default()
        .title(" Embedded Scripts (display only) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Indexed(31)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let keys = ["F2", "F3"];
    let mut lines = Vec::new();
    for (script, key) in EMBEDDED_SCRIPTS.iter().zip(keys) {
        let status = state.scripts.status(script.id);
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{:<22}", script.filename),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{:<8}", script.language),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(status.label(), script_status_style(status)),
        ]));
        // First line of the source as a teaser
        let teaser = script.content.lines().next().unwrap_or("");
        lines.push(Line::from(Span::styled(
            format!("      {}", teaser),
            Style::default().fg(Color::Indexed(240)),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_status_bar(f: &mut Frame, area: Rect, state: &SentinelTuiState, grid: &ConsoleLayout) {
    let now = chrono::Local::now().format("%H:%M:%S");
    let flags = state.engine.alerts();

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(now.to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" │ LIVE LINK: "),
        Span::styled("SECURE", Style::default().fg(Color::Green)),
        Span::raw(" │ UPTIME "),
        Span::styled(
            format_uptime(state.uptime_secs()),
            Style::default().fg(Color::Gray),
        ),
    ];

    if flags.alert {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "ALERT",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if state.engine.is_rotating() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("ROTATING", Style::default().fg(Color::Cyan)));
    }

    // Surface the intel state here when the side panel is collapsed
    if grid.intel.width == 0 {
        spans.push(Span::raw(" │ INTEL: "));
        spans.push(if state.intel_online() {
            Span::styled("ONLINE", Style::default().fg(Color::Green))
        } else {
            Span::styled("OFFLINE", Style::default().fg(Color::Red))
        });
    }

    spans.push(Span::raw(" │ F1 Help"));

    let status_bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Rgb(16, 16, 24)));
    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threat_level_labels() {
        assert_eq!(threat_level(true), "CRITICAL");
        assert_eq!(threat_level(false), "NOMINAL");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(59), "00:00:59");
        assert_eq!(format_uptime(3661), "01:01:01");
        assert_eq!(format_uptime(90061), "25:01:01");
    }
}
