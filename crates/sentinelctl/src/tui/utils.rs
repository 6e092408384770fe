//! Utilities - Text wrapping and the help overlay

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Wrap text to the given width, preserving words
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let wrapped: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    if wrapped.is_empty() {
        vec![String::new()]
    } else {
        wrapped
    }
}

/// Centered overlay rectangle of the given size, clamped to the frame
pub fn centered_rect(width: u16, height: u16, frame: Rect) -> Rect {
    let width = width.min(frame.width);
    let height = height.min(frame.height);
    Rect::new(
        frame.x + (frame.width - width) / 2,
        frame.y + (frame.height - height) / 2,
        width,
        height,
    )
}

/// Draw the key-binding help overlay
pub fn draw_help_overlay(f: &mut Frame, frame_area: Rect) {
    let area = centered_rect(46, 14, frame_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let rows = [
        ("Enter", "Send prompt to the intelligence core"),
        ("Ctrl+R", "Rotate encryption key"),
        ("Ctrl+T", "Inject threat simulation"),
        ("F2", "Run bridge.php"),
        ("F3", "Run pattern_analysis.py"),
        ("Ctrl+L", "Clear transcript"),
        ("Ctrl+U", "Clear input"),
        ("PgUp/PgDn", "Scroll transcript"),
        ("F1", "Toggle this help"),
        ("Ctrl+C", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, action) in rows {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<10}", key), key_style),
            Span::raw(action),
        ]));
    }

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let wrapped = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(wrapped.len() > 1);
        for line in &wrapped {
            assert!(line.len() <= 10);
        }
    }

    #[test]
    fn test_wrap_text_zero_width_passthrough() {
        assert_eq!(wrap_text("abc", 0), vec!["abc".to_string()]);
    }

    #[test]
    fn test_wrap_text_empty_input() {
        assert_eq!(wrap_text("", 20), vec![String::new()]);
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let frame = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(100, 100, frame);
        assert!(rect.width <= frame.width);
        assert!(rect.height <= frame.height);
    }
}
