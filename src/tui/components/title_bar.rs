//! # TitleBar Component
//!
//! Top status line showing the session lifecycle state and the backend
//! readiness indicator.
//!
//! TitleBar is purely presentational: it receives both labels as props and
//! holds no internal state, which keeps it trivial to test. It renders a
//! plain `Span` rather than a `Block` since it's always a single line.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Session lifecycle label (e.g. "Ready", "Processing...")
    pub state_label: String,
    /// Backend readiness label (e.g. "Ready (128 chunks)", "Not Initialized")
    pub status_label: String,
}

impl TitleBar {
    pub fn new(state_label: String, status_label: String) -> Self {
        Self {
            state_label,
            status_label,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = format!(
            "Sift | {} | Backend: {}",
            self.state_label, self.status_label
        );
        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_shows_state_and_status() {
        let mut title_bar = TitleBar::new(
            "Ready".to_string(),
            "Ready (128 chunks)".to_string(),
        );
        let text = rendered_text(&mut title_bar);
        assert!(text.contains("Sift"));
        assert!(text.contains("| Ready |"));
        assert!(text.contains("Backend: Ready (128 chunks)"));
    }

    #[test]
    fn test_title_bar_shows_failure_status() {
        let mut title_bar = TitleBar::new(
            "Failed".to_string(),
            "Connection Error".to_string(),
        );
        let text = rendered_text(&mut title_bar);
        assert!(text.contains("Failed"));
        assert!(text.contains("Backend: Connection Error"));
    }
}
