//! Top-level frame layout: title bar, transcript, input box.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::Session;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        session.state.label().to_string(),
        session.display.label().to_string(),
    );
    title_bar.render(frame, title_area);

    let mut message_list = MessageList::new(
        &mut tui.message_list,
        &session.transcript,
        session.state == crate::core::state::SessionState::Processing,
        spinner_frame,
    );
    message_list.render(frame, main_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Message;
    use crate::test_support::ready_session;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_renders_all_regions() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut session = ready_session();
        session.transcript.push(Message::user("hello"));
        let mut tui = TuiState::new();

        terminal
            .draw(|f| draw_ui(f, &session, &mut tui, 0))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sift"));
        assert!(text.contains("Backend:"));
        assert!(text.contains("hello"));
        assert!(text.contains("Query"));
    }

    #[test]
    fn test_draw_ui_empty_transcript_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let session = crate::core::state::Session::new("");
        let mut tui = TuiState::new();

        terminal
            .draw(|f| draw_ui(f, &session, &mut tui, 0))
            .unwrap();
    }
}
