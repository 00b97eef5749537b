//! # InputBox Component
//!
//! Single-line query input. Queries are one logical line, so pasted newlines
//! are flattened to spaces. Long input scrolls horizontally to keep the
//! cursor visible.
//!
//! The buffer is internal state; submission hands the text to the parent and
//! resets the buffer. A blank buffer never submits.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed on a non-blank buffer)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`
    cursor_pos: usize,
    /// Horizontal scroll in display columns
    scroll_cols: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor_pos: 0,
            scroll_cols: 0,
        }
    }

    /// Replace the buffer contents, placing the cursor at the end.
    /// Used by the example-query keys to pre-fill the input.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.replace('\n', " ");
        self.cursor_pos = self.buffer.len();
    }

    fn prev_char_boundary(&self) -> usize {
        self.buffer[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self) -> usize {
        self.buffer[self.cursor_pos..]
            .chars()
            .next()
            .map(|c| self.cursor_pos + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Cursor position in display columns (wide characters count as 2).
    fn cursor_col(&self) -> u16 {
        self.buffer[..self.cursor_pos].width() as u16
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);

        // Keep the cursor inside the visible window
        let cursor_col = self.cursor_col();
        if cursor_col < self.scroll_cols {
            self.scroll_cols = cursor_col;
        } else if inner_width > 0 && cursor_col >= self.scroll_cols + inner_width {
            self.scroll_cols = cursor_col - inner_width + 1;
        }

        let input = Paragraph::new(self.buffer.as_str())
            .block(
                Block::bordered()
                    .border_type(ratatui::widgets::BorderType::Rounded)
                    .title("Query (Enter to send)"),
            )
            .scroll((0, self.scroll_cols))
            .style(ratatui::style::Style::default().fg(ratatui::style::Color::Green));

        frame.render_widget(input, area);
        frame.set_cursor_position((
            area.x + 1 + cursor_col.saturating_sub(self.scroll_cols),
            area.y + 1,
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor_pos, *c);
                self.cursor_pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let flat = text.replace('\n', " ");
                self.buffer.insert_str(self.cursor_pos, &flat);
                self.cursor_pos += flat.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor_pos > 0 {
                    let prev = self.prev_char_boundary();
                    self.buffer.drain(prev..self.cursor_pos);
                    self.cursor_pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor_pos < self.buffer.len() {
                    let next = self.next_char_boundary();
                    self.buffer.drain(self.cursor_pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = self.prev_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor_pos < self.buffer.len() {
                    self.cursor_pos = self.next_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                self.cursor_pos = 0;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd => {
                self.cursor_pos = self.buffer.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor_pos = 0;
                self.scroll_cols = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut input = InputBox::new();
        type_str(&mut input, "hello");
        assert_eq!(input.buffer, "hello");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(input.buffer, ">hello");
    }

    #[test]
    fn test_backspace_handles_multibyte_chars() {
        let mut input = InputBox::new();
        type_str(&mut input, "caf\u{e9}");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "caf");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "ca");
    }

    #[test]
    fn test_delete_removes_char_under_cursor() {
        let mut input = InputBox::new();
        type_str(&mut input, "abc");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");
    }

    #[test]
    fn test_submit_takes_buffer_and_resets() {
        let mut input = InputBox::new();
        type_str(&mut input, "my query");

        let event = input.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(InputEvent::Submit("my query".to_string())));
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_blank_buffer_never_submits() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);

        type_str(&mut input, "   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        // Whitespace is kept in the buffer for the user to edit
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("line one\nline two".to_string()));
        assert_eq!(input.buffer, "line one line two");
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut input = InputBox::new();
        input.set_text("prefilled query");
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, "prefilled query!");
    }
}
