use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{Message, Sender};
use crate::tui::component::Component;
use crate::tui::render;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A transient component that renders a single transcript message.
///
/// Created fresh each frame with a reference to the message it draws. The
/// body goes through the markup renderer, so bold and italic segments and
/// the sources block keep their styling inside the bordered card.
///
/// `is_active` brightens the border; the list sets it on the last message
/// while a reply is being generated.
#[derive(Clone, Copy)]
pub struct MessageCard<'a> {
    pub message: &'a Message,
    pub is_active: bool,
}

impl<'a> MessageCard<'a> {
    pub fn new(message: &'a Message, is_active: bool) -> Self {
        Self { message, is_active }
    }

    /// Calculate the height required for this message at a given width.
    ///
    /// Uses `textwrap` to predict wrapping *without* rendering, so the parent
    /// list can build its scroll canvas up front. The wrap options match
    /// Ratatui's `Paragraph` behavior for a 1:1 height mapping. Because the
    /// renderer splits on line breaks, each rendered line wraps independently.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding. Return 1 row so the
            // message still occupies space in the layout.
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let content_lines: u16 = render::render(message)
            .lines
            .iter()
            .map(|line| {
                let plain: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                if plain.is_empty() {
                    1
                } else {
                    textwrap::wrap(&plain, options.clone()).len().max(1) as u16
                }
            })
            .sum();

        content_lines.max(1) + VERTICAL_OVERHEAD
    }

    fn base_style(sender: Sender) -> Style {
        match sender {
            Sender::User => Style::default().fg(Color::Green),
            Sender::Assistant => Style::default().fg(Color::Blue),
        }
    }
}

impl<'a> Widget for MessageCard<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Self::base_style(self.message.sender);
        let border_style = if self.is_active {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.message.sender.label())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(render::render(self.message))
            .style(style)
            .wrap(Wrap { trim: false });

        paragraph.render(inner_area, buf);
    }
}

impl<'a> Component for MessageCard<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
