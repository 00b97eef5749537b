//! # MessageList Component
//!
//! Scrollable view of the conversation transcript.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).
//! Since `Component::render` takes `&mut self`, the layout cache and scroll
//! state can be mutated during the render pass, aligning with Ratatui's
//! `StatefulWidget` pattern.
//!
//! Transcript messages are immutable once appended, so cached heights stay
//! valid until the width changes or the transcript is cleared.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageCard;
use crate::tui::event::TuiEvent;

/// Frames for the waiting indicator shown while a reply is in flight.
const SPINNER_FRAMES: [&str; 4] = ["·  ", "·· ", "···", "   "];

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    /// Prevents overscrolling past the last message.
    pub fn clamp_scroll(&mut self) {
        let total_content_height: u16 = self.layout.heights.iter().sum();
        let max_y = total_content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    /// Called on scroll-down events so that scrolling past the end re-pins to bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let total_content_height: u16 = self.layout.heights.iter().sum();
        let max_y = total_content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a [Message],
    /// A chat request is in flight; show the waiting indicator.
    pub is_processing: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a [Message],
        is_processing: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            is_processing,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let num_items = self.transcript.len();

        // 1. Update layout cache (internal mutation)
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(num_items, content_width);
        layout.heights.truncate(reusable.min(layout.heights.len()));

        for message in self.transcript.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageCard::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(num_items, content_width);

        let total_height: u16 = self.state.layout.heights.iter().sum();
        let indicator_height = if self.is_processing { 1 } else { 0 };
        let canvas_height = total_height + indicator_height;

        // 2. Clamp scroll offset to prevent overscrolling past content.
        // Skip when auto-scrolling: scroll_to_bottom already targets the end.
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let is_last = i == num_items.saturating_sub(1);
            let card = MessageCard::new(
                &self.transcript[i],
                is_last && self.is_processing,
            );
            scroll_view.render_widget(card, Rect::new(0, y_offset, content_width, height));
            y_offset += height;
        }

        if self.is_processing {
            let indicator = Span::styled(
                format!("thinking{}", SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            scroll_view.render_widget(indicator, Rect::new(1, total_height, content_width, 1));
        }

        // Auto-scroll (mutation)
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` rather than `MessageList`:
/// event handling needs the persistent scroll state, while the component is
/// recreated each frame with fresh props.
impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally, no events emitted

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                None
            }
            _ => None,
        }
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid. Messages are immutable, so
    /// everything is reusable unless the width changed or the transcript
    /// shrank (a clear).
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len()
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_cache_reuse() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 5];
        cache.update_metadata(5, 80);

        // Same width, same or more messages → all cached heights reusable
        assert_eq!(cache.reusable_count(5, 80), 5);
        assert_eq!(cache.reusable_count(6, 80), 5);

        // Width changed → full rebuild
        assert_eq!(cache.reusable_count(5, 40), 0);

        // Transcript shrank (clear) → full rebuild
        assert_eq!(cache.reusable_count(1, 80), 0);
    }

    #[test]
    fn test_prefix_heights_accumulate() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3, 5, 4];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.prefix_heights, vec![3, 8, 12]);
    }

    #[test]
    fn test_visible_range_excludes_offscreen_messages() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![10; 20]; // 200 rows of content
        cache.rebuild_prefix_heights();

        // Viewport of 20 rows at offset 100: rows 90..130 with buffer
        let range = cache.visible_range(100, 20);
        assert!(range.start >= 8);
        assert!(range.end <= 14);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_scroll_up_unpins_from_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_to_bottom_repins() {
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_past_end_repins() {
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        state.layout.heights = vec![2, 2];
        state.viewport_height = 10; // Everything fits, offset 0 is the bottom
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }
}
