//! # TUI Components
//!
//! All UI components for the terminal interface. Two patterns:
//!
//! - Stateless, props-based: `TitleBar`, `MessageCard`. Created fresh each
//!   frame with the data they render.
//! - Stateful, event-driven: `InputBox`, `MessageList`. Hold or wrap
//!   persistent state and emit high-level events.
//!
//! Each component file contains its state types, event types, rendering
//! logic, and tests, so one file tells the whole story of one component.

mod input_box;
mod message;
mod message_list;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message::MessageCard;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
