//! Core business logic: session state, the update loop, config, and the
//! readiness display. Nothing in here touches the terminal or the network.

pub mod action;
pub mod config;
pub mod state;
pub mod status;
