//! Terminal front end for Shortfact.
//!
//! The [`tui::TuiActor`] owns all UI state, including the submission state
//! machine in [`form`]; rendering lives in [`view`] and runs off immutable
//! snapshots.
pub mod form;
mod feeders;
mod styles;
mod tui;
mod view;

pub use feeders::spawn_tui_feeders;
pub use tui::{TuiActor, TuiMsg};
