//! Session domain module.
//!
//! - `config`: the four-field inventory configuration and its partial merge
//! - `view`: the active view selector and its configuration guard
//! - `state`: the full session snapshot handed to subscribers

mod config;
mod state;
mod view;

pub use config::{today, ConfigUpdate, SessionConfig};
pub use state::SessionState;
pub use view::ActiveView;
