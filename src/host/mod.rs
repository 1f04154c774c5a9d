//! Reference host: the state a host keeps per module and the reducer that
//! applies actions and user input to it.
//!
//! - [`state`]: [`HostState`], prompts, notices and display resolution
//! - [`handler`]: [`apply_action`], [`handle_event`], [`receive`] and the
//!   [`Effect`]s they return

pub mod handler;
pub mod state;

pub use handler::{apply_action, handle_event, receive, Effect, HostEvent};
pub use state::{HostState, MalformedPolicy, Notice, NoticeLevel, Prompt, MAX_NOTICES};
