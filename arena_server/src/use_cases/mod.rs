// Use cases layer: application workflows around the simulation.

pub mod session;
pub mod types;

pub use session::{SessionError, SessionHandle, SessionSettings, session_task, spawn_session};
pub use types::{SessionCommand, SessionState, SessionUpdate};
