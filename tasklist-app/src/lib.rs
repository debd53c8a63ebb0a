//! Tasklist interaction layer: the controller that owns the state, the shell
//! input grammar, and the async session that drives both.

pub mod command;
pub mod controller;
pub mod error;
pub mod session;

pub use controller::{Action, Controller, SplitRequest};
pub use error::{io_err, AppError};
pub use session::{Session, Surface};
