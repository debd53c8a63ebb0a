//! Tasklist core library — task model, store operations, persistence, config.
//!
//! - [`types`] — [`Task`], [`TaskId`], [`AppState`]
//! - [`store`] — state-in, state-out task operations
//! - [`modal`] — loading/error dialog state
//! - [`persistence`] — [`KvStore`] slots and the `tasks` save/load adapter
//! - [`config`] — `~/.tasklist/config.yaml`
//! - [`error`] — [`StoreError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod modal;
pub mod persistence;
pub mod store;
pub mod types;

pub use config::{Config, Overrides};
pub use error::{ConfigError, StoreError};
pub use modal::{Modal, Ticket};
pub use persistence::{FileStore, KvStore, MemoryStore};
pub use store::{Change, Outcome, SUBTASK_PREFIX};
pub use types::{AppState, Task, TaskId};
