pub mod list;
pub mod render;
pub mod shell;
pub mod split;
pub mod tasks;

use anyhow::{Context, Result};
use clap::Args;

use tasklist_app::Controller;
use tasklist_core::{config, Config, FileStore, KvStore, Overrides, TaskId};

/// Options for commands that talk to the generation API.
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// API key; defaults to $GEMINI_API_KEY, then `api_key` in config.yaml.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Model name; defaults to `model` in config.yaml, then gemini-2.0-flash.
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

impl ApiArgs {
    /// Resolve config.yaml, environment and these flags into one [`Config`].
    pub fn config(&self) -> Result<Config> {
        let config = config::load().context("failed to load config.yaml")?;
        Ok(config
            .with_env(|key| std::env::var(key).ok())
            .with_overrides(Overrides { api_key: self.api_key.clone(), model: self.model.clone() }))
    }
}

/// Controller over the on-disk store in the user's home.
pub fn open_controller() -> Result<Controller<FileStore>> {
    let store = FileStore::open().context("could not locate the task store")?;
    Ok(Controller::start(store))
}

/// Map a 1-based display position to a task id.
pub fn resolve<K: KvStore>(controller: &Controller<K>, position: usize) -> Result<TaskId> {
    let state = controller.state();
    state.task_at(position).map(|t| t.id).with_context(|| {
        format!("no task at position {position} (the list has {})", state.tasks.len())
    })
}
