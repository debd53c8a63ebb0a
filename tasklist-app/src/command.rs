//! Shell input parsing.
//!
//! A plain line is text typed into the focused input. Lines starting with `/`
//! are commands addressing tasks by 1-based display position.

use std::fmt;

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Plain text: a new task, or the edit field's value while editing.
    Text(String),
    Toggle(usize),
    Delete(usize),
    Edit(usize),
    Cancel,
    Split(usize),
    Close,
    Help,
    Quit,
    /// Anything that did not parse; carries a message for the user.
    Invalid(String),
}

pub const HELP: &str = "\
Type text and press Enter to add a task (or to save the task being edited).
  /toggle <n>   mark task n done / not done
  /edit <n>     edit task n (Enter saves, /cancel discards)
  /cancel       leave edit mode
  /delete <n>   delete task n
  /split <n>    split task n into subtasks with AI
  /close        dismiss the dialog
  /help         show this help
  /quit         exit";

pub fn parse(line: &str) -> Input {
    let Some(rest) = line.strip_prefix('/') else {
        return Input::Text(line.to_string());
    };
    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    let positional = |make: fn(usize) -> Input| match arg.map(str::parse::<usize>) {
        Some(Ok(n)) => make(n),
        _ => Input::Invalid(format!("usage: /{name} <n>")),
    };

    match name {
        "toggle" | "t" => positional(Input::Toggle),
        "delete" | "rm" => positional(Input::Delete),
        "edit" | "e" => positional(Input::Edit),
        "split" | "s" => positional(Input::Split),
        "cancel" => Input::Cancel,
        "close" => Input::Close,
        "help" | "?" => Input::Help,
        "quit" | "q" => Input::Quit,
        other => Input::Invalid(format!("unknown command '/{other}' (try /help)")),
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(t) => write!(f, "{t}"),
            Input::Toggle(n) => write!(f, "/toggle {n}"),
            Input::Delete(n) => write!(f, "/delete {n}"),
            Input::Edit(n) => write!(f, "/edit {n}"),
            Input::Cancel => f.write_str("/cancel"),
            Input::Split(n) => write!(f, "/split {n}"),
            Input::Close => f.write_str("/close"),
            Input::Help => f.write_str("/help"),
            Input::Quit => f.write_str("/quit"),
            Input::Invalid(msg) => f.write_str(msg),
        }
    }
}
