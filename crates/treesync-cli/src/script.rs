//! Edit scripts
//!
//! One edit per line, `#` starts a comment line:
//!
//! ```text
//! add-root [name]
//! add-child <path>
//! rename <path> <name>
//! set-data <path> <value>
//! delete <path>
//! ```
//!
//! `<path>` is a 0-based index path from the roots (`0/1/2`). Names and
//! values run to the end of the line; a root added without a name gets
//! the default root name. Paths are resolved against the forest
//! as it stands when the line runs, so earlier lines affect later ones.

use thiserror::Error;
use treesync_core::model::DEFAULT_ROOT_NAME;
use treesync_core::ops::forest::format_path;
use treesync_core::{Command, Forest, TreeSyncError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {source}")]
    Step {
        line: usize,
        #[source]
        source: TreeSyncError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    AddRoot { name: String },
    AddChild { path: Vec<usize> },
    Rename { path: Vec<usize>, name: String },
    SetData { path: Vec<usize>, value: String },
    Delete { path: Vec<usize> },
}

/// A parsed step with its 1-based source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

/// Parse a whole script; blank and comment lines are skipped
pub fn parse(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = parse_step(trimmed).map_err(|message| ScriptError::Syntax { line, message })?;
        lines.push(ScriptLine { line, step });
    }
    Ok(lines)
}

fn parse_step(text: &str) -> Result<Step, String> {
    let (verb, rest) = split_word(text);
    match verb {
        "add-root" if rest.is_empty() => Ok(Step::AddRoot {
            name: DEFAULT_ROOT_NAME.to_string(),
        }),
        "add-root" => Ok(Step::AddRoot {
            name: rest.to_string(),
        }),
        "add-child" => Ok(Step::AddChild {
            path: parse_path(required(rest, "path")?)?,
        }),
        "rename" => {
            let (path, name) = split_word(required(rest, "path")?);
            Ok(Step::Rename {
                path: parse_path(path)?,
                name: required(name, "name")?.to_string(),
            })
        }
        "set-data" => {
            let (path, value) = split_word(required(rest, "path")?);
            Ok(Step::SetData {
                path: parse_path(path)?,
                value: required(value, "value")?.to_string(),
            })
        }
        "delete" => Ok(Step::Delete {
            path: parse_path(required(rest, "path")?)?,
        }),
        other => Err(format!("unknown command '{}'", other)),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn required<'a>(text: &'a str, what: &str) -> Result<&'a str, String> {
    if text.is_empty() {
        Err(format!("missing {}", what))
    } else {
        Ok(text)
    }
}

fn parse_path(text: &str) -> Result<Vec<usize>, String> {
    text.split('/')
        .map(|segment| {
            segment
                .parse::<usize>()
                .map_err(|_| format!("invalid path '{}'", text))
        })
        .collect()
}

impl ScriptLine {
    /// Turn the step into a command against the current forest
    pub fn to_command(&self, forest: &Forest) -> Result<Command, ScriptError> {
        self.resolve(forest).map_err(|source| ScriptError::Step {
            line: self.line,
            source,
        })
    }

    fn resolve(&self, forest: &Forest) -> treesync_core::Result<Command> {
        let id_at = |path: &[usize]| forest.resolve_path(path).map(|n| n.id.clone());

        Ok(match &self.step {
            Step::AddRoot { name } => Command::CreateRoot { name: name.clone() },
            Step::AddChild { path } => Command::AddChild {
                parent_id: id_at(path)?,
            },
            Step::Rename { path, name } => Command::RenameNode {
                node_id: id_at(path)?,
                name: name.clone(),
            },
            Step::SetData { path, value } => Command::SetLeafData {
                node_id: id_at(path)?,
                value: value.clone(),
            },
            Step::Delete { path } => {
                let child_id = id_at(path)?;
                let parent_id = match path.split_last() {
                    Some((_, [])) => child_id.clone(),
                    Some((_, parent)) => id_at(parent)?,
                    None => {
                        return Err(TreeSyncError::InvalidPath {
                            path: format_path(path),
                        })
                    }
                };
                Command::DeleteNode {
                    parent_id,
                    child_id,
                }
            }
        })
    }
}
