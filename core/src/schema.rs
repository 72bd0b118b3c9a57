//! Serializable snapshot of a command tree.
//!
//! A [`CommandSchema`] describes a command, its flags and its subcommands as
//! plain data, for documentation generators or for shipping a description of
//! a program's interface alongside it.

use serde::{Deserialize, Serialize};

use crate::tree::{CommandId, CommandTree};

/// Description of one declared flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSchema {
    pub name: String,
    /// Type tag (`bool`, `i64`, `duration`, ...).
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usage: String,
}

/// Description of a command and everything below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long: String,
    /// Whether the command has a run function of its own.
    pub runnable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagSchema>,
    /// Subcommands, ordered by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandSchema>,
}

impl CommandSchema {
    /// Finds a direct subcommand by name.
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandSchema> {
        self.subcommands.iter().find(|sub| sub.name == name)
    }

    /// Finds a flag by name.
    pub fn find_flag(&self, name: &str) -> Option<&FlagSchema> {
        self.flags.iter().find(|flag| flag.name == name)
    }
}

impl CommandTree {
    /// Snapshots `id` and its subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree_core::{Command, CommandTree};
    ///
    /// let mut tree = CommandTree::new();
    /// let root = tree.insert(Command::new("app"));
    /// let run = tree.insert(Command::new("run").run(|_, _| Ok(())));
    /// tree.add_subcommands(root, [run]);
    /// tree.flags(run).i64("jobs", 4, "parallel jobs");
    ///
    /// let schema = tree.schema(root);
    /// let run = schema.find_subcommand("run").unwrap();
    /// assert!(run.runnable);
    /// assert_eq!(run.find_flag("jobs").unwrap().default.as_deref(), Some("4"));
    /// ```
    pub fn schema(&self, id: CommandId) -> CommandSchema {
        let command = self.command(id);
        let flags = command
            .flag_set()
            .map(|flags| {
                flags
                    .iter()
                    .map(|info| FlagSchema {
                        name: info.name.to_string(),
                        kind: info.kind.to_string(),
                        default: info.default.map(str::to_string),
                        usage: info.usage.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        CommandSchema {
            name: command.name.clone(),
            short: command.short.clone(),
            long: command.long.clone(),
            runnable: command.is_runnable(),
            flags,
            subcommands: self.subcommands(id).map(|sub| self.schema(sub)).collect(),
        }
    }
}
