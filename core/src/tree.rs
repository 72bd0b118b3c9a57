//! The command tree.
//!
//! Commands are stored in an arena and referred to by [`CommandId`]. A parent
//! keeps its children in a name-keyed map of ids; a child keeps the id of its
//! parent. Attachment is the only operation that links nodes and it never
//! rewires an existing link, so every tree built through it is acyclic.
//!
//! # Examples
//!
//! ```
//! use command_tree_core::{Command, CommandTree};
//!
//! let mut tree = CommandTree::new();
//! let git = tree.insert(Command::new("git"));
//! let remote = tree.insert(Command::new("remote"));
//! let add = tree.insert(Command::new("add"));
//!
//! tree.add_subcommands(git, [remote]);
//! tree.add_subcommands(remote, [add]);
//!
//! assert_eq!(tree.traverse_to_root(add), git);
//! assert_eq!(tree.ancestor_chain(add), ["git", "remote", "add"]);
//! assert!(tree.is_subcommand(add));
//! assert!(!tree.is_subcommand(git));
//! ```

use std::cell::RefCell;
use std::io::Write;

use tracing::trace;

use crate::command::Command;
use crate::flags::FlagSet;

/// Identity of a command inside a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

/// Arena owning every command of a program.
///
/// Not thread-safe: flag handles share storage through `Rc`, and the tree is
/// built and dispatched on one thread.
#[derive(Debug, Default)]
pub struct CommandTree {
    commands: Vec<Command>,
}

impl CommandTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a command into the tree. It starts out detached (a root).
    pub fn insert(&mut self, command: Command) -> CommandId {
        let id = CommandId(self.commands.len());
        self.commands.push(command);
        id
    }

    /// Returns the command behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different tree.
    pub fn command(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    pub(crate) fn command_mut(&mut self, id: CommandId) -> &mut Command {
        &mut self.commands[id.0]
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the flag set of `id`, creating it on first access.
    pub fn flags(&mut self, id: CommandId) -> &mut FlagSet {
        self.command_mut(id).flags()
    }

    /// Positional arguments left after `id`'s flags were last parsed.
    pub fn args(&self, id: CommandId) -> &[String] {
        self.command(id).args()
    }

    /// Sends usage text for `id` (and subcommands without their own sink) to
    /// `output`.
    pub fn set_output(&mut self, id: CommandId, output: impl Write + 'static) {
        self.command_mut(id).output = Some(RefCell::new(Box::new(output)));
    }

    /// Attaches each of `children` as a subcommand of `parent`.
    ///
    /// Attaching a command that is already a subcommand of `parent` under
    /// the same name does nothing.
    ///
    /// # Panics
    ///
    /// Panics when a wiring mistake is detected:
    /// - a command is attached to itself;
    /// - a different command with the same name is already attached;
    /// - the child is already attached to another parent;
    /// - the child is an ancestor of `parent`.
    pub fn add_subcommands(
        &mut self,
        parent: CommandId,
        children: impl IntoIterator<Item = CommandId>,
    ) {
        for child in children {
            let child_name = self.command(child).name.clone();

            if child == parent {
                panic!("command '{child_name}' can't be a subcommand to itself");
            }

            if let Some(&existing) = self.command(parent).subcommands.get(&child_name) {
                if existing != child {
                    panic!(
                        "different command with a name '{}' already attached to '{}' command",
                        child_name,
                        self.command(parent).name
                    );
                }
                continue;
            }

            if let Some(other) = self.command(child).parent {
                panic!(
                    "command '{}' is already a subcommand of '{}'",
                    child_name,
                    self.command(other).name
                );
            }

            if self.traverse_to_root(parent) == child {
                panic!(
                    "command '{}' is an ancestor of '{}' and can't be its subcommand",
                    child_name,
                    self.command(parent).name
                );
            }

            trace!(
                parent = %self.command(parent).name,
                child = %child_name,
                "attaching subcommand"
            );
            self.command_mut(child).parent = Some(parent);
            self.command_mut(parent).subcommands.insert(child_name, child);
        }
    }

    /// Looks up the subcommand of `id` called `name`.
    pub fn subcommand(&self, id: CommandId, name: &str) -> Option<CommandId> {
        self.command(id).subcommands.get(name).copied()
    }

    /// Subcommands of `id`, ordered by name.
    pub fn subcommands(&self, id: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        self.command(id).subcommands.values().copied()
    }

    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        self.command(id).parent
    }

    /// Returns `true` if `id` has a parent other than itself.
    pub fn is_subcommand(&self, id: CommandId) -> bool {
        self.command(id).parent.is_some_and(|parent| parent != id)
    }

    /// Follows parent links up to the command that has none.
    pub fn traverse_to_root(&self, id: CommandId) -> CommandId {
        let mut current = id;
        while self.is_subcommand(current) {
            current = self.command(current).parent.unwrap_or(current);
        }
        current
    }

    /// Names from the root down to `id`, inclusive.
    pub fn ancestor_chain(&self, id: CommandId) -> Vec<&str> {
        let mut chain = vec![self.command(id).name.as_str()];
        let mut current = id;
        while self.is_subcommand(current) {
            current = self.command(current).parent.unwrap_or(current);
            chain.push(self.command(current).name.as_str());
        }
        chain.reverse();
        chain
    }

    /// The ancestor chain joined with spaces, as typed on the command line.
    pub fn invocation(&self, id: CommandId) -> String {
        self.ancestor_chain(id).join(" ")
    }
}
