//! The command node value type.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::error::BoxError;
use crate::flags::FlagSet;
use crate::tree::CommandId;

/// Run function of a command: receives the command itself and the
/// positional arguments left after its flags were parsed.
pub type RunFn = Box<dyn Fn(&Command, &[String]) -> Result<(), BoxError>>;

/// One command or subcommand.
///
/// Built as a plain value, then moved into a
/// [`CommandTree`](crate::CommandTree) which hands back a
/// [`CommandId`]. A command without a run function only routes to its
/// subcommands.
///
/// # Examples
///
/// ```
/// use command_tree_core::Command;
///
/// let cmd = Command::new("serve")
///     .short("Start the server")
///     .run(|_cmd, args| {
///         println!("serving {args:?}");
///         Ok(())
///     });
/// assert_eq!(cmd.name, "serve");
/// assert!(cmd.is_runnable());
/// ```
#[derive(Default)]
pub struct Command {
    /// Name shown in usage text and matched against positional arguments.
    pub name: String,
    /// One-line description.
    pub short: String,
    /// Longer description printed in this command's usage text.
    pub long: String,
    /// Behavior invoked when dispatch ends at this command.
    pub run: Option<RunFn>,
    pub(crate) flags: Option<FlagSet>,
    pub(crate) subcommands: BTreeMap<String, CommandId>,
    pub(crate) parent: Option<CommandId>,
    pub(crate) output: Option<RefCell<Box<dyn Write>>>,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Sets the one-line description.
    pub fn short(mut self, short: &str) -> Self {
        self.short = short.to_string();
        self
    }

    /// Sets the long description.
    pub fn long(mut self, long: &str) -> Self {
        self.long = long.to_string();
        self
    }

    /// Sets the run function.
    pub fn run<F>(mut self, run: F) -> Self
    where
        F: Fn(&Command, &[String]) -> Result<(), BoxError> + 'static,
    {
        self.run = Some(Box::new(run));
        self
    }

    /// Sends this command's usage text to `output` instead of stderr.
    /// Subcommands without their own sink inherit it.
    pub fn output(mut self, output: impl Write + 'static) -> Self {
        self.output = Some(RefCell::new(Box::new(output)));
        self
    }

    /// Returns the flag set, creating it on first access.
    pub fn flags(&mut self) -> &mut FlagSet {
        self.flags.get_or_insert_with(FlagSet::default)
    }

    /// Returns the flag set if one was ever created.
    pub fn flag_set(&self) -> Option<&FlagSet> {
        self.flags.as_ref()
    }

    /// Positional arguments left after this command's flags were parsed.
    pub fn args(&self) -> &[String] {
        match &self.flags {
            Some(flags) => flags.args(),
            None => &[],
        }
    }

    /// Returns `true` if at least one flag has been declared.
    pub fn has_flags(&self) -> bool {
        self.flags.as_ref().is_some_and(|flags| !flags.is_empty())
    }

    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }

    pub fn is_runnable(&self) -> bool {
        self.run.is_some()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("runnable", &self.run.is_some())
            .field("flags", &self.flags)
            .field("subcommands", &self.subcommands)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_created_once() {
        let mut cmd = Command::new("root");
        assert!(cmd.flag_set().is_none());

        let first = cmd.flags().bool("v", false, "");
        assert!(cmd.flag_set().is_some());

        // A second access must return the same set, with `v` still declared.
        cmd.flags().i32("n", 0, "");
        let set = cmd.flag_set().unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.lookup("v").is_some());
        assert!(!first.get());
    }

    #[test]
    fn test_args_without_flags_is_empty() {
        let cmd = Command::new("root");
        assert!(cmd.args().is_empty());
        assert!(!cmd.has_flags());
    }

    #[test]
    fn test_builder() {
        let cmd = Command::new("deploy")
            .short("Deploy things")
            .long("Deploys every configured thing.")
            .run(|_, _| Ok(()));
        assert_eq!(cmd.short, "Deploy things");
        assert_eq!(cmd.long, "Deploys every configured thing.");
        assert!(cmd.is_runnable());
        assert!(!cmd.has_subcommands());
    }
}
