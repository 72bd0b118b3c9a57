//! Resolving arguments to a command and running it.
//!
//! Dispatch at a command parses that command's leading flags, then looks at
//! the first remaining argument. If the command has subcommands, that
//! argument must name one of them and dispatch continues there with the rest.
//! Otherwise the command's run function receives the remaining arguments; a
//! command without one prints its usage.

use std::ffi::OsString;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, FlagError, Result};
use crate::tree::{CommandId, CommandTree};

/// The program name and arguments a tree is executed with.
///
/// Passed to [`CommandTree::exec`] instead of being read from the process
/// inside the library, so tests can drive a tree with any argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Name the root command is renamed to (the binary's file name).
    pub program: String,
    /// Arguments after the program name.
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads the current process's arguments.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn from_env() -> Self {
        Self::from_os_args(std::env::args_os())
    }

    fn from_os_args(args: impl IntoIterator<Item = OsString>) -> Self {
        let mut args = args
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned());
        let program = args
            .next()
            .map(|arg0| binary_name(&arg0))
            .unwrap_or_default();
        Self {
            program,
            args: args.collect(),
        }
    }
}

/// File name component of `arg0`.
fn binary_name(arg0: &str) -> String {
    Path::new(arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg0.to_string())
}

impl CommandTree {
    /// Executes `id` with `invocation`.
    ///
    /// A root command is first renamed after the program so usage text shows
    /// the name the user actually typed.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub fn exec(&mut self, id: CommandId, invocation: Invocation) -> Result<()> {
        if !self.is_subcommand(id) && !invocation.program.is_empty() {
            self.command_mut(id).name = binary_name(&invocation.program);
        }
        self.dispatch(id, invocation.args)
    }

    /// Dispatches `args` starting at `id`.
    ///
    /// `-help` (when not declared as a flag) prints usage and succeeds, as
    /// does reaching a command with no run function.
    ///
    /// # Errors
    ///
    /// - [`Error::Flags`] if the flags of the command reached cannot be parsed;
    /// - [`Error::UnknownCommand`] if a positional argument at a command with
    ///   subcommands names none of them;
    /// - [`Error::Execution`] if the run function fails.
    pub fn dispatch(&mut self, id: CommandId, args: Vec<String>) -> Result<()> {
        debug!(command = %self.command(id).name, ?args, "dispatching");

        match self.flags(id).parse(args.as_slice()) {
            Ok(()) => {}
            Err(FlagError::Help) => {
                self.print_usage(id);
                return Ok(());
            }
            Err(source) => {
                self.print_usage(id);
                return Err(Error::Flags {
                    command: self.command(id).name.clone(),
                    source,
                });
            }
        }

        let remaining = self.args(id).to_vec();
        if let Some(first) = remaining.first() {
            if self.command(id).has_subcommands() {
                let Some(sub) = self.subcommand(id, first) else {
                    self.print_usage(id);
                    return Err(Error::UnknownCommand(first.clone()));
                };
                return self.dispatch(sub, remaining[1..].to_vec());
            }
        }

        let command = self.command(id);
        match &command.run {
            None => {
                debug!(command = %command.name, "no run function, printing usage");
                self.print_usage(id);
                Ok(())
            }
            Some(run) => run(command, &remaining).map_err(|source| Error::Execution {
                command: command.name.clone(),
                source,
            }),
        }
    }
}
