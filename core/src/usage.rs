//! Usage text derived from a command's place in the tree.
//!
//! The text is a read-only projection of the tree: the root's title, the
//! invocation line built from the ancestor chain, the subcommands, the flags
//! and a pointer to `-help`. Columns are aligned to the longest entry plus
//! one space.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::io::{self, Write as _};

use tracing::warn;

use crate::flags::FlagInfo;
use crate::tree::{CommandId, CommandTree};

impl CommandTree {
    /// Renders the usage text for `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_tree_core::{Command, CommandTree};
    ///
    /// let mut tree = CommandTree::new();
    /// let app = tree.insert(Command::new("app").short("Does things"));
    /// let b = tree.insert(Command::new("b").short("second"));
    /// let a = tree.insert(Command::new("a").short("first"));
    /// tree.add_subcommands(app, [b, a]);
    ///
    /// let text = tree.usage(app);
    /// assert!(text.starts_with("app - Does things\n"));
    /// assert!(text.contains("  app [command]\n"));
    /// assert!(text.find("  a ").unwrap() < text.find("  b ").unwrap());
    /// ```
    pub fn usage(&self, id: CommandId) -> String {
        let mut out = String::new();
        let command = self.command(id);
        let root = self.command(self.traverse_to_root(id));
        let invocation = self.invocation(id);

        if root.short.is_empty() {
            let _ = writeln!(out, "{}\n", root.name);
        } else {
            let _ = writeln!(out, "{} - {}\n", root.name, root.short);
        }
        if !command.long.is_empty() {
            let _ = writeln!(out, "{}\n", command.long);
        }

        out.push_str("Usage:\n");
        let _ = write!(out, "  {invocation} ");
        if command.has_flags() {
            out.push_str("<flags> ");
        }
        if command.has_subcommands() {
            out.push_str("[command]\n");
        } else {
            out.push_str("[arguments...]\n");
        }

        self.write_subcommands(&mut out, id);
        if let Some(flags) = command.flag_set() {
            write_flags(&mut out, flags.iter());
        }

        let _ = writeln!(
            out,
            "\nUse '{invocation} -help' for more information about a command."
        );
        out
    }

    /// Writes the usage text for `id` to the nearest configured output on
    /// its ancestor chain, or stderr. Falls back to stdout if that fails.
    pub fn print_usage(&self, id: CommandId) {
        let text = self.usage(id);

        let written = match self.output_for(id) {
            Some(sink) => writeln!(sink.borrow_mut(), "{text}"),
            None => writeln!(io::stderr(), "{text}"),
        };

        if let Err(err) = written {
            warn!(
                command = %self.command(id).name,
                error = %err,
                "usage output failed, writing to stdout"
            );
            let _ = writeln!(io::stdout(), "{text}");
        }
    }

    fn output_for(&self, id: CommandId) -> Option<&RefCell<Box<dyn io::Write>>> {
        let mut current = Some(id);
        while let Some(cmd) = current {
            if let Some(sink) = &self.command(cmd).output {
                return Some(sink);
            }
            current = self.parent(cmd).filter(|&parent| parent != cmd);
        }
        None
    }

    fn write_subcommands(&self, out: &mut String, id: CommandId) {
        let subcommands: Vec<_> = self.subcommands(id).map(|sub| self.command(sub)).collect();
        if subcommands.is_empty() {
            return;
        }

        out.push_str("\nAvailable Commands:\n");
        let longest = subcommands
            .iter()
            .map(|sub| display_width(&sub.name))
            .max()
            .unwrap_or(0);
        for sub in subcommands {
            let _ = writeln!(
                out,
                "  {}{} {}",
                sub.name,
                indent(&sub.name, longest),
                sub.short
            );
        }
    }
}

fn write_flags<'a>(out: &mut String, flags: impl Iterator<Item = FlagInfo<'a>>) {
    let labeled: Vec<_> = flags
        .map(|info| (format!("{} {}", info.name, info.kind), info))
        .collect();
    if labeled.is_empty() {
        return;
    }

    out.push_str("\nFlags:\n");
    let longest = labeled
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    for (label, info) in &labeled {
        let _ = write!(out, "  -{label}{} {}", indent(label, longest), info.usage);
        if let Some(default) = info.default {
            let _ = write!(out, " (default {default})");
        }
        out.push('\n');
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Padding that brings `name` to `longest + 1` columns.
fn indent(name: &str, longest: usize) -> String {
    " ".repeat(longest + 1 - display_width(name))
}
