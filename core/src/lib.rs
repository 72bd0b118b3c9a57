//! Command trees with per-command flags.
//!
//! A program declares a tree of named commands, each with its own flags, and
//! hands the process arguments to the root. Dispatch parses the root's flags,
//! follows positional arguments down through subcommand names, and runs the
//! command it ends at with whatever arguments are left.
//!
//! - [`Command`]: a single node with a name, descriptions and an optional run
//!   function.
//! - [`CommandTree`]: the arena owning every node; attachment, traversal,
//!   dispatch ([`CommandTree::exec`]) and usage text live here.
//! - [`FlagSet`]: typed flag declarations with optional environment
//!   overlays; each declaration returns a [`Flag`] handle.
//! - [`CommandSchema`]: a serializable snapshot of a (sub)tree.
//!
//! Wiring mistakes (attaching a command to itself, two different commands
//! with one name under the same parent, redefining a flag) panic when they
//! happen. Problems with the arguments a user typed are returned as
//! [`Error`].
//!
//! # Example
//!
//! ```
//! use command_tree_core::{Command, CommandTree, Invocation};
//!
//! let mut tree = CommandTree::new();
//! let root = tree.insert(Command::new("app").short("Example app"));
//! let greet = tree.insert(Command::new("greet").short("Say hello").run(|cmd, args| {
//!     assert_eq!(cmd.name, "greet");
//!     assert_eq!(args, ["world"]);
//!     Ok(())
//! }));
//! tree.add_subcommands(root, [greet]);
//! let loud = tree.flags(greet).bool("loud", false, "shout");
//!
//! tree.exec(root, Invocation::new("app", ["greet", "-loud", "world"])).unwrap();
//! assert!(loud.get());
//! ```

mod command;
mod dispatch;
pub mod duration;
mod error;
mod flags;
mod schema;
mod tree;
mod usage;

pub use command::{Command, RunFn};
pub use dispatch::Invocation;
pub use error::{BoxError, DurationError, Error, FlagError, Result};
pub use flags::{Flag, FlagInfo, FlagSet, FlagValue};
pub use schema::{CommandSchema, FlagSchema};
pub use tree::{CommandId, CommandTree};
