//! Error types for command dispatch and flag parsing.
//!
//! Runtime failures are returned as values and travel up the dispatch chain.
//! Wiring mistakes made while building a tree (attaching a command to itself,
//! name collisions, redefined flags) are not represented here: they panic at
//! the point of misuse.

use thiserror::Error;

/// Boxed error returned by a command's run function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while dispatching arguments through a command tree.
#[derive(Debug, Error)]
pub enum Error {
    /// The flags given to a command could not be parsed.
    #[error("command '{command}' failed: {source}")]
    Flags {
        command: String,
        #[source]
        source: FlagError,
    },

    /// A positional argument at a command with subcommands matched none of them.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command's run function returned an error.
    #[error("command '{command}' failed: {source}")]
    Execution {
        command: String,
        #[source]
        source: BoxError,
    },
}

/// Errors produced by [`FlagSet::parse`](crate::FlagSet::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// A token that looks like a flag but is malformed (e.g. `---x`, `-=1`).
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    /// A flag that was never declared on the command.
    #[error("flag provided but not defined: -{0}")]
    Undefined(String),

    /// A non-boolean flag at the end of the argument list with no value.
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    /// The value could not be converted to the flag's type.
    #[error("invalid value {value:?} for flag -{flag}: {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    /// `-help` or `-h` was given and neither is a declared flag.
    #[error("help requested")]
    Help,
}

/// Errors produced when parsing duration text such as `1h30m` or `250ms`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The text is not a duration at all.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// A number without a unit (only a bare `0` may omit it).
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A unit other than `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    /// Durations cannot be negative.
    #[error("negative duration {0:?}")]
    Negative(String),

    /// The duration does not fit in 64 bits of nanoseconds.
    #[error("duration {0:?} overflows")]
    Overflow(String),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_names_command_and_cause() {
        let err = Error::Execution {
            command: "sub".into(),
            source: "sub error".into(),
        };
        let message = err.to_string();
        assert!(message.contains("sub"));
        assert!(message.contains("sub error"));
    }

    #[test]
    fn test_flag_error_messages() {
        assert_eq!(
            FlagError::Undefined("x".into()).to_string(),
            "flag provided but not defined: -x"
        );
        assert_eq!(
            FlagError::InvalidValue {
                flag: "n".into(),
                value: "abc".into(),
                reason: "invalid digit found in string".into(),
            }
            .to_string(),
            "invalid value \"abc\" for flag -n: invalid digit found in string"
        );
    }
}
