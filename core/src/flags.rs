//! Per-command flag bindings.
//!
//! Every [`Command`](crate::Command) owns one [`FlagSet`]. Declaring a flag
//! returns a [`Flag`] handle: the location the parsed value is written to.
//! Each declaration also has an `_env` form whose default is taken from an
//! environment variable when that variable is set and parses to the flag's
//! type. Precedence is: flag on the command line, then a valid environment
//! value, then the literal default.
//!
//! The token grammar is the classic single-dash one: `-name`, `--name`,
//! `-name=value` and `-name value` (the last only for non-boolean flags).
//! Parsing stops at the first non-flag argument, at a lone `-`, or right
//! after a `--` terminator. Recognized tokens are rewritten to `--name=value`
//! and matched by a `clap` command built from the declarations. Each value is
//! converted by [`FlagValue::parse_flag`], run as the argument's value parser,
//! and written into the flag's [`Flag`] handle.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use command_tree_core::FlagSet;
//!
//! let mut flags = FlagSet::default();
//! let verbose = flags.bool("verbose", false, "print more");
//! let timeout = flags.duration("timeout", Duration::from_secs(10), "request timeout");
//!
//! flags.parse(&["-verbose", "-timeout", "1m", "run", "-x"]).unwrap();
//!
//! assert!(verbose.get());
//! assert_eq!(timeout.get(), Duration::from_secs(60));
//! assert_eq!(flags.args(), ["run", "-x"]);
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, ArgMatches};
use tracing::{trace, warn};

use crate::duration;
use crate::error::FlagError;

/// A type that can be bound to a flag.
///
/// Implemented for `bool`, `i32`, `i64`, `u32`, `u64`, `f64`, `String` and
/// [`Duration`]. Other types can be bound with [`FlagSet::value`] by
/// implementing this trait.
pub trait FlagValue: Clone + Default + PartialEq + Send + Sync + 'static {
    /// Type tag shown in usage text.
    const KIND: &'static str;

    /// Boolean flags may be given without a value (`-v` means `-v=true`).
    const IS_BOOL: bool = false;

    /// Converts command-line or environment text into a value.
    fn parse_flag(raw: &str) -> Result<Self, String>;

    /// Renders a value the way it would be typed on the command line.
    fn render(&self) -> String;
}

impl FlagValue for bool {
    const KIND: &'static str = "bool";
    const IS_BOOL: bool = true;

    fn parse_flag(raw: &str) -> Result<Self, String> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err("invalid boolean syntax".to_string()),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_flag_value_from_str {
    ($($ty:ty => $kind:literal),* $(,)?) => {$(
        impl FlagValue for $ty {
            const KIND: &'static str = $kind;

            fn parse_flag(raw: &str) -> Result<Self, String> {
                raw.parse::<$ty>().map_err(|e| e.to_string())
            }

            fn render(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

impl_flag_value_from_str!(
    i32 => "i32",
    i64 => "i64",
    u32 => "u32",
    u64 => "u64",
    f64 => "f64",
);

impl FlagValue for String {
    const KIND: &'static str = "string";

    fn parse_flag(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }

    fn render(&self) -> String {
        format!("{self:?}")
    }
}

impl FlagValue for Duration {
    const KIND: &'static str = "duration";

    fn parse_flag(raw: &str) -> Result<Self, String> {
        duration::parse(raw).map_err(|e| e.to_string())
    }

    fn render(&self) -> String {
        duration::format(*self)
    }
}

/// Handle to a declared flag's value.
///
/// Clones share the same storage, so a handle can be moved into a command's
/// run function and read after the flags have been parsed.
#[derive(Debug, Clone, Default)]
pub struct Flag<T>(Rc<RefCell<T>>);

impl<T: Clone> Flag<T> {
    fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Returns the current value.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }

    fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }
}

/// Read-only view of a declared flag, used for usage text and schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagInfo<'a> {
    pub name: &'a str,
    pub kind: &'static str,
    pub usage: &'a str,
    /// Rendered default, `None` when it is the type's zero value.
    pub default: Option<&'a str>,
}

struct FlagEntry {
    arg: Arg,
    kind: &'static str,
    usage: String,
    default: Option<String>,
    boolean: bool,
    store: Box<dyn Fn(&ArgMatches)>,
}

/// The set of flags declared on one command, plus the positional arguments
/// left over after the last parse.
#[derive(Default)]
pub struct FlagSet {
    flags: BTreeMap<String, FlagEntry>,
    args: Vec<String>,
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("flags", &self.flags.keys().collect::<Vec<_>>())
            .field("args", &self.args)
            .finish()
    }
}

impl FlagSet {
    /// Declares a boolean flag.
    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> Flag<bool> {
        self.value(name, default, usage)
    }

    /// Declares a boolean flag whose default may come from `env`.
    pub fn bool_env(&mut self, name: &str, env: &str, default: bool, usage: &str) -> Flag<bool> {
        self.value_env(name, env, default, usage)
    }

    /// Declares a 32-bit signed integer flag.
    pub fn i32(&mut self, name: &str, default: i32, usage: &str) -> Flag<i32> {
        self.value(name, default, usage)
    }

    /// Declares a 32-bit signed integer flag whose default may come from `env`.
    pub fn i32_env(&mut self, name: &str, env: &str, default: i32, usage: &str) -> Flag<i32> {
        self.value_env(name, env, default, usage)
    }

    /// Declares a 64-bit signed integer flag.
    pub fn i64(&mut self, name: &str, default: i64, usage: &str) -> Flag<i64> {
        self.value(name, default, usage)
    }

    /// Declares a 64-bit signed integer flag whose default may come from `env`.
    pub fn i64_env(&mut self, name: &str, env: &str, default: i64, usage: &str) -> Flag<i64> {
        self.value_env(name, env, default, usage)
    }

    /// Declares a 32-bit unsigned integer flag.
    pub fn u32(&mut self, name: &str, default: u32, usage: &str) -> Flag<u32> {
        self.value(name, default, usage)
    }

    /// Declares a 32-bit unsigned integer flag whose default may come from `env`.
    pub fn u32_env(&mut self, name: &str, env: &str, default: u32, usage: &str) -> Flag<u32> {
        self.value_env(name, env, default, usage)
    }

    /// Declares a 64-bit unsigned integer flag.
    pub fn u64(&mut self, name: &str, default: u64, usage: &str) -> Flag<u64> {
        self.value(name, default, usage)
    }

    /// Declares a 64-bit unsigned integer flag whose default may come from `env`.
    pub fn u64_env(&mut self, name: &str, env: &str, default: u64, usage: &str) -> Flag<u64> {
        self.value_env(name, env, default, usage)
    }

    /// Declares a floating point flag.
    pub fn f64(&mut self, name: &str, default: f64, usage: &str) -> Flag<f64> {
        self.value(name, default, usage)
    }

    /// Declares a floating point flag whose default may come from `env`.
    pub fn f64_env(&mut self, name: &str, env: &str, default: f64, usage: &str) -> Flag<f64> {
        self.value_env(name, env, default, usage)
    }

    /// Declares a string flag.
    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> Flag<String> {
        self.value(name, default.to_string(), usage)
    }

    /// Declares a string flag whose default may come from `env`.
    ///
    /// An empty variable counts as unset.
    pub fn string_env(&mut self, name: &str, env: &str, default: &str, usage: &str) -> Flag<String> {
        self.value_env(name, env, default.to_string(), usage)
    }

    /// Declares a duration flag (`10s`, `1h30m`, ...).
    pub fn duration(&mut self, name: &str, default: Duration, usage: &str) -> Flag<Duration> {
        self.value(name, default, usage)
    }

    /// Declares a duration flag whose default may come from `env`.
    pub fn duration_env(
        &mut self,
        name: &str,
        env: &str,
        default: Duration,
        usage: &str,
    ) -> Flag<Duration> {
        self.value_env(name, env, default, usage)
    }

    /// Declares a flag of any [`FlagValue`] type.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty, starts with `-`, contains `=`, or is already
    /// declared in this set.
    pub fn value<T: FlagValue>(&mut self, name: &str, default: T, usage: &str) -> Flag<T> {
        check_name(name);
        if self.flags.contains_key(name) {
            panic!("flag redefined: {name}");
        }

        let flag = Flag::new(default.clone());

        let mut arg = Arg::new(name.to_string())
            .long(name.to_string())
            .action(ArgAction::Set)
            .allow_hyphen_values(true)
            .value_parser(T::parse_flag as fn(&str) -> Result<T, String>);
        arg = if T::IS_BOOL {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.num_args(1)
        };

        let slot = flag.clone();
        let id = name.to_string();
        let store = move |matches: &ArgMatches| {
            if let Ok(Some(value)) = matches.try_get_one::<T>(&id) {
                slot.set(value.clone());
            }
        };

        self.flags.insert(
            name.to_string(),
            FlagEntry {
                arg,
                kind: T::KIND,
                usage: usage.to_string(),
                default: (default != T::default()).then(|| default.render()),
                boolean: T::IS_BOOL,
                store: Box::new(store),
            },
        );

        flag
    }

    /// Declares a flag of any [`FlagValue`] type with an environment overlay.
    ///
    /// If `env` is set to text that parses as `T`, that value replaces
    /// `default`. Anything else (unset, empty, unparsable) keeps `default`.
    pub fn value_env<T: FlagValue>(
        &mut self,
        name: &str,
        env: &str,
        default: T,
        usage: &str,
    ) -> Flag<T> {
        let default = env_default(env).unwrap_or(default);
        self.value(name, default, usage)
    }

    /// Parses leading flag tokens and records the remaining arguments.
    ///
    /// An empty argument list is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Help`] for an undeclared `-help`/`-h`, and the
    /// other [`FlagError`] variants for malformed, unknown or invalid flags.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), FlagError> {
        if args.is_empty() {
            self.args.clear();
            return Ok(());
        }

        let (canonical, consumed) = self.normalize(args)?;
        if !canonical.is_empty() {
            let matches = self
                .command()
                .try_get_matches_from(canonical)
                .map_err(from_clap)?;
            for entry in self.flags.values() {
                (entry.store)(&matches);
            }
        }

        self.args = args[consumed..]
            .iter()
            .map(|arg| arg.as_ref().to_string())
            .collect();
        Ok(())
    }

    /// Positional arguments left after the last [`parse`](Self::parse).
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Iterates declared flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = FlagInfo<'_>> {
        self.flags.iter().map(|(name, entry)| FlagInfo {
            name,
            kind: entry.kind,
            usage: &entry.usage,
            default: entry.default.as_deref(),
        })
    }

    /// Looks up a declared flag by name.
    pub fn lookup(&self, name: &str) -> Option<FlagInfo<'_>> {
        self.iter().find(|info| info.name == name)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Rewrites the leading flag tokens as `--name[=value]` and returns them
    /// with the index of the first positional argument.
    fn normalize<S: AsRef<str>>(&self, args: &[S]) -> Result<(Vec<String>, usize), FlagError> {
        let mut canonical = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let token = args[i].as_ref();
            if token.len() < 2 || !token.starts_with('-') {
                break;
            }

            let mut body = &token[1..];
            if let Some(rest) = body.strip_prefix('-') {
                if rest.is_empty() {
                    i += 1;
                    break;
                }
                body = rest;
            }
            if body.starts_with('-') || body.starts_with('=') {
                return Err(FlagError::BadSyntax(token.to_string()));
            }
            i += 1;

            let (name, value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };

            let Some(entry) = self.flags.get(name) else {
                if name == "help" || name == "h" {
                    return Err(FlagError::Help);
                }
                return Err(FlagError::Undefined(name.to_string()));
            };

            let value = match value {
                Some(value) => Some(value),
                None if entry.boolean => None,
                None => {
                    let next = args
                        .get(i)
                        .ok_or_else(|| FlagError::MissingValue(name.to_string()))?;
                    i += 1;
                    Some(next.as_ref().to_string())
                }
            };

            canonical.push(match value {
                Some(value) => format!("--{name}={value}"),
                None => format!("--{name}"),
            });
        }

        Ok((canonical, i))
    }

    fn command(&self) -> clap::Command {
        clap::Command::new("flags")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .args(self.flags.values().map(|entry| entry.arg.clone()))
    }
}

fn check_name(name: &str) {
    if name.is_empty() {
        panic!("flag name cannot be empty");
    }
    if name.starts_with('-') {
        panic!("flag {name:?} begins with -");
    }
    if name.contains('=') {
        panic!("flag {name:?} contains =");
    }
}

fn env_default<T: FlagValue>(env: &str) -> Option<T> {
    let raw = std::env::var(env).ok().filter(|raw| !raw.is_empty())?;
    match T::parse_flag(&raw) {
        Ok(value) => {
            trace!(env, value = %raw, "flag default taken from environment");
            Some(value)
        }
        Err(reason) => {
            warn!(env, %reason, "ignoring environment value that does not parse");
            None
        }
    }
}

fn from_clap(err: clap::Error) -> FlagError {
    let context = |kind| match err.get(kind) {
        Some(ContextValue::String(s)) => Some(s.clone()),
        _ => None,
    };

    let flag = context(ContextKind::InvalidArg)
        .map(|arg| {
            arg.trim_start_matches('-')
                .split(['=', ' ', '['])
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .unwrap_or_default();
    let reason = std::error::Error::source(&err)
        .map(ToString::to_string)
        .or_else(|| err.kind().as_str().map(str::to_string))
        .unwrap_or_else(|| "invalid flag".to_string());

    match err.kind() {
        // An `InvalidValue` without a value is clap's "value required" error.
        ErrorKind::ValueValidation | ErrorKind::InvalidValue => {
            match context(ContextKind::InvalidValue) {
                Some(value) => FlagError::InvalidValue {
                    flag,
                    value,
                    reason,
                },
                None => FlagError::MissingValue(flag),
            }
        }
        ErrorKind::UnknownArgument => FlagError::Undefined(flag),
        ErrorKind::NoEquals | ErrorKind::TooFewValues => FlagError::MissingValue(flag),
        _ => FlagError::BadSyntax(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_env(name: &str, value: &str) {
        // SAFETY: every test uses its own variable name.
        unsafe { std::env::set_var(name, value) };
    }

    // ---------------------------------------------------------------------
    // Environment overlay
    // ---------------------------------------------------------------------

    #[test]
    fn test_duration_env_flag_wins() {
        let mut flags = FlagSet::default();
        let got = flags.duration_env("f1", "FLAGS_TEST_DUR_FLAG", Duration::from_secs(10), "");
        flags.parse(&["-f1=11s"]).unwrap();
        assert_eq!(got.get(), Duration::from_secs(11));
    }

    #[test]
    fn test_duration_env_used_when_flag_absent() {
        set_env("FLAGS_TEST_DUR_ENV", "11s");
        let mut flags = FlagSet::default();
        let got = flags.duration_env("f1", "FLAGS_TEST_DUR_ENV", Duration::from_secs(10), "");
        flags.parse::<&str>(&[]).unwrap();
        assert_eq!(got.get(), Duration::from_secs(11));
    }

    #[test]
    fn test_duration_env_invalid_falls_back_to_default() {
        set_env("FLAGS_TEST_DUR_INVALID", "lalala");
        let mut flags = FlagSet::default();
        let got = flags.duration_env(
            "f1",
            "FLAGS_TEST_DUR_INVALID",
            Duration::from_secs(10),
            "",
        );
        flags.parse::<&str>(&[]).unwrap();
        assert_eq!(got.get(), Duration::from_secs(10));
    }

    #[test]
    fn test_duration_env_flag_beats_env() {
        set_env("FLAGS_TEST_DUR_BOTH", "12s");
        let mut flags = FlagSet::default();
        let got = flags.duration_env("f1", "FLAGS_TEST_DUR_BOTH", Duration::from_secs(10), "");
        flags.parse(&["-f1=11s"]).unwrap();
        assert_eq!(got.get(), Duration::from_secs(11));
    }

    #[test]
    fn test_duration_env_unset_uses_default() {
        let mut flags = FlagSet::default();
        let got = flags.duration_env(
            "f1",
            "FLAGS_TEST_DUR_NEVER_SET",
            Duration::from_secs(10),
            "",
        );
        flags.parse::<&str>(&[]).unwrap();
        assert_eq!(got.get(), Duration::from_secs(10));
    }

    #[test]
    fn test_bool_env() {
        set_env("FLAGS_TEST_BOOL_ENV", "true");
        set_env("FLAGS_TEST_BOOL_INVALID", "lalala");
        let mut flags = FlagSet::default();
        let from_env = flags.bool_env("a", "FLAGS_TEST_BOOL_ENV", false, "");
        let invalid = flags.bool_env("b", "FLAGS_TEST_BOOL_INVALID", false, "");
        let flagged = flags.bool_env("c", "FLAGS_TEST_BOOL_NEVER_SET", false, "");
        flags.parse(&["-c"]).unwrap();
        assert!(from_env.get());
        assert!(!invalid.get());
        assert!(flagged.get());
    }

    #[test]
    fn test_numeric_env() {
        set_env("FLAGS_TEST_I64_ENV", "-42");
        set_env("FLAGS_TEST_U32_ENV", "-1");
        set_env("FLAGS_TEST_F64_ENV", "2.5");
        let mut flags = FlagSet::default();
        let signed = flags.i64_env("signed", "FLAGS_TEST_I64_ENV", 1, "");
        let unsigned = flags.u32_env("unsigned", "FLAGS_TEST_U32_ENV", 7, "");
        let float = flags.f64_env("float", "FLAGS_TEST_F64_ENV", 0.5, "");
        assert_eq!(signed.get(), -42);
        assert_eq!(unsigned.get(), 7);
        assert_eq!(float.get(), 2.5);
    }

    #[test]
    fn test_string_env_empty_counts_as_unset() {
        set_env("FLAGS_TEST_STR_EMPTY", "");
        set_env("FLAGS_TEST_STR_SET", "from-env");
        let mut flags = FlagSet::default();
        let empty = flags.string_env("a", "FLAGS_TEST_STR_EMPTY", "fallback", "");
        let set = flags.string_env("b", "FLAGS_TEST_STR_SET", "fallback", "");
        assert_eq!(empty.get(), "fallback");
        assert_eq!(set.get(), "from-env");
    }

    // ---------------------------------------------------------------------
    // Token grammar
    // ---------------------------------------------------------------------

    #[test]
    fn test_parse_stops_at_first_positional() {
        let mut flags = FlagSet::default();
        let name = flags.string("name", "", "");
        flags.parse(&["-name", "x", "sub", "-name=y"]).unwrap();
        assert_eq!(name.get(), "x");
        assert_eq!(flags.args(), ["sub", "-name=y"]);
    }

    #[test]
    fn test_parse_double_dash_terminator() {
        let mut flags = FlagSet::default();
        let verbose = flags.bool("v", false, "");
        flags.parse(&["--v", "--", "-v"]).unwrap();
        assert!(verbose.get());
        assert_eq!(flags.args(), ["-v"]);
    }

    #[test]
    fn test_parse_lone_dash_is_positional() {
        let mut flags = FlagSet::default();
        flags.bool("v", false, "");
        flags.parse(&["-", "-v"]).unwrap();
        assert_eq!(flags.args(), ["-", "-v"]);
    }

    #[test]
    fn test_parse_bool_forms() {
        let mut flags = FlagSet::default();
        let a = flags.bool("a", false, "");
        let b = flags.bool("b", true, "");
        let c = flags.bool("c", false, "");
        flags.parse(&["-a", "-b=false", "--c=T"]).unwrap();
        assert!(a.get());
        assert!(!b.get());
        assert!(c.get());
    }

    #[test]
    fn test_parse_negative_value_after_space() {
        let mut flags = FlagSet::default();
        let n = flags.i32("n", 0, "");
        flags.parse(&["-n", "-5"]).unwrap();
        assert_eq!(n.get(), -5);
    }

    #[test]
    fn test_parse_last_occurrence_wins() {
        let mut flags = FlagSet::default();
        let n = flags.u64("n", 0, "");
        flags.parse(&["-n=1", "-n=2"]).unwrap();
        assert_eq!(n.get(), 2);
    }

    #[test]
    fn test_parse_value_with_equals_sign() {
        let mut flags = FlagSet::default();
        let kv = flags.string("kv", "", "");
        flags.parse(&["-kv=a=b"]).unwrap();
        assert_eq!(kv.get(), "a=b");
    }

    #[test]
    fn test_parse_empty_is_noop() {
        let mut flags = FlagSet::default();
        let n = flags.i64("n", 3, "");
        flags.parse(&["-n=4", "rest"]).unwrap();
        flags.parse::<String>(&[]).unwrap();
        assert_eq!(n.get(), 4);
        assert!(flags.args().is_empty());
    }

    #[test]
    fn test_parse_empty_without_flags_succeeds() {
        let mut flags = FlagSet::default();
        assert!(flags.parse::<&str>(&[]).is_ok());
    }

    #[test]
    fn test_parse_errors() {
        let mut flags = FlagSet::default();
        flags.i32("n", 0, "");

        assert_eq!(
            flags.parse(&["-x"]),
            Err(FlagError::Undefined("x".to_string()))
        );
        assert_eq!(
            flags.parse(&["-n"]),
            Err(FlagError::MissingValue("n".to_string()))
        );
        assert_eq!(
            flags.parse(&["---n=1"]),
            Err(FlagError::BadSyntax("---n=1".to_string()))
        );
        assert_eq!(flags.parse(&["-help"]), Err(FlagError::Help));
        assert_eq!(flags.parse(&["-h"]), Err(FlagError::Help));
        assert!(matches!(
            flags.parse(&["-n=abc"]),
            Err(FlagError::InvalidValue { ref value, .. }) if value == "abc"
        ));
    }

    #[test]
    fn test_clap_errors_keep_their_kind() {
        let unknown = clap::Command::new("flags")
            .no_binary_name(true)
            .try_get_matches_from(["--nope=1"])
            .unwrap_err();
        assert_eq!(from_clap(unknown), FlagError::Undefined("nope".to_string()));

        let needs_value = clap::Command::new("flags")
            .no_binary_name(true)
            .arg(Arg::new("n").long("n").action(ArgAction::Set))
            .try_get_matches_from(["--n"])
            .unwrap_err();
        assert_eq!(from_clap(needs_value), FlagError::MissingValue("n".to_string()));

        let conflict = clap::Command::new("flags")
            .no_binary_name(true)
            .arg(Arg::new("a").long("a").action(ArgAction::SetTrue))
            .arg(
                Arg::new("b")
                    .long("b")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("a"),
            )
            .try_get_matches_from(["--a", "--b"])
            .unwrap_err();
        assert!(matches!(from_clap(conflict), FlagError::BadSyntax(_)));
    }

    #[test]
    fn test_declared_help_flag_is_a_plain_flag() {
        let mut flags = FlagSet::default();
        let help = flags.bool("help", false, "");
        flags.parse(&["-help"]).unwrap();
        assert!(help.get());
    }

    #[test]
    #[should_panic(expected = "flag redefined: n")]
    fn test_redefined_flag_panics() {
        let mut flags = FlagSet::default();
        flags.i32("n", 0, "");
        flags.i64("n", 0, "");
    }

    #[test]
    #[should_panic(expected = "begins with -")]
    fn test_dash_prefixed_name_panics() {
        FlagSet::default().bool("-v", false, "");
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    #[test]
    fn test_iter_reports_kind_and_non_zero_default() {
        let mut flags = FlagSet::default();
        flags.duration("wait", Duration::from_secs(10), "how long");
        flags.string("name", "", "who");
        flags.bool("verbose", false, "noise");

        let infos: Vec<_> = flags.iter().collect();
        let names: Vec<_> = infos.iter().map(|i| i.name).collect();
        assert_eq!(names, ["name", "verbose", "wait"]);

        let wait = flags.lookup("wait").unwrap();
        assert_eq!(wait.kind, "duration");
        assert_eq!(wait.default, Some("10s"));
        assert_eq!(flags.lookup("name").unwrap().default, None);
        assert_eq!(flags.lookup("verbose").unwrap().default, None);
    }
}
