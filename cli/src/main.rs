//! `scotty`: a small program showing a command tree in use.
//!
//! ```text
//! scotty [-verbose] greet [-greeting G] [-times N] [name...]
//! scotty wait [-for DURATION]
//! scotty math add|mul <number>...
//! scotty describe
//! ```

use std::cell::OnceCell;
use std::rc::Rc;
use std::time::Duration;

use command_tree_core::{
    BoxError, Command, CommandId, CommandSchema, CommandTree, Invocation, duration,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SCOTTY_LOG";

fn main() {
    init_logging();

    let invocation = Invocation::from_env();
    let program = if invocation.program.is_empty() {
        "scotty"
    } else {
        invocation.program.as_str()
    };
    let (mut tree, root) = build_tree(program);
    if let Err(err) = tree.exec(root, invocation) {
        eprintln!("Error: {err}");
        std::process::exit(2);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the program's tree with the root named `program`, so the schema
/// printed by `describe` matches the usage text.
fn build_tree(program: &str) -> (CommandTree, CommandId) {
    let mut tree = CommandTree::new();
    let root = tree.insert(Command::new(program).short("Example program built on command-tree-core"));
    let verbose = tree
        .flags(root)
        .bool_env("verbose", "SCOTTY_VERBOSE", false, "print what is being done");

    // greet
    let mut greet = Command::new("greet").short("Greet people by name");
    let greeting = greet.flags().string_env(
        "greeting",
        "SCOTTY_GREETING",
        "Hello",
        "word to greet with",
    );
    let times = greet.flags().u32("times", 1, "how many times to greet each name");
    let greet = tree.insert(greet.run(move |_, args| {
        let names: Vec<&str> = if args.is_empty() {
            vec!["world"]
        } else {
            args.iter().map(String::as_str).collect()
        };
        if verbose.get() {
            println!("greeting {} name(s) {} time(s)", names.len(), times.get());
        }
        for name in names {
            for _ in 0..times.get() {
                println!("{}, {name}!", greeting.get());
            }
        }
        Ok(())
    }));

    // wait
    let mut wait = Command::new("wait").short("Sleep for a while");
    let period = wait.flags().duration_env(
        "for",
        "SCOTTY_WAIT",
        Duration::from_secs(1),
        "how long to sleep",
    );
    let wait = tree.insert(wait.run(move |_, _| {
        let period = period.get();
        debug!(?period, "sleeping");
        std::thread::sleep(period);
        println!("waited {}", duration::format(period));
        Ok(())
    }));

    // math add | mul
    let math = tree.insert(Command::new("math").short("Integer arithmetic"));
    let add = tree.insert(Command::new("add").short("Sum the arguments").run(|_, args| {
        println!("{}", numbers(args)?.iter().sum::<i64>());
        Ok(())
    }));
    let mul = tree.insert(
        Command::new("mul")
            .short("Multiply the arguments")
            .run(|_, args| {
                println!("{}", numbers(args)?.iter().product::<i64>());
                Ok(())
            }),
    );
    tree.add_subcommands(math, [add, mul]);

    // describe
    let schema: Rc<OnceCell<CommandSchema>> = Rc::default();
    let describe = tree.insert(
        Command::new("describe")
            .short("Print this program's command tree as JSON")
            .run({
                let schema = Rc::clone(&schema);
                move |_, _| {
                    let schema = schema.get().ok_or("command tree not captured")?;
                    println!("{}", serde_json::to_string_pretty(schema)?);
                    Ok(())
                }
            }),
    );

    tree.add_subcommands(root, [greet, wait, math, describe]);
    schema.get_or_init(|| tree.schema(root));

    (tree, root)
}

fn numbers(args: &[String]) -> Result<Vec<i64>, BoxError> {
    if args.is_empty() {
        return Err("expected at least one number".into());
    }
    args.iter()
        .map(|arg| {
            arg.parse::<i64>()
                .map_err(|e| format!("invalid number {arg:?}: {e}").into())
        })
        .collect()
}
