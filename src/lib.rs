//! `argtree` is a declarative command line parser for Rust.
//!
//! A program declares its options (`-x`, `--xx`), positional arguments and nested sub-commands up front.
//! `argtree` then turns the raw command line into typed values bound to those declarations, or into a list of usage errors.
//! Specifically, `argtree` attempts to prioritize the following design concerns:
//! * *Conventional Unix syntax*:
//! Long options (`--xx 1`, `--xx=1`), short options (`-x 1`, `-x1`, `-x=1`), grouped flags (`-abc`), the `--` terminator, and bare number options (`-5` for `-n 5`).
//! * *Argument vs. option paradigm*:
//! Arguments are matched positionally, options by name.
//! Variadic arguments take whatever the other arguments leave behind.
//! * *Sub-command paradigm*:
//! Each command level consumes its tokens up to the first sub-command name, and hands the rest down.
//! * *All the mistakes at once*:
//! Usage errors are accumulated per command level, so the user sees every problem with a command line in a single run.
//! * *No hidden control flow*:
//! Help and version output are outcomes of the parse ([`ParseOutcome::EarlyExit`]), not errors or panics.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ summer -h
//! usage: summer [-h] ITEM [...]
//!
//! positional arguments:
//!  item         The items to sum.
//!
//! options:
//!  -h, --help   Show this help message and exit.
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer 1 blah
//! Parse error: Invalid value for 'item': cannot convert 'blah' to i64.
//! 1 blah
//!   ^
//! ```
//!
//! # Builder Api
//! Configure `argtree` by starting with a [`CommandLineParser`] and `add`ing parameters.
//! There are two classes of parameters: [`Parameter::argument`] and [`Parameter::option`] (with [`Parameter::flag`] as shorthand for an option that takes no values).
//!
//! The cardinality of each parameter is declared with [`Nargs`]:
//! * `Nargs::Precisely(n)`: exactly `n` values.
//! * `Nargs::Any`: any number of values, including none.
//! * `Nargs::AtLeastOne`: one or more values.
//! * `Nargs::Between(min, max)`: between `min` and `max` values (options only).
//!
//! Each raw value passes through the [`Pipeline`] of its parameter: conversions (ex: [`Parameter::parse`]), a reduction over repeated option invocations ([`Reduce`]), validations, and a default.
//!
//! ```
//! use argtree::prelude::*;
//!
//! let parser = CommandLineParser::new("program")
//!     .add(Parameter::flag(["-v", "--verbose"]).reduce(Reduce::Count))
//!     .add(Parameter::option(["-n", "--lines"], Nargs::Precisely(1)).number_value().parse::<i64>().default(10))
//!     .add(Parameter::argument("file", Nargs::Any))
//!     .build_parser()
//!     .unwrap();
//!
//! let parsed = parser.parse_tokens(&["-vv", "-5", "a.txt", "b.txt"]).parsed().unwrap();
//! let values = parsed.root();
//! assert_eq!(values.get::<i64>("verbose"), Some(2));
//! assert_eq!(values.get::<i64>("lines"), Some(5));
//! assert_eq!(values.get::<Vec<String>>("file"), Some(vec!["a.txt".to_string(), "b.txt".to_string()]));
//! ```
//!
//! ### Sub-commands
//! Sub-commands are configured via [`CommandLineParser::command`].
//! Each level of a successful parse is available from [`Parsed`], and the handler of each level runs (root first) under [`GeneralParser::run`].
//! ```no_run
#![doc = include_str!("../demos/git_like.rs")]
//! ```
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events from the parser engine.
//! * `unit_test`: expose [`CommandValues::test_dummy`], to unit test command handlers.
pub use argtree_builder::*;
