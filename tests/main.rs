use assert_matches::assert_matches;
use rstest::rstest;
use std::sync::{Arc, Mutex};

use argtree::prelude::*;
use argtree::{ParameterClass, UsageError, UsageFailure};

fn failure(outcome: ParseOutcome) -> UsageFailure {
    match outcome {
        ParseOutcome::UsageFailure(failure) => failure,
        other => panic!("expected a usage failure, got: {other:?}"),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn short_attached_value_and_flag() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-x", "--xx"], Nargs::Precisely(1)))
        .add(Parameter::flag(["-y", "--yy"]))
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser.parse_tokens(&["-x3", "-y"]).parsed().unwrap();

    // Verify
    assert_eq!(parsed.root().text("xx"), Some("3"));
    assert!(parsed.root().flag("yy"));
}

#[test]
fn fixed_then_variadic_arguments() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("A", Nargs::Precisely(1)))
        .add(Parameter::argument("B", Nargs::AtLeastOne))
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser.parse_tokens(&["1", "2", "3"]).parsed().unwrap();
    let missing = failure(parser.parse_tokens(&[]));

    // Verify
    assert_eq!(parsed.root().text("A"), Some("1"));
    assert_eq!(
        parsed.root().get::<Vec<String>>("B"),
        Some(strings(&["2", "3"]))
    );
    assert_matches!(missing.usage_errors()[0], UsageError::MissingParameter { parameter, kind: ParameterClass::Arg } => {
        assert_eq!(parameter, "A");
    });
}

#[test]
fn parent_then_subcommand() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--xx"], Nargs::Precisely(1)))
        .command("sub", |sub| {
            sub.add(Parameter::option(["--yy"], Nargs::Precisely(1)))
        })
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser
        .parse_tokens(&["--xx", "2", "sub", "--yy", "4"])
        .parsed()
        .unwrap();

    // Verify
    assert_eq!(parsed.levels().len(), 2);
    assert_eq!(parsed.root().text("xx"), Some("2"));
    let sub = parsed.command("sub").unwrap();
    assert_eq!(sub.path(), "program sub");
    assert_eq!(sub.text("yy"), Some("4"));
    assert_eq!(parsed.invoked(), sub);
}

#[test]
fn unknown_option() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--xx"], Nargs::Precisely(1)))
        .build_parser()
        .unwrap();

    // Execute
    let failure = failure(parser.parse_tokens(&["--zz", "1"]));

    // Verify
    assert_matches!(failure.usage_errors()[0], UsageError::NoSuchOption { name, suggestions } => {
        assert_eq!(name, "--zz");
        assert!(suggestions.is_empty());
    });
}

#[test]
fn paired_option_without_values() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-x"], Nargs::Precisely(2)))
        .build_parser()
        .unwrap();

    // Execute
    let failure = failure(parser.parse_tokens(&["-x"]));

    // Verify
    assert_matches!(
        failure.usage_errors()[0],
        UsageError::IncorrectOptionValueCount { provided: 0, .. }
    );
}

#[rstest]
#[case(vec!["--pair", "a", "b", "rest"], vec!["rest"])]
#[case(vec!["--pair=a", "b", "rest"], vec!["rest"])]
#[case(vec!["rest", "-p", "a", "b"], vec!["rest"])]
fn arity_conservation(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["-p", "--pair"], Nargs::Precisely(2)))
        .add(Parameter::argument("item", Nargs::Any))
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser.parse_tokens(&tokens).parsed().unwrap();

    // Verify
    assert_eq!(
        parsed.root().get::<Vec<String>>("pair"),
        Some(strings(&["a", "b"]))
    );
    assert_eq!(
        parsed.root().get::<Vec<String>>("item"),
        Some(strings(&expected))
    );
}

#[test]
fn bundling_equivalence() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::flag(["-a"]))
        .add(Parameter::flag(["-b"]))
        .add(Parameter::flag(["-c"]))
        .add(Parameter::flag(["-d"]))
        .build_parser()
        .unwrap();

    // Execute
    let bundled = parser.parse_tokens(&["-abc"]).parsed().unwrap();
    let separate = parser.parse_tokens(&["-a", "-b", "-c"]).parsed().unwrap();

    // Verify
    for key in ["a", "b", "c"] {
        assert!(bundled.root().flag(key));
        assert!(separate.root().flag(key));
    }
    assert!(!bundled.root().flag("d"));
    assert_eq!(bundled.root().value("d"), separate.root().value("d"));
}

#[rstest]
#[case(vec!["x", "y", "z"], vec!["x", "y"], "z")]
#[case(vec!["z"], vec![], "z")]
fn variadic_reserves_trailing(
    #[case] tokens: Vec<&str>,
    #[case] expected_files: Vec<&str>,
    #[case] expected_target: &str,
) {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("file", Nargs::Any))
        .add(Parameter::argument("target", Nargs::Precisely(1)))
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser.parse_tokens(&tokens).parsed().unwrap();

    // Verify
    assert_eq!(
        parsed.root().get::<Vec<String>>("file"),
        Some(strings(&expected_files))
    );
    assert_eq!(parsed.root().text("target"), Some(expected_target));
}

#[test]
fn variadic_missing_trailing() {
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("file", Nargs::Any))
        .add(Parameter::argument("target", Nargs::Precisely(1)))
        .build_parser()
        .unwrap();

    let failure = failure(parser.parse_tokens(&[]));

    assert_matches!(failure.usage_errors()[0], UsageError::MissingParameter { parameter, .. } => {
        assert_eq!(parameter, "target");
    });
}

#[rstest]
#[case(true)]
#[case(false)]
fn terminator(#[case] declared: bool) {
    // Setup
    let mut builder = CommandLineParser::new("program").add(Parameter::argument("item", Nargs::Any));
    if declared {
        builder = builder.add(Parameter::flag(["-x"]));
    }
    let parser = builder.build_parser().unwrap();

    // Execute
    let parsed = parser.parse_tokens(&["--", "-x"]).parsed().unwrap();

    // Verify
    assert_eq!(
        parsed.root().get::<Vec<String>>("item"),
        Some(strings(&["-x"]))
    );
    if declared {
        assert!(!parsed.root().flag("x"));
    }
}

#[test]
fn alias_expands_once() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::flag(["-l", "--long"]))
        .add(Parameter::argument("item", Nargs::Any))
        .alias("ls", ["ls", "--long"])
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser.parse_tokens(&["ls"]).parsed().unwrap();

    // Verify
    assert!(parsed.root().flag("long"));
    assert_eq!(
        parsed.root().get::<Vec<String>>("item"),
        Some(strings(&["ls"]))
    );
    assert_eq!(parsed.tokens(), &strings(&["ls", "--long"])[..]);
}

#[test]
fn alias_into_subcommand() {
    let parser = CommandLineParser::new("program")
        .command("commit", |sub| sub.add(Parameter::flag(["-a", "--all"])))
        .alias("ci", ["commit", "--all"])
        .build_parser()
        .unwrap();

    let parsed = parser.parse_tokens(&["ci"]).parsed().unwrap();

    assert!(parsed.command("commit").unwrap().flag("all"));
}

#[test]
fn subcommand_boundary() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::flag(["-v", "--verbose"]))
        .command("sub", |sub| {
            sub.add(Parameter::flag(["-v", "--verbose"]))
                .add(Parameter::argument("item", Nargs::Any))
        })
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser
        .parse_tokens(&["sub", "-v", "program"])
        .parsed()
        .unwrap();

    // Verify
    assert!(!parsed.root().flag("verbose"));
    let sub = parsed.command("sub").unwrap();
    assert!(sub.flag("verbose"));
    assert_eq!(sub.get::<Vec<String>>("item"), Some(strings(&["program"])));
}

#[test]
fn number_option() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(
            Parameter::option(["-n", "--lines"], Nargs::Precisely(1))
                .number_value()
                .parse::<i64>()
                .default(10),
        )
        .add(Parameter::argument("file", Nargs::Any))
        .build_parser()
        .unwrap();

    // Execute
    let bare = parser.parse_tokens(&["-5", "a.txt"]).parsed().unwrap();
    let named = parser.parse_tokens(&["--lines", "7"]).parsed().unwrap();
    let default = parser.parse_tokens(&["a.txt"]).parsed().unwrap();

    // Verify
    assert_eq!(bare.root().get::<i64>("lines"), Some(5));
    assert_eq!(
        bare.root().get::<Vec<String>>("file"),
        Some(strings(&["a.txt"]))
    );
    assert_eq!(named.root().get::<i64>("lines"), Some(7));
    assert_eq!(default.root().get::<i64>("lines"), Some(10));
}

#[test]
fn errors_accumulate() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::flag(["-v", "--verbose"]))
        .add(Parameter::argument("count", Nargs::Precisely(1)).parse::<u32>())
        .build_parser()
        .unwrap();

    // Execute
    let failure = failure(parser.parse_tokens(&["--bogus", "-v", "--other"]));

    // Verify
    let errors = failure.usage_errors();
    assert_eq!(errors.len(), 3);
    assert_matches!(errors[0], UsageError::NoSuchOption { name, .. } => {
        assert_eq!(name, "--bogus");
    });
    assert_matches!(errors[1], UsageError::NoSuchOption { name, .. } => {
        assert_eq!(name, "--other");
    });
    assert_matches!(errors[2], UsageError::MissingParameter { parameter, .. } => {
        assert_eq!(parameter, "count");
    });
    assert_eq!(failure.command(), "program");
    assert_eq!(failure.error_context().unwrap().to_string(), "--bogus -v --other\n^");
}

#[test]
fn help_wins_over_errors() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("count", Nargs::Precisely(1)).parse::<u32>())
        .build_parser()
        .unwrap();

    // Execute
    let outcome = parser.parse_tokens(&["--bogus", "abc", "extra", "--help"]);

    // Verify
    assert_matches!(outcome, ParseOutcome::EarlyExit(early_exit) => {
        assert_eq!(early_exit.exit_code(), 0);
        assert!(early_exit.message().starts_with("usage: program [-h] COUNT"));
    });
}

#[test]
fn subcommand_help() {
    let parser = CommandLineParser::new("program")
        .version("1.2.3")
        .command("sub", |sub| sub.about("Do the sub thing."))
        .build_parser()
        .unwrap();

    let help = parser.parse_tokens(&["sub", "-h"]);
    let version = parser.parse_tokens(&["--version", "sub"]);

    assert_matches!(help, ParseOutcome::EarlyExit(early_exit) => {
        assert!(early_exit.message().starts_with("usage: program sub [-h]"));
        assert!(early_exit.message().contains("Do the sub thing."));
    });
    assert_matches!(version, ParseOutcome::EarlyExit(early_exit) => {
        assert_eq!(early_exit.message(), "program version 1.2.3");
    });
}

#[test]
fn subcommand_not_parsed_after_errors() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--xx"], Nargs::Precisely(1)).parse::<i64>())
        .command("sub", |sub| sub.add(Parameter::argument("item", Nargs::Precisely(1))))
        .build_parser()
        .unwrap();

    // Execute
    let failure = failure(parser.parse_tokens(&["--xx", "abc", "sub"]));

    // Verify
    let errors = failure.usage_errors();
    assert_eq!(failure.command(), "program");
    assert_matches!(errors[..], [UsageError::InvalidValue { parameter, .. }] => {
        assert_eq!(parameter, "--xx");
    });
}

#[test]
fn handlers_run_root_first() {
    // Setup
    let sums: Arc<Mutex<Vec<i64>>> = Arc::default();
    let trail = sums.clone();
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(["--base"], Nargs::Precisely(1)).parse::<i64>())
        .handler(|context: &mut Context<'_>| {
            let base = context.values().get::<i64>("base").unwrap_or(0);
            context.set_object(base);
            Ok(())
        })
        .command("add", move |sub| {
            sub.add(Parameter::argument("item", Nargs::AtLeastOne).parse::<i64>())
                .handler(move |context: &mut Context<'_>| {
                    let base = *context.find_object::<i64>().ok_or("missing base")?;
                    let items: Vec<i64> = context.values().get("item").unwrap_or_default();
                    trail.lock().unwrap().push(base + items.iter().sum::<i64>());
                    Ok(())
                })
        })
        .build_parser()
        .unwrap();

    // Execute
    let with_base = parser.run_tokens(&["--base", "1", "add", "2", "3"]);
    let without_base = parser.run_tokens(&["add", "2", "3"]);
    let help = parser.parse_tokens(&["add", "--help"]);

    // Verify
    assert_eq!(with_base, Ok(()));
    assert_eq!(without_base, Ok(()));
    assert_eq!(*sums.lock().unwrap(), vec![6, 5]);
    assert_matches!(help, ParseOutcome::EarlyExit(early_exit) => {
        assert_eq!(early_exit.exit_code(), 0);
        assert!(early_exit.message().starts_with("usage: program add [-h]"));
    });
}

fn color_parser() -> GeneralParser {
    CommandLineParser::new("program")
        .add(Parameter::flag(["-v", "--verbose"]))
        .add(
            Parameter::option(["-c", "--color"], Nargs::Between(0, 1))
                .unattached_value(false)
                .default("never"),
        )
        .add(Parameter::argument("file", Nargs::Any))
        .build_parser()
        .unwrap()
}

#[test]
fn optional_value_not_taken_from_next_token() {
    // Execute
    let parsed = color_parser()
        .parse_tokens(&["--color", "always"])
        .parsed()
        .unwrap();

    // Verify
    assert_eq!(parsed.root().value("color"), Some(&Value::Absent));
    assert_eq!(
        parsed.root().get::<Vec<String>>("file"),
        Some(strings(&["always"]))
    );
}

#[rstest]
#[case(vec!["--color=always"], Some("always"))]
#[case(vec!["-calways"], Some("always"))]
#[case(vec![], Some("never"))]
#[case(vec!["-vc"], None)]
#[case(vec!["--color"], None)]
fn optional_value_forms(#[case] tokens: Vec<&str>, #[case] expected: Option<&str>) {
    // Execute
    let parsed = color_parser().parse_tokens(&tokens).parsed().unwrap();

    // Verify
    assert_eq!(parsed.root().text("color"), expected);
    if expected.is_none() {
        assert_eq!(parsed.root().value("color"), Some(&Value::Absent));
    }
}

#[test]
fn optional_value_in_short_bundle() {
    // Execute
    let parsed = color_parser().parse_tokens(&["-vc", "a.txt"]).parsed().unwrap();

    // Verify
    assert!(parsed.root().flag("verbose"));
    assert_eq!(parsed.root().value("color"), Some(&Value::Absent));
    assert_eq!(
        parsed.root().get::<Vec<String>>("file"),
        Some(strings(&["a.txt"]))
    );
}

#[test]
fn argument_value_count() {
    // Setup
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument("pair", Nargs::Precisely(2)))
        .build_parser()
        .unwrap();

    // Execute
    let failure = failure(parser.parse_tokens(&["x"]));

    // Verify
    let errors = failure.usage_errors();
    assert_matches!(&errors[..], [UsageError::IncorrectArgumentValueCount { argument, expected, provided }] => {
        assert_eq!(argument, "pair");
        assert_eq!(*expected, Nargs::Precisely(2));
        assert_eq!(*provided, 1);
    });
}

#[test]
fn subcommand_typo() {
    // Setup
    let parser = CommandLineParser::new("program")
        .command("status", |sub| sub)
        .command("commit", |sub| sub)
        .build_parser()
        .unwrap();

    // Execute
    let failure = failure(parser.parse_tokens(&["sttaus"]));

    // Verify
    let errors = failure.usage_errors();
    assert_matches!(&errors[..], [UsageError::NoSuchSubcommand { name, suggestions }] => {
        assert_eq!(name, "sttaus");
        assert_eq!(suggestions, &strings(&["status"]));
    });
}

#[test]
fn number_option_without_grouping() {
    // Setup
    let parser = CommandLineParser::new("program")
        .allow_grouped_short_options(false)
        .add(
            Parameter::option(["-n", "--lines"], Nargs::Precisely(1))
                .number_value()
                .parse::<i64>(),
        )
        .add(Parameter::flag(["-v"]))
        .build_parser()
        .unwrap();

    // Execute
    let parsed = parser.parse_tokens(&["-5", "-v"]).parsed().unwrap();

    // Verify
    assert_eq!(parsed.root().get::<i64>("lines"), Some(5));
    assert!(parsed.root().flag("v"));
}

#[test]
fn command_lookup_skips_root() {
    // Setup
    let parser = CommandLineParser::new("sub")
        .add(Parameter::flag(["--top"]))
        .command("sub", |sub| sub.add(Parameter::flag(["--all"])))
        .build_parser()
        .unwrap();

    // Execute
    let nested = parser.parse_tokens(&["--top", "sub", "--all"]).parsed().unwrap();
    let root_only = parser.parse_tokens(&["--top"]).parsed().unwrap();

    // Verify
    assert!(nested.command("sub").unwrap().flag("all"));
    assert!(root_only.root().flag("top"));
    assert_eq!(root_only.command("sub"), None);
}
