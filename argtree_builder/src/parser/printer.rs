use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::Nargs;

#[derive(Debug, Clone)]
pub(crate) struct OptionParameter {
    names: Vec<String>,
    nargs: Nargs,
    required: bool,
    meta: String,
    help: Option<String>,
}

impl OptionParameter {
    pub(crate) fn new(
        names: Vec<String>,
        nargs: Nargs,
        required: bool,
        meta: String,
        help: Option<String>,
    ) -> Self {
        Self {
            names,
            nargs,
            required,
            meta,
            help,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ArgumentParameter {
    name: String,
    nargs: Nargs,
    required: bool,
    help: Option<String>,
}

impl ArgumentParameter {
    pub(crate) fn new(name: String, nargs: Nargs, required: bool, help: Option<String>) -> Self {
        Self {
            name,
            nargs,
            required,
            help,
        }
    }
}

#[derive(Debug)]
struct ColumnRenderer {
    left: usize,
    middle: usize,
}

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_MIDDLE_WIDTH: usize = 17;
// Target 95% of the total width, so the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

impl ColumnRenderer {
    fn guided(left: usize, middle: usize, total_width: Option<usize>) -> Self {
        let non_middle = MAIN_INDENT + left + PADDING_WIDTH;

        let middle = match total_width {
            None => std::cmp::min(middle, MINIMUM_MIDDLE_WIDTH),
            Some(total_width) => {
                let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
                let guided_middle = std::cmp::max(middle, MINIMUM_MIDDLE_WIDTH);

                if guided_middle + non_middle <= target_total_width {
                    guided_middle
                } else if non_middle < total_width {
                    std::cmp::max(total_width - non_middle, MINIMUM_MIDDLE_WIDTH)
                } else {
                    MINIMUM_MIDDLE_WIDTH
                }
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Rendering help columns with left {left} and middle {middle}.");
        }

        Self { left, middle }
    }

    fn render(&self, left: &str, middle: &str) -> Vec<String> {
        let left_width = self.left;
        let padding = format!("{:PADDING_WIDTH$}", "");
        let mut out = Vec::default();

        for (i, part) in chunk(middle, self.middle).iter().enumerate() {
            let column = if i == 0 { left } else { "" };
            out.push(format!(
                "{:MAIN_INDENT$}{column:left_width$}{padding}{part}",
                ""
            ));
        }

        if out.is_empty() {
            out.push(format!("{:MAIN_INDENT$}{left}", ""));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() < width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = std::cmp::max(width, 2) - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

fn metavar(name: &str) -> String {
    name.to_ascii_uppercase().replace('-', "_")
}

fn repeat(meta: &str, n: u8) -> String {
    (0..n).map(|_| meta).collect::<Vec<&str>>().join(" ")
}

fn option_grammar(nargs: Nargs, meta: &str) -> String {
    match nargs {
        Nargs::Precisely(0) => String::default(),
        Nargs::Precisely(n) => format!(" {}", repeat(meta, n)),
        Nargs::Any => format!(" [{meta} ...]"),
        Nargs::AtLeastOne => format!(" {meta} [...]"),
        Nargs::Between(0, 1) => format!(" [{meta}]"),
        Nargs::Between(0, n) => format!(" [{meta} ...{n}]"),
        Nargs::Between(m, n) => format!(" {} [...{n}]", repeat(meta, m)),
    }
}

fn argument_grammar(nargs: Nargs, required: bool, meta: &str) -> String {
    let grammar = match nargs {
        Nargs::Precisely(n) => repeat(meta, n),
        Nargs::Any => format!("[{meta} ...]"),
        Nargs::AtLeastOne => format!("{meta} [...]"),
        Nargs::Between(m, n) => format!("{} [...{n}]", repeat(meta, m)),
    };

    if required || nargs == Nargs::Any {
        grammar
    } else {
        format!("[{grammar}]")
    }
}

/// Renders the help message of a single command level.
#[derive(Debug)]
pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    options: Vec<OptionParameter>,
    arguments: Vec<ArgumentParameter>,
    commands: Vec<(String, Option<String>)>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(
            "program",
            None,
            Vec::default(),
            Vec::default(),
            Vec::default(),
            None,
        )
    }

    pub(crate) fn terminal(
        program: impl Into<String>,
        about: Option<String>,
        options: Vec<OptionParameter>,
        arguments: Vec<ArgumentParameter>,
        commands: Vec<(String, Option<String>)>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, about, options, arguments, commands, terminal_width)
    }

    pub(crate) fn new(
        program: impl Into<String>,
        about: Option<String>,
        options: Vec<OptionParameter>,
        arguments: Vec<ArgumentParameter>,
        commands: Vec<(String, Option<String>)>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            program: program.into(),
            about,
            options,
            arguments,
            commands,
            terminal_width,
        }
    }

    pub(crate) fn render_help(&self) -> String {
        let mut summary = vec![format!("usage: {}", self.program)];
        let mut rows: Vec<Vec<(String, &str)>> = vec![Vec::default(); 3];

        for option in &self.options {
            let grammar = option_grammar(option.nargs, &option.meta);
            let shortest = option
                .names
                .iter()
                .fold(&option.names[0], |shortest, name| {
                    if name.len() < shortest.len() {
                        name
                    } else {
                        shortest
                    }
                });

            if option.required {
                summary.push(format!("{shortest}{grammar}"));
            } else {
                summary.push(format!("[{shortest}{grammar}]"));
            }

            let flags = option
                .names
                .iter()
                .map(|name| format!("{name}{grammar}"))
                .collect::<Vec<String>>()
                .join(", ");
            rows[1].push((flags, option.help.as_deref().unwrap_or_default()));
        }

        for argument in &self.arguments {
            let meta = metavar(&argument.name);
            summary.push(argument_grammar(argument.nargs, argument.required, &meta));
            rows[0].push((
                argument.name.clone(),
                argument.help.as_deref().unwrap_or_default(),
            ));
        }

        if !self.commands.is_empty() {
            summary.push("COMMAND ...".to_string());
        }

        for (name, help) in &self.commands {
            rows[2].push((name.clone(), help.as_deref().unwrap_or_default()));
        }

        let left = rows
            .iter()
            .flatten()
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or_default();
        let middle = rows
            .iter()
            .flatten()
            .map(|(_, middle)| middle.chars().count())
            .max()
            .unwrap_or_default();
        let column_renderer = ColumnRenderer::guided(left, middle, self.terminal_width);
        let mut lines = vec![summary.join(" ")];

        if let Some(about) = &self.about {
            lines.push(String::default());
            lines.push(about.clone());
        }

        let titles = ["positional arguments:", "options:", "sub-commands:"];

        for (title, section) in titles.iter().zip(rows) {
            if section.is_empty() {
                continue;
            }

            lines.push(String::default());
            lines.push(title.to_string());

            for (left, middle) in section {
                lines.extend(column_renderer.render(&left, middle));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn help() -> OptionParameter {
        OptionParameter::new(
            vec!["-h".to_string(), "--help".to_string()],
            Nargs::Precisely(0),
            false,
            "HELP".to_string(),
            Some(crate::constant::HELP_MESSAGE.to_string()),
        )
    }

    #[rstest]
    #[case("", 5, vec![])]
    #[case("abc", 5, vec!["abc"])]
    #[case("  abc   def  ", 7, vec!["abc def"])]
    #[case("abc def", 6, vec!["abc", "def"])]
    #[case("abcdefgh", 4, vec!["abc-", "def-", "gh"])]
    #[case("ab abcdefgh", 4, vec!["ab", "abc-", "def-", "gh"])]
    #[case("abcd", 4, vec!["abcd"])]
    fn chunk_words(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }

    #[rstest]
    #[case(Nargs::Precisely(0), "")]
    #[case(Nargs::Precisely(1), " X")]
    #[case(Nargs::Precisely(2), " X X")]
    #[case(Nargs::Any, " [X ...]")]
    #[case(Nargs::AtLeastOne, " X [...]")]
    #[case(Nargs::Between(0, 1), " [X]")]
    #[case(Nargs::Between(0, 3), " [X ...3]")]
    #[case(Nargs::Between(1, 3), " X [...3]")]
    fn option_grammars(#[case] nargs: Nargs, #[case] expected: &str) {
        assert_eq!(option_grammar(nargs, "X"), expected);
    }

    #[rstest]
    #[case(Nargs::Precisely(1), true, "A")]
    #[case(Nargs::Precisely(1), false, "[A]")]
    #[case(Nargs::Precisely(2), true, "A A")]
    #[case(Nargs::Any, false, "[A ...]")]
    #[case(Nargs::AtLeastOne, true, "A [...]")]
    fn argument_grammars(#[case] nargs: Nargs, #[case] required: bool, #[case] expected: &str) {
        assert_eq!(argument_grammar(nargs, required, "A"), expected);
    }

    #[test]
    fn render_help_empty() {
        assert_eq!(Printer::empty().render_help(), "usage: program");
    }

    #[test]
    fn render_help_narrow() {
        // Setup
        let printer = Printer::new("program", None, vec![help()], vec![], vec![], None);

        // Execute
        let message = printer.render_help();

        // Verify
        assert_eq!(
            message,
            r#"usage: program [-h]

options:
 -h, --help   Show this help
              message and exit."#
        );
    }

    #[test]
    fn render_help_full() {
        // Setup
        let printer = Printer::new(
            "program",
            Some("Does things.".to_string()),
            vec![
                help(),
                OptionParameter::new(
                    vec!["-x".to_string(), "--xx".to_string()],
                    Nargs::Precisely(1),
                    false,
                    "XX".to_string(),
                    Some("the xx value".to_string()),
                ),
                OptionParameter::new(
                    vec!["--yy".to_string()],
                    Nargs::Any,
                    true,
                    "YY".to_string(),
                    None,
                ),
            ],
            vec![ArgumentParameter::new(
                "name".to_string(),
                Nargs::Precisely(1),
                true,
                Some("the name".to_string()),
            )],
            vec![
                ("sub".to_string(), Some("Do sub things.".to_string())),
                ("other".to_string(), None),
            ],
            Some(120),
        );

        // Execute
        let message = printer.render_help();

        // Verify
        assert_eq!(
            message,
            r#"usage: program [-h] [-x XX] --yy [YY ...] NAME COMMAND ...

Does things.

positional arguments:
 name             the name

options:
 -h, --help       Show this help message and exit.
 -x XX, --xx XX   the xx value
 --yy [YY ...]

sub-commands:
 sub              Do sub things.
 other"#
        );
    }
}
