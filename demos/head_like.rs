use argtree::prelude::*;
use argtree::CommandError;

fn main() {
    let parser = CommandLineParser::new("head")
        .about("Print the first lines of each file.")
        .version("1.0.0")
        .add(
            Parameter::option(["-n", "--lines"], Nargs::Precisely(1))
                .number_value()
                .parse::<u32>()
                .default(10)
                .help("Print the first LINES lines (ex: `-n 5` or `-5`)."),
        )
        .add(
            Parameter::flag(["-q", "--quiet"])
                .secondary(["-V", "--verbose"])
                .help("Never print headers giving file names."),
        )
        .add(
            Parameter::argument("file", Nargs::AtLeastOne)
                .validate(|value: &Value| match value.as_list() {
                    Some(files) if files.iter().any(|file| file.as_str() == Some("")) => {
                        Err("file names cannot be empty.".to_string())
                    }
                    _ => Ok(()),
                })
                .help("The files to read."),
        )
        .handler(|context: &mut Context<'_>| {
            let values = context.values();
            let lines: u32 = values
                .get("lines")
                .ok_or_else(|| CommandError::from("missing line count"))?;
            let files: Vec<String> = values.get("file").unwrap_or_default();

            for file in files {
                if !values.flag("quiet") {
                    println!("==> {file} <==");
                }

                println!("(the first {lines} lines of {file})");
            }

            Ok(())
        })
        .build();

    parser.run();
}
