use argtree::prelude::*;

fn main() {
    let parser = CommandLineParser::new("summer")
        .add(
            Parameter::argument("item", Nargs::AtLeastOne)
                .parse::<i64>()
                .help("The items to sum."),
        )
        .handler(|context: &mut Context<'_>| {
            let items: Vec<i64> = context.values().get("item").unwrap_or_default();
            let sum: i64 = items.iter().sum();
            println!("Sum: {sum}");
            Ok(())
        })
        .build();

    parser.run();
}
