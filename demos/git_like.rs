use argtree::prelude::*;

struct Verbosity(i64);

fn main() {
    let parser = CommandLineParser::new("git")
        .about("A tiny version control front-end.")
        .add(Parameter::flag(["-v", "--verbose"]).reduce(Reduce::Count))
        .alias("ci", ["commit", "--all"])
        .handler(|context: &mut Context<'_>| {
            let verbose = context.values().get::<i64>("verbose").unwrap_or_default();
            context.set_object(Verbosity(verbose));
            Ok(())
        })
        .command("commit", |commit| {
            commit
                .about("Record changes to the repository.")
                .add(Parameter::flag(["-a", "--all"]).help("Commit all changed files."))
                .add(
                    Parameter::option(["-m", "--message"], Nargs::Precisely(1))
                        .required()
                        .help("The commit message."),
                )
                .handler(|context: &mut Context<'_>| {
                    let verbosity = context.find_object::<Verbosity>().map_or(0, |v| v.0);
                    let message = context.values().text("message").unwrap_or_default();
                    println!("[verbosity {verbosity}] commit: {message}");
                    Ok(())
                })
        })
        .command("remote", |remote| {
            remote
                .about("Manage the set of tracked repositories.")
                .command("add", |add| {
                    add.add(Parameter::argument("name", Nargs::Precisely(1)))
                        .add(Parameter::argument("url", Nargs::Precisely(1)))
                        .handler(|context: &mut Context<'_>| {
                            let values = context.values();
                            println!(
                                "remote add {} {}",
                                values.text("name").unwrap_or_default(),
                                values.text("url").unwrap_or_default()
                            );
                            Ok(())
                        })
                })
                .command("remove", |remove| {
                    remove.add(Parameter::argument("name", Nargs::Precisely(1)))
                })
        })
        .build();

    parser.run();
}
