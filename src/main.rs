use clap::Parser;
use dirsort::cli::{Cli, print_outcome, run};
use dirsort::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();
    cli.setup_logging();

    let result = run(&cli).and_then(|outcome| print_outcome(&outcome, cli.json));
    if let Err(e) = result {
        OutputFormatter::error(&e);
        std::process::exit(1);
    }
}
