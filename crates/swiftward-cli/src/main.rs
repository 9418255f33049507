mod cli;
mod commands;
mod util;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    let exit_code = match cli.command {
        Command::Rewrite {
            files,
            out_dir,
            stdout,
            json_diagnostics,
            no_overload_cache,
            output,
        } => commands::rewrite::run(
            &files,
            out_dir.as_deref(),
            stdout,
            json_diagnostics,
            no_overload_cache,
            output,
        ),
        Command::DumpIntentions {
            files,
            pretty,
            output,
        } => commands::dump::run(&files, pretty, output),
        Command::ParseType { ty } => commands::parse_type::run(&ty),
    };
    std::process::exit(exit_code);
}
