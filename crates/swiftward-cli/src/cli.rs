use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[derive(Parser)]
#[command(name = "swiftward", bin_name = "swiftward")]
#[command(about = "Objective-C to Swift source rewriter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite Objective-C sources into Swift
    #[command(after_help = r#"EXAMPLES:
  swiftward rewrite Shape.h Shape.m -o out/
  swiftward rewrite Shape.m --stdout
  swiftward rewrite Shape.m --json-diagnostics
  swiftward rewrite Shape.m --no-overload-cache"#)]
    Rewrite {
        /// Input Objective-C files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output directory for the generated .swift files
        #[arg(long, short = 'o', value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Print generated Swift to stdout instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Emit diagnostics as JSON lines on stderr
        #[arg(long)]
        json_diagnostics: bool,

        /// Disable the overload-resolver memo cache
        #[arg(long)]
        no_overload_cache: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse files and dump the collected intention graph as JSON
    #[command(after_help = r#"EXAMPLES:
  swiftward dump-intentions Shape.h
  swiftward dump-intentions Shape.h Shape.m --pretty"#)]
    DumpIntentions {
        /// Input Objective-C files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse a Swift type string and print its canonical form (debug aid)
    #[command(name = "parse-type")]
    ParseType {
        /// The type to parse, e.g. "(A, B) -> C?"
        #[arg(value_name = "TYPE")]
        ty: String,
    },
}

#[derive(Args, Clone, Copy)]
pub struct OutputArgs {
    /// Color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}
