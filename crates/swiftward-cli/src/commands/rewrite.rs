use std::path::{Path, PathBuf};

use swiftward_compiler::diagnostics::line_col;
use swiftward_compiler::{Rewriter, SourceMap};

use crate::cli::OutputArgs;
use crate::util::{load_sources, swift_file_name};

#[allow(clippy::too_many_arguments)]
pub fn run(
    files: &[PathBuf],
    out_dir: Option<&Path>,
    to_stdout: bool,
    json_diagnostics: bool,
    no_overload_cache: bool,
    output: OutputArgs,
) -> i32 {
    let sources = match load_sources(files) {
        Ok(sources) => sources,
        Err(message) => {
            eprintln!("error: {message}");
            return 1;
        }
    };

    let rewritten = Rewriter::new(sources)
        .with_overload_cache(!no_overload_cache)
        .parse()
        .collect()
        .rewrite();

    let rewritten = match rewritten {
        Ok(rewritten) => rewritten,
        Err(error) => {
            eprintln!("error: {error}");
            return 2;
        }
    };

    let diagnostics = rewritten.diagnostics();
    if !diagnostics.is_empty() {
        if json_diagnostics {
            print_json_diagnostics(rewritten.sources(), diagnostics);
        } else {
            eprintln!(
                "{}",
                diagnostics
                    .printer()
                    .sources(rewritten.sources())
                    .colored(output.color.should_colorize())
                    .render()
            );
        }
    }

    let mut failed = false;
    for file in rewritten.emit() {
        if file.failed {
            failed = true;
            continue;
        }
        if to_stdout {
            print!("{}", file.swift);
            continue;
        }
        let name = swift_file_name(&file.path);
        let target = match out_dir {
            Some(dir) => dir.join(name),
            None => Path::new(&file.path)
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(name),
        };
        if let Err(err) = write_output(&target, &file.swift) {
            eprintln!("error: {}: {err}", target.display());
            failed = true;
        }
    }

    if failed || diagnostics.has_errors() {
        1
    } else {
        0
    }
}

fn write_output(target: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, content)
}

/// One JSON object per diagnostic: `{file, line, column, severity, message}`.
fn print_json_diagnostics(sources: &SourceMap, diagnostics: &swiftward_compiler::Diagnostics) {
    for entry in diagnostics.entries() {
        let source = sources.get(entry.source);
        let (line, column) = line_col(source.content, entry.range.start().into());
        let record = serde_json::json!({
            "file": source.path,
            "line": line,
            "column": column,
            "severity": entry.severity,
            "message": entry.message,
        });
        eprintln!("{record}");
    }
}
