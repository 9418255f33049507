use std::path::PathBuf;

use crate::cli::OutputArgs;
use crate::util::load_sources;

/// Parses + collects, then prints the intention graph as JSON. Rewrite
/// passes do not run; this shows the graph as the passes would see it.
pub fn run(files: &[PathBuf], pretty: bool, output: OutputArgs) -> i32 {
    let sources = match load_sources(files) {
        Ok(sources) => sources,
        Err(message) => {
            eprintln!("error: {message}");
            return 1;
        }
    };

    let collected = swiftward_compiler::Rewriter::new(sources).parse().collect();
    if !collected.diagnostics().is_empty() {
        eprintln!(
            "{}",
            collected
                .diagnostics()
                .printer()
                .sources(collected.sources())
                .colored(output.color.should_colorize())
                .render()
        );
    }
    let graph = collected.graph();

    let value = serde_json::json!({
        "files": graph.files,
        "classes": graph.classes().collect::<Vec<_>>(),
        "extensions": graph.extensions().collect::<Vec<_>>(),
        "protocols": graph.protocols().collect::<Vec<_>>(),
        "enums": graph.enums().collect::<Vec<_>>(),
        "structs": graph.structs().collect::<Vec<_>>(),
        "typedefs": graph.typedefs().collect::<Vec<_>>(),
        "globalVars": graph.global_vars().collect::<Vec<_>>(),
        "globalFuncs": graph.global_funcs().collect::<Vec<_>>(),
    });

    let rendered = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    match rendered {
        Ok(rendered) => {
            println!("{rendered}");
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}
