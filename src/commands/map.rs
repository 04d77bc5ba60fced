//! The `modmap` run: generate the map and print a summary.

use std::fmt::Write as _;

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::map::generator::{self, MapReport};
use crate::map::ModuleMap;

/// Generate the map for the configuration in `cli` and print a summary.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or generation fails.
pub fn run(ctx: &ServiceContext, cli: &Cli) -> Result<(), String> {
    let config = cli.mapper_config();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;

    let report =
        runtime.block_on(generator::generate(ctx, &config)).map_err(|e| e.to_string())?;
    print!("{}", format_summary(&report));
    Ok(())
}

/// Renders the report printed after a successful run.
fn format_summary(report: &MapReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mapped {} files ({} skipped)",
        report.map.len(),
        report.skipped.len()
    );
    let _ = writeln!(out, "Written to {}", report.output.display());
    for err in &report.skipped {
        let _ = writeln!(out, "  skipped: {err}");
    }
    out.push('\n');
    out.push_str(&sample_entry(&report.map));
    out
}

/// The first entry of the map rendered on its own, as a preview.
fn sample_entry(map: &ModuleMap) -> String {
    let Some((path, entry)) = map.modules.iter().next() else {
        return "No source files found.\n".to_string();
    };
    let mut sample = ModuleMap::default();
    sample.modules.insert(path.clone(), entry.clone());
    match sample.to_yaml() {
        Ok(yaml) => format!("Sample entry:\n{yaml}"),
        Err(_) => format!("Sample entry: {path}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction, Method, Port};
    use crate::error::MapError;
    use crate::map::ModuleEntry;
    use chrono::Utc;
    use clap::Parser;
    use serde_json::json;
    use std::path::PathBuf;

    /// Build a cassette that simulates a one-file project.
    fn make_cassette() -> Cassette {
        Cassette {
            name: "cli-map".into(),
            recorded_at: Utc::now(),
            commit: "abc123".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: Port::Fs,
                    method: Method::ListFiles,
                    input: json!({"path": "/project"}),
                    output: json!({"ok": ["index.ts"]}),
                },
                Interaction {
                    seq: 1,
                    port: Port::Fs,
                    method: Method::ReadToString,
                    input: json!({"path": "/project/index.ts"}),
                    output: json!({"ok": "console.log('hi');\n"}),
                },
                Interaction {
                    seq: 2,
                    port: Port::Llm,
                    method: Method::Chat,
                    input: json!({"model": "gpt-4o"}),
                    output: json!({"ok": {
                        "message": {
                            "role": "assistant",
                            "content": "{\"description\": \"Prints a greeting\", \"modules\": {}}"
                        }
                    }}),
                },
                Interaction {
                    seq: 3,
                    port: Port::Fs,
                    method: Method::Write,
                    input: json!({"path": "/project/.modmap/module_map.yaml"}),
                    output: json!({"ok": null}),
                },
            ],
        }
    }

    #[test]
    fn cli_map_from_cassette() {
        let cassette = make_cassette();
        let yaml = serde_yaml::to_string(&cassette).unwrap();
        let dir = std::env::temp_dir().join("modmap_cli_map");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cli_map.cassette.yaml");
        std::fs::write(&path, &yaml).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let cli = Cli::parse_from(["modmap", "--root", "/project"]);
        let result = run(&ctx, &cli);
        assert!(result.is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn summary_lists_counts_destination_and_sample() {
        let mut map = ModuleMap::default();
        map.modules.insert("a.ts".into(), ModuleEntry::new("entry point"));
        map.modules.insert("b.ts".into(), ModuleEntry::new("helper"));
        let report = MapReport {
            map,
            skipped: vec![MapError::Oracle { path: "c.ts".into(), message: "timeout".into() }],
            output: PathBuf::from("/p/.modmap/module_map.yaml"),
        };

        let summary = format_summary(&report);
        assert!(summary.starts_with("Mapped 2 files (1 skipped)\n"));
        assert!(summary.contains("Written to /p/.modmap/module_map.yaml\n"));
        assert!(summary.contains("  skipped: oracle request failed for c.ts: timeout\n"));
        assert!(summary.contains("Sample entry:\na.ts:\n  description: entry point\n"));
        assert!(!summary.contains("b.ts:"));
    }

    #[test]
    fn summary_for_empty_project() {
        let report = MapReport {
            map: ModuleMap::default(),
            skipped: Vec::new(),
            output: PathBuf::from("/p/map.yaml"),
        };
        let summary = format_summary(&report);
        assert!(summary.starts_with("Mapped 0 files (0 skipped)\n"));
        assert!(summary.ends_with("No source files found.\n"));
    }
}
