// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Caseview CLI entrypoint.
//!
//! Loads a case document, applies the requested disclosure gestures and prints the resulting
//! render frame as JSON on stdout. Logs go to stderr.

use std::error::Error;
use std::path::{Path, PathBuf};

use caseview::config::Settings;
use caseview::disclosure::{DisclosureController, Gesture};
use caseview::layout::Direction;
use caseview::mapper::map_case;
use caseview::model::{case_document_schema, CaseDocument, NodeId};
use caseview::query::SearchMode;
use caseview::store::FileStore;
use caseview::validate::validate_graph;
use caseview::visibility::VisibilityState;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <case.json> [--config <file>] [--direction TB|BT|LR|RL] [--state-key <key>] [--state-dir <dir>] [--durable-writes]\n      [--expand-all] [--reveal <node-id>]... [--focus <node-id>] [--search <text>] [--search-mode substring|regex|fuzzy] [--verbose]\n  {program} <case.json> --validate-only [--verbose]\n  {program} --print-schema\n\nPrints the render frame (nodes, edges, positions, visibility) as JSON.\nGestures apply in order: --expand-all, --reveal, --search, --focus.\n\nConfiguration is read from `caseview.toml` (or --config) and `CASEVIEW_*` environment variables;\nflags win. --state-key persists the visibility map under that key in the state directory.\n--durable-writes opts into fsync on every state write."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    case_path: Option<String>,
    config_path: Option<String>,
    direction: Option<Direction>,
    state_key: Option<String>,
    state_dir: Option<String>,
    durable_writes: bool,
    expand_all: bool,
    reveal: Vec<NodeId>,
    focus: Option<NodeId>,
    search: Option<String>,
    search_mode: Option<SearchMode>,
    validate_only: bool,
    print_schema: bool,
    verbose: bool,
}

fn parse_search_mode(raw: &str) -> Result<SearchMode, ()> {
    match raw {
        "substring" => Ok(SearchMode::Substring),
        "regex" => Ok(SearchMode::Regex),
        "fuzzy" => Ok(SearchMode::Fuzzy),
        _ => Err(()),
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => set_once(&mut options.config_path, args.next().ok_or(())?)?,
            "--direction" => {
                let raw = args.next().ok_or(())?;
                let direction = raw.parse::<Direction>().map_err(|_| ())?;
                set_once(&mut options.direction, direction)?;
            }
            "--state-key" => set_once(&mut options.state_key, args.next().ok_or(())?)?,
            "--state-dir" => set_once(&mut options.state_dir, args.next().ok_or(())?)?,
            "--durable-writes" => set_flag(&mut options.durable_writes)?,
            "--expand-all" => set_flag(&mut options.expand_all)?,
            "--reveal" => {
                let raw = args.next().ok_or(())?;
                options.reveal.push(NodeId::new(raw).map_err(|_| ())?);
            }
            "--focus" => {
                let raw = args.next().ok_or(())?;
                set_once(&mut options.focus, NodeId::new(raw).map_err(|_| ())?)?;
            }
            "--search" => set_once(&mut options.search, args.next().ok_or(())?)?,
            "--search-mode" => {
                let raw = args.next().ok_or(())?;
                set_once(&mut options.search_mode, parse_search_mode(&raw)?)?;
            }
            "--validate-only" => set_flag(&mut options.validate_only)?,
            "--print-schema" => set_flag(&mut options.print_schema)?,
            "--verbose" | "-v" => set_flag(&mut options.verbose)?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.case_path, arg)?,
        }
    }

    if options.print_schema {
        // Nothing else is meaningful alongside the schema.
        if options != (CliOptions {
            print_schema: true,
            verbose: options.verbose,
            ..CliOptions::default()
        }) {
            return Err(());
        }
        return Ok(options);
    }

    if options.case_path.is_none() {
        return Err(());
    }

    let has_gestures = options.expand_all
        || !options.reveal.is_empty()
        || options.focus.is_some()
        || options.search.is_some();
    if options.validate_only && (has_gestures || options.state_key.is_some()) {
        return Err(());
    }

    if options.search_mode.is_some() && options.search.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_flags(settings: &mut Settings, options: &CliOptions) {
    if let Some(direction) = options.direction {
        settings.layout.direction = direction;
    }
    if let Some(dir) = &options.state_dir {
        settings.store.state_dir = Some(PathBuf::from(dir));
    }
    if options.durable_writes {
        settings.store.durable = true;
    }
}

fn read_case(path: &Path) -> Result<CaseDocument, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let document = serde_json::from_str(&raw)
        .map_err(|err| format!("cannot parse {}: {err}", path.display()))?;
    Ok(document)
}

fn visibility_state(
    settings: &Settings,
    state_key: Option<&str>,
) -> Result<VisibilityState, Box<dyn Error>> {
    let Some(key) = state_key else {
        return Ok(VisibilityState::new(settings.visibility.clone()));
    };
    let Some(dir) = &settings.store.state_dir else {
        return Err("--state-key needs a state directory (--state-dir or [store] state_dir)".into());
    };
    let store = FileStore::new(dir).with_durability(settings.store.durability());
    Ok(VisibilityState::with_store(
        settings.visibility.clone(),
        Box::new(store),
        key,
    ))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "caseview".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging(options.verbose);

        if options.print_schema {
            println!("{}", serde_json::to_string_pretty(&case_document_schema())?);
            return Ok(());
        }

        let mut settings = Settings::load(options.config_path.as_deref().map(Path::new))?;
        apply_flags(&mut settings, &options);

        let case_path = options.case_path.clone().unwrap_or_default();
        let document = read_case(Path::new(&case_path))?;
        let graph = map_case(&document, &settings.mapper);

        let report = validate_graph(&graph);
        if options.validate_only {
            let (errors, warnings) = report.messages();
            let out = serde_json::json!({
                "ok": report.is_ok(),
                "errors": errors,
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            if !report.is_ok() {
                std::process::exit(1);
            }
            return Ok(());
        }
        for issue in report.errors().iter().chain(report.warnings()) {
            tracing::warn!(issue = %issue, "graph validation");
        }

        let visibility = visibility_state(&settings, options.state_key.as_deref())?;
        let mut controller = DisclosureController::new(graph, visibility, settings.layout.clone());

        if options.expand_all {
            controller.apply(Gesture::ExpandAll);
        }
        for node_id in &options.reveal {
            if !controller.apply(Gesture::RevealPath(node_id.clone())) {
                tracing::info!(node_id = %node_id, "reveal changed nothing");
            }
        }
        if let Some(needle) = &options.search {
            let mode = options.search_mode.unwrap_or_default();
            // Surface bad patterns instead of silently ignoring them.
            controller.search(needle, mode)?;
            controller.apply(Gesture::Search {
                needle: needle.clone(),
                mode,
            });
        }
        if let Some(node_id) = &options.focus {
            controller.apply(Gesture::Focus(node_id.clone()));
        }

        let stats = controller.visibility().stats();
        tracing::debug!(
            expanded = stats.expanded,
            total = stats.total,
            "visibility after gestures"
        );

        println!("{}", serde_json::to_string_pretty(&controller.frame())?);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("caseview: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};
    use caseview::layout::Direction;
    use caseview::model::NodeId;
    use caseview::query::SearchMode;

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_case_path() {
        let options = parse(&["case.json"]).expect("parse options");
        assert_eq!(options.case_path.as_deref(), Some("case.json"));
        assert_eq!(options.direction, None);
        assert!(!options.expand_all);
        assert!(options.reveal.is_empty());
    }

    #[test]
    fn requires_a_case_path() {
        parse(&[]).unwrap_err();
        parse(&["--expand-all"]).unwrap_err();
    }

    #[test]
    fn parses_layout_and_state_flags() {
        let options = parse(&[
            "--direction",
            "lr",
            "case.json",
            "--state-key",
            "doc-1",
            "--state-dir",
            "state",
            "--durable-writes",
            "--config",
            "custom.toml",
        ])
        .expect("parse options");
        assert_eq!(options.direction, Some(Direction::LeftToRight));
        assert_eq!(options.state_key.as_deref(), Some("doc-1"));
        assert_eq!(options.state_dir.as_deref(), Some("state"));
        assert!(options.durable_writes);
        assert_eq!(options.config_path.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn collects_repeated_reveals() {
        let options = parse(&["case.json", "--reveal", "claim-1-1", "--reveal", "evidence-2-1-1"])
            .expect("parse options");
        assert_eq!(
            options.reveal,
            vec![
                NodeId::new("claim-1-1").unwrap(),
                NodeId::new("evidence-2-1-1").unwrap()
            ]
        );
    }

    #[test]
    fn parses_search_with_mode() {
        let options = parse(&["case.json", "--search", "hazard", "--search-mode", "fuzzy"])
            .expect("parse options");
        assert_eq!(options.search.as_deref(), Some("hazard"));
        assert_eq!(options.search_mode, Some(SearchMode::Fuzzy));

        parse(&["case.json", "--search-mode", "regex"]).unwrap_err();
        parse(&["case.json", "--search", "x", "--search-mode", "exact"]).unwrap_err();
    }

    #[test]
    fn print_schema_stands_alone() {
        let options = parse(&["--print-schema", "--verbose"]).expect("parse options");
        assert!(options.print_schema);
        assert!(options.verbose);

        parse(&["--print-schema", "case.json"]).unwrap_err();
    }

    #[test]
    fn validate_only_rejects_gestures() {
        let options = parse(&["case.json", "--validate-only"]).expect("parse options");
        assert!(options.validate_only);

        parse(&["case.json", "--validate-only", "--expand-all"]).unwrap_err();
        parse(&["case.json", "--validate-only", "--state-key", "k"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_duplicate_and_malformed_args() {
        parse(&["case.json", "--nope"]).unwrap_err();
        parse(&["one.json", "two.json"]).unwrap_err();
        parse(&["case.json", "--expand-all", "--expand-all"]).unwrap_err();
        parse(&["case.json", "--focus", "a", "--focus", "b"]).unwrap_err();
        parse(&["case.json", "--direction", "diagonal"]).unwrap_err();
        parse(&["case.json", "--reveal", "  "]).unwrap_err();
        parse(&["case.json", "--state-key"]).unwrap_err();
    }
}
