// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use caseview::disclosure::{DisclosureController, Gesture};
use caseview::layout::{Direction, LayoutOptions};
use caseview::mapper::{map_case, MapperOptions};
use caseview::model::{CaseDocument, Graph, NodeId, NodeKind};
use caseview::store::FileStore;
use caseview::validate::{validate_graph, ValidationIssue};
use caseview::visibility::{VisibilityOptions, VisibilityState};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "caseview_it_{prefix}_{}_{nanos}_{counter}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("pipeline")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn load_case(name: &str) -> CaseDocument {
    serde_json::from_str(&read_fixture(name)).expect("parse case document")
}

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn visible(controller: &DisclosureController) -> Vec<String> {
    controller
        .visible_ids()
        .into_iter()
        .map(NodeId::into_string)
        .collect()
}

#[test]
fn case_document_maps_to_expected_ids_and_kinds() {
    let graph = map_case(&load_case("two_strategies.json"), &MapperOptions::default());

    let ids = graph
        .nodes()
        .iter()
        .map(|node| (node.id().as_str().to_owned(), node.kind()))
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            ("goal-1".to_owned(), NodeKind::Goal),
            ("context-1".to_owned(), NodeKind::Context),
            ("strategy-1".to_owned(), NodeKind::Strategy),
            ("claim-1-1".to_owned(), NodeKind::PropertyClaim),
            ("evidence-1-1-1".to_owned(), NodeKind::Evidence),
            ("strategy-2".to_owned(), NodeKind::Strategy),
            ("claim-2-1".to_owned(), NodeKind::PropertyClaim),
            ("evidence-2-1-1".to_owned(), NodeKind::Evidence),
        ]
    );
    assert_eq!(graph.edges().len(), 6);

    let goal = graph.node("goal-1").expect("goal");
    assert_eq!(goal.name(), Some("System is safe"));
    assert_eq!(goal.attributes().get("source_id"), Some(&serde_json::json!(11)));
}

#[test]
fn unlinked_context_is_only_a_warning() {
    let graph = map_case(&load_case("two_strategies.json"), &MapperOptions::default());
    let report = validate_graph(&graph);

    assert!(report.is_ok(), "{:?}", report.errors());
    assert_eq!(
        report.warnings(),
        &[ValidationIssue::OrphanNode {
            node_id: nid("context-1"),
            kind: NodeKind::Context,
        }]
    );

    let linked = map_case(
        &load_case("two_strategies.json"),
        &MapperOptions {
            connect_context: true,
            ..MapperOptions::default()
        },
    );
    let report = validate_graph(&linked);
    assert!(report.is_ok());
    assert!(report.warnings().is_empty(), "{:?}", report.warnings());
}

#[test]
fn dangling_edges_are_errors_but_layout_still_runs() {
    let graph: Graph = serde_json::from_str(&read_fixture("dangling_graph.json")).expect("graph");

    let report = validate_graph(&graph);
    assert!(!report.is_ok());
    let (errors, _) = report.messages();
    assert_eq!(
        errors,
        vec!["edge strategy-1-claim-9 references missing target node claim-9".to_owned()]
    );

    let mut controller =
        DisclosureController::new(graph, VisibilityState::default(), LayoutOptions::default());
    assert!(controller.apply(Gesture::ExpandAll));
    assert_eq!(visible(&controller), vec!["goal-1", "strategy-1"]);
    assert_eq!(controller.ranks().get("strategy-1"), Some(&1));
}

#[test]
fn empty_document_renders_an_empty_frame() {
    let graph = map_case(&load_case("empty.json"), &MapperOptions::default());
    assert!(graph.nodes().is_empty());
    assert!(validate_graph(&graph).is_ok());

    let mut controller =
        DisclosureController::new(graph, VisibilityState::default(), LayoutOptions::default());
    assert!(!controller.apply(Gesture::ExpandAll));
    let frame = controller.frame();
    assert!(frame.nodes.is_empty());
    assert!(frame.edges.is_empty());
}

#[test]
fn disclosure_walkthrough_lays_out_revealed_levels() {
    let graph = map_case(&load_case("two_strategies.json"), &MapperOptions::default());
    let mut controller =
        DisclosureController::new(graph, VisibilityState::default(), LayoutOptions::default());
    assert_eq!(visible(&controller), vec!["goal-1"]);

    controller.apply(Gesture::Click(nid("goal-1")));
    assert_eq!(
        visible(&controller),
        vec!["goal-1", "strategy-1", "strategy-2"]
    );

    let frame = controller.frame();
    let y_of = |id: &str| {
        frame
            .nodes
            .iter()
            .find(|node| node.id.as_str() == id)
            .map(|node| node.position.y)
            .expect("node in frame")
    };
    assert!(y_of("strategy-1") > y_of("goal-1"));
    assert_eq!(y_of("strategy-1"), y_of("strategy-2"));

    controller.apply(Gesture::DoubleClick(nid("strategy-2")));
    assert!(controller.visible_ids().contains("evidence-2-1-1"));
    assert!(!controller.visible_ids().contains("claim-1-1"));
    assert_eq!(controller.ranks().get("evidence-2-1-1"), Some(&3));
}

#[test]
fn left_to_right_layout_grows_along_x() {
    let graph = map_case(&load_case("two_strategies.json"), &MapperOptions::default());
    let options = LayoutOptions {
        direction: Direction::LeftToRight,
        ..LayoutOptions::default()
    };
    let mut controller = DisclosureController::new(graph, VisibilityState::default(), options);
    controller.apply(Gesture::RevealPath(nid("evidence-1-1-1")));

    let graph = controller.graph();
    let x_of = |id: &str| graph.node(id).expect("node").position().x;
    assert!(x_of("goal-1") < x_of("strategy-1"));
    assert!(x_of("strategy-1") < x_of("claim-1-1"));
    assert!(x_of("claim-1-1") < x_of("evidence-1-1-1"));
}

#[test]
fn file_backed_visibility_survives_a_restart() {
    let tmp = TempDir::new("restart");
    let document = load_case("two_strategies.json");

    {
        let visibility = VisibilityState::with_store(
            VisibilityOptions::default(),
            Box::new(FileStore::new(tmp.path())),
            "case-11",
        );
        let graph = map_case(&document, &MapperOptions::default());
        let mut controller =
            DisclosureController::new(graph, visibility, LayoutOptions::default());
        controller.apply(Gesture::RevealPath(nid("evidence-2-1-1")));
    }

    let visibility = VisibilityState::with_store(
        VisibilityOptions::default(),
        Box::new(FileStore::new(tmp.path())),
        "case-11",
    );
    let graph = map_case(&document, &MapperOptions::default());
    let controller = DisclosureController::new(graph, visibility, LayoutOptions::default());
    assert_eq!(
        visible(&controller),
        vec!["claim-2-1", "evidence-2-1-1", "goal-1", "strategy-2"]
    );

    let other = VisibilityState::with_store(
        VisibilityOptions::default(),
        Box::new(FileStore::new(tmp.path())),
        "case-12",
    );
    assert!(other.map().is_empty());
}
