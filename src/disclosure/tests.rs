// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use super::{DisclosureController, Gesture};
use crate::layout::LayoutOptions;
use crate::mapper::{map_case, MapperOptions};
use crate::model::fixtures::{nid, two_strategy_case};
use crate::model::{Graph, NodeId};
use crate::query::SearchMode;
use crate::store::{MemoryStore, VisibilityMap, VisibilityStore};
use crate::visibility::{VisibilityOptions, VisibilityState};

fn mapped() -> Graph {
    map_case(&two_strategy_case(), &MapperOptions::default())
}

fn controller() -> DisclosureController {
    DisclosureController::new(
        mapped(),
        VisibilityState::default(),
        LayoutOptions::default(),
    )
}

fn visible(controller: &DisclosureController) -> Vec<String> {
    controller
        .visible_ids()
        .into_iter()
        .map(NodeId::into_string)
        .collect()
}

fn set(ids: &[&str]) -> Vec<String> {
    ids.iter()
        .map(|id| (*id).to_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

const ALL: [&str; 7] = [
    "goal-1",
    "strategy-1",
    "claim-1-1",
    "evidence-1-1-1",
    "strategy-2",
    "claim-2-1",
    "evidence-2-1-1",
];

#[test]
fn starts_with_only_the_root_revealed() {
    let controller = controller();
    assert_eq!(visible(&controller), set(&["goal-1"]));

    let frame = controller.frame();
    assert_eq!(frame.nodes.len(), 7);
    assert_eq!(frame.edges.len(), 6);
    assert_eq!(frame.visible_node_ids(), vec![&nid("goal-1")]);
    assert!(frame.edges.iter().all(|edge| !edge.visible));
    assert_eq!(controller.ranks().get("goal-1"), Some(&0));
}

#[test]
fn click_reveals_children_then_hides_descendants() {
    let mut controller = controller();

    assert!(controller.apply(Gesture::Click(nid("goal-1"))));
    assert_eq!(
        visible(&controller),
        set(&["goal-1", "strategy-1", "strategy-2"])
    );
    assert_eq!(controller.ranks().get("strategy-2"), Some(&1));

    assert!(controller.apply(Gesture::Click(nid("strategy-1"))));
    assert!(controller.visible_ids().contains("claim-1-1"));

    assert!(controller.apply(Gesture::Click(nid("goal-1"))));
    assert_eq!(visible(&controller), set(&["goal-1"]));
}

#[test]
fn clicking_a_leaf_changes_nothing_once_it_is_shown() {
    let mut controller = controller();
    controller.apply(Gesture::DoubleClick(nid("goal-1")));
    assert!(!controller.apply(Gesture::Click(nid("evidence-1-1-1"))));
}

#[test]
fn double_click_reveals_the_subtree() {
    let mut controller = controller();
    assert!(controller.apply(Gesture::DoubleClick(nid("strategy-2"))));
    assert_eq!(
        visible(&controller),
        set(&["goal-1", "strategy-2", "claim-2-1", "evidence-2-1-1"])
    );

    assert!(controller.apply(Gesture::DoubleClick(nid("goal-1"))));
    assert_eq!(visible(&controller), set(&ALL));
}

#[test]
fn hidden_nodes_keep_their_mapped_position() {
    let graph = mapped();
    let mut controller = controller();
    controller.apply(Gesture::Click(nid("goal-1")));

    for id in ["claim-1-1", "evidence-2-1-1"] {
        assert_eq!(
            controller.graph().node(id).unwrap().position(),
            graph.node(id).unwrap().position(),
            "{id}"
        );
    }
}

#[test]
fn reveal_path_and_focus() {
    let mut controller = controller();

    assert!(controller.apply(Gesture::RevealPath(nid("evidence-1-1-1"))));
    assert_eq!(
        visible(&controller),
        set(&["goal-1", "strategy-1", "claim-1-1", "evidence-1-1-1"])
    );

    controller.apply(Gesture::ExpandAll);
    assert!(controller.apply(Gesture::Focus(nid("strategy-1"))));
    assert_eq!(
        visible(&controller),
        set(&["goal-1", "strategy-1", "claim-1-1"])
    );
}

#[test]
fn expand_all_and_collapse_all_keep_the_root() {
    let mut controller = controller();

    assert!(controller.apply(Gesture::ExpandAll));
    assert_eq!(visible(&controller), set(&ALL));

    assert!(controller.apply(Gesture::CollapseAll));
    assert_eq!(visible(&controller), set(&["goal-1"]));
}

#[test]
fn expand_all_is_limited_to_rendered_ids() {
    let mut controller = controller();
    controller.sync_rendered(["goal-1", "strategy-1"].map(nid));

    controller.apply(Gesture::ExpandAll);
    assert_eq!(visible(&controller), set(&["goal-1", "strategy-1"]));
}

#[test]
fn search_reveals_the_path_to_the_best_match() {
    let mut controller = controller();

    assert!(controller.apply(Gesture::Search {
        needle: "audit".to_owned(),
        mode: SearchMode::Substring,
    }));
    assert_eq!(
        visible(&controller),
        set(&["goal-1", "strategy-2", "claim-2-1", "evidence-2-1-1"])
    );
}

#[test]
fn invalid_or_unknown_targets_are_no_ops() {
    let mut controller = controller();
    let before = controller.frame();

    assert!(!controller.apply(Gesture::Search {
        needle: "(".to_owned(),
        mode: SearchMode::Regex,
    }));
    assert!(!controller.apply(Gesture::Search {
        needle: "no such thing".to_owned(),
        mode: SearchMode::Substring,
    }));
    for gesture in [
        Gesture::Click(nid("ghost")),
        Gesture::DoubleClick(nid("ghost")),
        Gesture::RevealPath(nid("ghost")),
        Gesture::Focus(nid("ghost")),
    ] {
        assert!(!controller.apply(gesture));
    }
    assert_eq!(controller.frame(), before);
    assert!(controller.visibility().map().get("ghost").is_none());
}

#[test]
fn frame_edges_are_visible_only_between_visible_nodes() {
    let mut controller = controller();
    controller.apply(Gesture::Click(nid("goal-1")));

    let frame = controller.frame();
    let shown = frame
        .edges
        .iter()
        .filter(|edge| edge.visible)
        .map(|edge| edge.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(shown, vec!["goal-1-strategy-1", "goal-1-strategy-2"]);

    let goal = frame.nodes.iter().find(|node| node.id.as_str() == "goal-1").unwrap();
    assert_eq!((goal.width, goal.height), (260.0, 110.0));
    assert_eq!(goal.name.as_deref(), Some("System is safe"));
}

#[test]
fn queued_bulk_gestures_coalesce_until_tick() {
    let mut controller = controller();
    let start = Instant::now();

    assert!(!controller.queue(Gesture::CollapseAll, start));
    assert!(!controller.queue(Gesture::ExpandAll, start + Duration::from_millis(50)));
    assert_eq!(
        controller.next_deadline(),
        Some(start + Duration::from_millis(150))
    );

    assert!(!controller.tick(start + Duration::from_millis(120)));
    assert_eq!(visible(&controller), set(&["goal-1"]));

    assert!(controller.tick(start + Duration::from_millis(150)));
    assert_eq!(visible(&controller), set(&ALL));
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn reset_drops_a_queued_bulk_gesture() {
    let mut controller = controller();
    let start = Instant::now();

    controller.queue(Gesture::ExpandAll, start);
    assert!(!controller.apply(Gesture::Reset));
    assert_eq!(controller.next_deadline(), None);

    assert!(!controller.tick(start + Duration::from_millis(200)));
    assert_eq!(visible(&controller), set(&["goal-1"]));
}

#[test]
fn queue_applies_point_gestures_immediately() {
    let mut controller = controller();
    assert!(controller.queue(Gesture::Click(nid("goal-1")), Instant::now()));
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn reset_returns_to_the_default_view_and_clears_storage() {
    let store = MemoryStore::new();
    let visibility =
        VisibilityState::with_store(VisibilityOptions::default(), Box::new(store.clone()), "doc");
    let mut controller = DisclosureController::new(mapped(), visibility, LayoutOptions::default());
    controller.apply(Gesture::ExpandAll);
    assert_eq!(store.load("doc").unwrap().map(|map| map.len()), Some(7));

    assert!(controller.apply(Gesture::Reset));
    assert_eq!(visible(&controller), set(&["goal-1"]));
    let saved = store.load("doc").unwrap().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved.get("goal-1"), Some(&true));
}

#[test]
fn restored_visibility_is_used_as_is() {
    let store = MemoryStore::new();
    let mut map = VisibilityMap::new();
    map.insert(nid("goal-1"), true);
    map.insert(nid("strategy-2"), true);
    store.save("doc", &map).unwrap();

    let visibility =
        VisibilityState::with_store(VisibilityOptions::default(), Box::new(store), "doc");
    let controller = DisclosureController::new(mapped(), visibility, LayoutOptions::default());

    assert_eq!(visible(&controller), set(&["goal-1", "strategy-2"]));
}
