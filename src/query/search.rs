// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::model::{Graph, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Substring,
    Regex,
    /// Ordered subsequence match, best score first.
    Fuzzy,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Regex => "regex",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// Text a node is matched against: id, name and description.
fn fields(node: &Node) -> impl Iterator<Item = &str> {
    [Some(node.id().as_str()), node.name(), node.description()]
        .into_iter()
        .flatten()
        .filter(|field| !field.is_empty())
}

/// Finds nodes whose id, name or description matches `needle`.
///
/// Substring and regex results keep graph order; fuzzy results are ranked best first (ties keep
/// graph order). A blank needle matches nothing.
pub fn search_nodes<'a>(
    graph: &'a Graph,
    needle: &str,
    mode: SearchMode,
    case_insensitive: bool,
) -> Result<Vec<&'a Node>, regex::Error> {
    if needle.trim().is_empty() {
        return Ok(Vec::new());
    }

    match mode {
        SearchMode::Substring => {
            let needle = fold(needle, case_insensitive);
            Ok(graph
                .nodes()
                .iter()
                .filter(|node| {
                    fields(node).any(|field| fold(field, case_insensitive).contains(&needle))
                })
                .collect())
        }
        SearchMode::Regex => {
            let regex = RegexBuilder::new(needle)
                .case_insensitive(case_insensitive)
                .build()?;
            Ok(graph
                .nodes()
                .iter()
                .filter(|node| fields(node).any(|field| regex.is_match(field)))
                .collect())
        }
        SearchMode::Fuzzy => {
            let needle = fold(needle.trim(), case_insensitive);
            let mut scored = graph
                .nodes()
                .iter()
                .filter_map(|node| {
                    fields(node)
                        .filter_map(|field| fuzzy_score(&needle, &fold(field, case_insensitive)))
                        .max()
                        .map(|score| (score, node))
                })
                .collect::<Vec<_>>();
            scored.sort_by(|(a, _), (b, _)| b.cmp(a));
            Ok(scored.into_iter().map(|(_, node)| node).collect())
        }
    }
}

fn fold(text: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        text.to_lowercase()
    } else {
        text.to_owned()
    }
}

struct SubsequenceMatch {
    first: usize,
    span: usize,
    adjacent: usize,
    at_boundary: bool,
}

/// Locates `needle` as an ordered subsequence of `haystack`, greedily from the left.
fn subsequence_match(needle: &str, haystack: &str) -> Option<SubsequenceMatch> {
    let mut wanted = needle.chars().peekable();
    let mut first = None;
    let mut previous: Option<usize> = None;
    let mut adjacent = 0usize;
    let mut at_boundary = false;
    let mut before: Option<char> = None;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = wanted.peek() else {
            break;
        };
        if ch == want {
            wanted.next();
            if first.is_none() {
                first = Some(idx);
                at_boundary = before.map_or(true, is_word_boundary);
            }
            if previous.is_some_and(|prev| prev + 1 == idx) {
                adjacent += 1;
            }
            previous = Some(idx);
        }
        before = Some(ch);
    }

    if wanted.peek().is_some() {
        return None;
    }
    let first = first?;
    let last = previous.unwrap_or(first);
    Some(SubsequenceMatch {
        first,
        span: last - first + 1,
        adjacent,
        at_boundary,
    })
}

fn is_word_boundary(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '_' | ':' | '/' | '.')
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let found = subsequence_match(needle, haystack)?;
    let similarity = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (similarity * 1000.0).round() as i64;
    score += found.adjacent as i64 * 40;
    score -= found.span as i64;
    score -= found.first as i64 / 4;
    if found.at_boundary {
        score += 150;
    }
    if haystack.contains(needle) {
        score += 2000;
    }
    Some(score)
}
