// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The case document as delivered by the document API.
//!
//! Shape: `goals[] -> { context[], strategies[] -> { context[], property_claims[] -> { context[],
//! evidence[] } } }`. Every collection is optional and defaults to empty; unknown fields are kept
//! as free-form metadata.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CaseDocument {
    #[serde(default)]
    pub goals: Vec<GoalItem>,
}

/// Fields every case element carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ItemText {
    /// Identifier assigned by the document store, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ItemText {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GoalItem {
    #[serde(flatten)]
    pub text: ItemText,
    #[serde(default)]
    pub context: Vec<ContextItem>,
    #[serde(default)]
    pub strategies: Vec<StrategyItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct StrategyItem {
    #[serde(flatten)]
    pub text: ItemText,
    #[serde(default)]
    pub context: Vec<ContextItem>,
    #[serde(default)]
    pub property_claims: Vec<PropertyClaimItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PropertyClaimItem {
    #[serde(flatten)]
    pub text: ItemText,
    #[serde(default)]
    pub context: Vec<ContextItem>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceItem {
    #[serde(flatten)]
    pub text: ItemText,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ContextItem {
    #[serde(flatten)]
    pub text: ItemText,
}

/// JSON schema of the accepted case document.
pub fn case_document_schema() -> Value {
    let schema = schemars::schema_for!(CaseDocument);
    serde_json::to_value(&schema).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::{case_document_schema, CaseDocument};

    #[test]
    fn partial_documents_default_missing_collections() {
        let doc: CaseDocument = serde_json::from_str(
            r#"{
  "goals": [
    {
      "name": "G1",
      "strategies": [
        { "name": "S1" },
        { "name": "S2", "property_claims": [ { "name": "P1" } ] }
      ]
    }
  ]
}"#,
        )
        .unwrap();

        let goal = &doc.goals[0];
        assert_eq!(goal.text.name, "G1");
        assert!(goal.context.is_empty());
        assert!(goal.strategies[0].property_claims.is_empty());
        assert!(goal.strategies[1].property_claims[0].evidence.is_empty());
    }

    #[test]
    fn unknown_fields_are_kept_as_metadata() {
        let doc: CaseDocument = serde_json::from_str(
            r#"{
  "goals": [ { "id": 7, "name": "G", "keywords": ["safety"], "assumption": "A" } ]
}"#,
        )
        .unwrap();

        let text = &doc.goals[0].text;
        assert_eq!(text.id, Some(serde_json::json!(7)));
        assert_eq!(text.extra["keywords"], serde_json::json!(["safety"]));
        assert_eq!(text.extra["assumption"], serde_json::json!("A"));
    }

    #[test]
    fn empty_object_is_an_empty_case() {
        let doc: CaseDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.goals.is_empty());
    }

    #[test]
    fn schema_names_the_goal_collection() {
        let schema = case_document_schema();
        assert!(schema.to_string().contains("goals"));
    }
}
