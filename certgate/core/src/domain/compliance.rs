// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Compliance Statements
//!
//! Vendor self-attestations against named regulatory frameworks. Keys are
//! stored exactly as the vendor wrote them; lookups are case-insensitive.
//!
//! Parsing is total: absent keys, non-boolean values, and non-object payloads
//! all collapse to "not attested".

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "BTreeMap<String, bool>")]
pub struct ComplianceStatements {
    attestations: BTreeMap<String, bool>,
}

impl ComplianceStatements {
    /// Statements with every framework unattested
    pub fn none() -> Self {
        Self::default()
    }

    /// Build statements from an arbitrary JSON value.
    ///
    /// A JSON string is parsed once more, so payloads that were stored as
    /// stringified objects are accepted too.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let mut statements = Self::default();
                for (key, raw) in map {
                    if let Value::Bool(attested) = raw {
                        statements.set(key, *attested);
                    }
                }
                statements
            }
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(inner @ Value::Object(_)) => Self::from_json(&inner),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    /// Parse statements from raw JSON text; unparsable text yields all false
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str::<Value>(raw)
            .map(|value| Self::from_json(&value))
            .unwrap_or_default()
    }

    /// Record an attestation under the key as given. An existing key that
    /// differs only in case is replaced.
    pub fn set(&mut self, framework: &str, attested: bool) {
        let key = framework.trim();
        if key.is_empty() {
            return;
        }
        self.attestations.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
        self.attestations.insert(key.to_string(), attested);
    }

    pub fn with(mut self, framework: &str, attested: bool) -> Self {
        self.set(framework, attested);
        self
    }

    /// Stated value for a framework, matched case-insensitively
    pub fn get(&self, framework: &str) -> Option<bool> {
        let framework = framework.trim();
        self.attestations
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(framework))
            .map(|(_, attested)| *attested)
    }

    pub fn hipaa(&self) -> bool {
        self.is_attested("hipaa")
    }

    pub fn nist(&self) -> bool {
        self.is_attested("nist")
    }

    pub fn fda(&self) -> bool {
        self.is_attested("fda")
    }

    pub fn iso(&self) -> bool {
        self.is_attested("iso")
    }

    /// Whether the vendor attested to the named framework
    pub fn is_attested(&self, framework: &str) -> bool {
        self.get(framework).unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.attestations.is_empty()
    }

    /// Framework -> attestation map with the vendor's original keys
    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.attestations.clone()
    }
}

impl From<Value> for ComplianceStatements {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<ComplianceStatements> for BTreeMap<String, bool> {
    fn from(statements: ComplianceStatements) -> Self {
        statements.to_map()
    }
}
