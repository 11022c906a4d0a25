//! Testing utilities for the Cirrus workspace
//!
//! A resolver harness that executes the real mapping templates against an
//! in-memory table, so behavioral tests exercise exactly the request and
//! response bodies a deployed resolver would run. Supports the Scan /
//! PutItem / DeleteItem subset the mappings emit, nothing more.

#![allow(missing_docs)]

use cirrus_schema::{Entity, ResolverMapping};
use serde_json::{json, Map, Value as JsonValue};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while interpreting a mapping template
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("template still references '{0}' after argument substitution")]
    UnsubstitutedVariable(String),

    #[error("rendered request is not valid JSON: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("unsupported store operation '{0}'")]
    UnsupportedOperation(String),

    #[error("request key does not contain field '{0}'")]
    MissingKey(String),

    #[error("unrecognized response template '{0}'")]
    UnknownResponseTemplate(String),
}

/// In-memory key-value table keyed like the backing store
#[derive(Debug, Default)]
pub struct InMemoryTable {
    rows: BTreeMap<String, JsonValue>,
}

impl InMemoryTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Executes resolver mappings against an [`InMemoryTable`]
pub struct ResolverHarness {
    entity: Entity,
    table: InMemoryTable,
    next_id: u64,
}

impl ResolverHarness {
    #[must_use]
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            table: InMemoryTable::default(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn table(&self) -> &InMemoryTable {
        &self.table
    }

    /// Run one mapping: substitute arguments into the request template,
    /// execute the store operation, then apply the response template.
    ///
    /// # Errors
    /// Returns [`HarnessError`] if the template references arguments that
    /// were not supplied or uses an operation outside the supported subset.
    pub fn execute(
        &mut self,
        mapping: &ResolverMapping,
        args: &JsonValue,
    ) -> Result<JsonValue, HarnessError> {
        let request = self.render_request(mapping.request_template().body(), args)?;
        let result = self.run_store_operation(&request)?;
        apply_response(mapping.response_template().body(), result)
    }

    fn render_request(&mut self, body: &str, args: &JsonValue) -> Result<JsonValue, HarnessError> {
        let mut rendered = body.to_string();

        if rendered.contains("$util.autoId()") {
            let id = self.generate_id();
            rendered = rendered.replace(
                "$util.dynamodb.toDynamoDBJson($util.autoId())",
                &JsonValue::String(id).to_string(),
            );
        }

        if let Some(map) = args.as_object() {
            for (name, value) in map {
                let pattern = format!("$util.dynamodb.toDynamoDBJson($ctx.args.{name})");
                rendered = rendered.replace(&pattern, &value.to_string());
            }
        }

        for marker in ["$util", "$ctx"] {
            if let Some(pos) = rendered.find(marker) {
                let tail: String = rendered[pos..].chars().take(40).collect();
                return Err(HarnessError::UnsubstitutedVariable(tail));
            }
        }

        Ok(serde_json::from_str(&rendered)?)
    }

    fn run_store_operation(&mut self, request: &JsonValue) -> Result<JsonValue, HarnessError> {
        let operation = request["operation"].as_str().unwrap_or("");
        match operation {
            "Scan" => {
                let items: Vec<JsonValue> = self.table.rows.values().cloned().collect();
                Ok(json!({ "items": items }))
            }
            "PutItem" => {
                let key = self.key_from(request)?;
                let mut item = Map::new();
                item.insert(
                    self.entity.id_field().to_string(),
                    JsonValue::String(key.clone()),
                );
                if let Some(attrs) = request["attributeValues"].as_object() {
                    for (name, value) in attrs {
                        item.insert(name.clone(), value.clone());
                    }
                }
                let item = JsonValue::Object(item);
                self.table.rows.insert(key, item.clone());
                Ok(item)
            }
            "DeleteItem" => {
                let key = self.key_from(request)?;
                // Absent keys delete successfully: idempotent by contract.
                Ok(self.table.rows.remove(&key).unwrap_or(JsonValue::Null))
            }
            other => Err(HarnessError::UnsupportedOperation(other.to_string())),
        }
    }

    fn key_from(&self, request: &JsonValue) -> Result<String, HarnessError> {
        request["key"][self.entity.id_field()]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| HarnessError::MissingKey(self.entity.id_field().to_string()))
    }

    fn generate_id(&mut self) -> String {
        self.next_id += 1;
        format!("generated-{:08}", self.next_id)
    }
}

fn apply_response(body: &str, result: JsonValue) -> Result<JsonValue, HarnessError> {
    match body {
        "$util.toJson($ctx.result.items)" => Ok(result["items"].clone()),
        "$util.toJson($ctx.result)" => Ok(result),
        other => Err(HarnessError::UnknownResponseTemplate(other.to_string())),
    }
}

/// Harness preloaded with the default `Item` entity
#[must_use]
pub fn item_harness() -> ResolverHarness {
    ResolverHarness::new(Entity::item())
}
