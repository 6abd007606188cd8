use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A per-method instrumentation rule pushed down by the configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicClassEntity {
    pub clazz_name: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub parameter_types: String,
    #[serde(default)]
    pub key_formula: Option<String>,
    /// Explicit signature override; derived from the other fields when absent.
    #[serde(default)]
    pub signature: Option<String>,
}

impl DynamicClassEntity {
    pub fn new(
        clazz_name: impl Into<String>,
        operation: impl Into<String>,
        parameter_types: impl Into<String>,
    ) -> Self {
        Self {
            clazz_name: clazz_name.into(),
            operation: operation.into(),
            parameter_types: parameter_types.into(),
            key_formula: None,
            signature: None,
        }
    }

    pub fn with_key_formula(mut self, formula: impl Into<String>) -> Self {
        self.key_formula = Some(formula.into());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Unique method identifier, used as the registry key.
    pub fn signature(&self) -> String {
        match &self.signature {
            Some(sig) => sig.clone(),
            None => format!("{}{}{}", self.clazz_name, self.operation, self.parameter_types),
        }
    }
}

/// Index entities by signature. When two entities share a signature the
/// earlier one in `entities` is kept.
pub fn index_by_signature(entities: &[DynamicClassEntity]) -> HashMap<String, DynamicClassEntity> {
    let mut index = HashMap::with_capacity(entities.len());
    for entity in entities {
        if let Entry::Vacant(slot) = index.entry(entity.signature()) {
            slot.insert(entity.clone());
        }
    }
    index
}
