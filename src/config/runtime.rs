use super::entity::{index_by_signature, DynamicClassEntity};
use super::properties::{PropertyStore, AGENT_VERSION, DURING_WORK, IP_VALIDATE};
use crate::limiter::RateLimiter;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Full parameter set of a configuration refresh. Nothing is validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    pub enable_debug: bool,
    pub service_name: String,
    pub entities: Vec<DynamicClassEntity>,
    pub properties: HashMap<String, String>,
    pub exclude_service_operations: HashSet<String>,
    pub dubbo_stream_replay_threshold: i32,
    pub record_rate: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    RateDisabled,
    OutsideWorkingHours,
    IpNotValidated,
    RateLimited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDecision {
    Record,
    Skip(SkipReason),
}

impl RecordDecision {
    pub fn is_skip(&self) -> bool {
        matches!(self, RecordDecision::Skip(_))
    }
}

/// One immutable configuration snapshot. Refreshing means building a new one.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    enable_debug: bool,
    service_name: String,
    entities: Vec<DynamicClassEntity>,
    properties: PropertyStore,
    exclude_service_operations: HashSet<String>,
    dubbo_stream_replay_threshold: i32,
    record_rate: i32,
    record_version: Option<String>,
    dynamic_entity_map: HashMap<String, DynamicClassEntity>,
}

impl RuntimeConfig {
    pub fn new(update: ConfigUpdate) -> Self {
        let properties = PropertyStore::new(update.properties);
        let record_version = properties.get_string(AGENT_VERSION).map(str::to_string);
        let dynamic_entity_map = index_by_signature(&update.entities);

        Self {
            enable_debug: update.enable_debug,
            service_name: update.service_name,
            entities: update.entities,
            properties,
            exclude_service_operations: update.exclude_service_operations,
            dubbo_stream_replay_threshold: update.dubbo_stream_replay_threshold,
            record_rate: update.record_rate,
            record_version,
            dynamic_entity_map,
        }
    }

    pub fn is_enable_debug(&self) -> bool {
        self.enable_debug
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn dynamic_class_entities(&self) -> &[DynamicClassEntity] {
        &self.entities
    }

    pub fn exclude_service_operations(&self) -> &HashSet<String> {
        &self.exclude_service_operations
    }

    pub fn dubbo_stream_replay_threshold(&self) -> i32 {
        self.dubbo_stream_replay_threshold
    }

    pub fn record_rate(&self) -> i32 {
        self.record_rate
    }

    pub fn record_version(&self) -> Option<&str> {
        self.record_version.as_deref()
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    pub fn dynamic_entity(&self, signature: &str) -> Option<&DynamicClassEntity> {
        self.dynamic_entity_map.get(signature)
    }

    pub fn dynamic_entity_map(&self) -> &HashMap<String, DynamicClassEntity> {
        &self.dynamic_entity_map
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.properties.get_string(name)
    }

    pub fn get_string_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.properties.get_string_or(name, default)
    }

    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.properties.get_bool(name, default)
    }

    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.properties.get_int(name, default)
    }

    pub fn get_long(&self, name: &str, default: i64) -> i64 {
        self.properties.get_long(name, default)
    }

    pub fn get_double(&self, name: &str, default: f64) -> f64 {
        self.properties.get_double(name, default)
    }

    /// Evaluate the recording gates for `path`, in order:
    ///
    /// 1. debug mode always records;
    /// 2. a non-positive record rate never records;
    /// 3. outside the working window;
    /// 4. local IP not validated;
    /// 5. the path's rate-limit budget.
    ///
    /// The limiter is only charged once every earlier gate has passed.
    pub fn record_decision<L>(&self, path: &str, limiter: &L) -> RecordDecision
    where
        L: RateLimiter + ?Sized,
    {
        let decision = if self.enable_debug {
            RecordDecision::Record
        } else if self.record_rate <= 0 {
            RecordDecision::Skip(SkipReason::RateDisabled)
        } else if !self.get_bool(DURING_WORK, false) {
            RecordDecision::Skip(SkipReason::OutsideWorkingHours)
        } else if !self.get_bool(IP_VALIDATE, false) {
            RecordDecision::Skip(SkipReason::IpNotValidated)
        } else if !limiter.acquire(path) {
            RecordDecision::Skip(SkipReason::RateLimited)
        } else {
            RecordDecision::Record
        };
        trace!(path, ?decision, "record decision");
        decision
    }

    /// True when `path` must not be recorded under `limiter`.
    pub fn invalid_record_with<L>(&self, path: &str, limiter: &L) -> bool
    where
        L: RateLimiter + ?Sized,
    {
        self.record_decision(path, limiter).is_skip()
    }
}

impl From<ConfigUpdate> for RuntimeConfig {
    fn from(update: ConfigUpdate) -> Self {
        Self::new(update)
    }
}
