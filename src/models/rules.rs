//! Ingress rule bodies
//!
//! Rule shapes vary between ingress API versions and controllers, so a rule
//! is kept as a generic ordered key/value tree. Only the backend service name
//! is ever read out of it.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::ops::Deref;

/// One ingress path rule, carried opaquely
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleEntry(pub Mapping);

impl RuleEntry {
    /// Name of the service this rule routes to (`backend.service_name`)
    ///
    /// The `networking.k8s.io/v1` shape (`backend.service.name`) is accepted
    /// as well, for snapshots written by other tools.
    pub fn backend_service_name(&self) -> Option<&str> {
        let backend = self.0.get("backend")?;
        backend
            .get("service_name")
            .and_then(Value::as_str)
            .or_else(|| {
                backend
                    .get("service")
                    .and_then(|service| service.get("name"))
                    .and_then(Value::as_str)
            })
    }

    /// Look up a top-level field of the rule
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Mapping> for RuleEntry {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Ordered rule entries under one protocol key
///
/// Serialises as a plain sequence. Deserialisation also takes a mapping of
/// sequences (`http: {paths: [...]}`) and flattens it in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RuleList(pub Vec<RuleEntry>);

impl RuleList {
    pub fn new(entries: Vec<RuleEntry>) -> Self {
        Self(entries)
    }
}

impl Deref for RuleList {
    type Target = [RuleEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RuleList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleListVisitor;

        impl<'de> Visitor<'de> for RuleListVisitor {
            type Value = RuleList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of ingress rules or a mapping of rule lists")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(RuleList::default())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = seq.next_element::<RuleEntry>()? {
                    entries.push(entry);
                }
                Ok(RuleList(entries))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((_, group)) = map.next_entry::<Value, Option<Vec<RuleEntry>>>()? {
                    entries.extend(group.unwrap_or_default());
                }
                Ok(RuleList(entries))
            }
        }

        deserializer.deserialize_any(RuleListVisitor)
    }
}
