// Labeled runtime entities (containers, volumes, networks)

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Resource kind; serializes to lowercase JSON (e.g. "container").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Container,
    Volume,
    Network,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Container => "container",
            Kind::Volume => "volume",
            Kind::Network => "network",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived, kind-specific enrichment. Rendered as a string map only when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityMeta {
    Container {
        compose_project: String,
        compose_service: String,
        image: String,
        instance: Option<String>,
    },
    Volume {
        driver: String,
        instance: Option<String>,
    },
    Network {
        driver: String,
        scope: String,
        instance: Option<String>,
    },
}

impl EntityMeta {
    pub fn kind(&self) -> Kind {
        match self {
            EntityMeta::Container { .. } => Kind::Container,
            EntityMeta::Volume { .. } => Kind::Volume,
            EntityMeta::Network { .. } => Kind::Network,
        }
    }

    pub fn instance(&self) -> Option<&str> {
        match self {
            EntityMeta::Container { instance, .. }
            | EntityMeta::Volume { instance, .. }
            | EntityMeta::Network { instance, .. } => instance.as_deref(),
        }
    }

    /// String-keyed view used for JSON output. `instance` is only present when set.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        match self {
            EntityMeta::Container {
                compose_project,
                compose_service,
                image,
                ..
            } => {
                map.insert("compose.project".to_string(), compose_project.clone());
                map.insert("compose.service".to_string(), compose_service.clone());
                map.insert("image".to_string(), image.clone());
            }
            EntityMeta::Volume { driver, .. } => {
                map.insert("driver".to_string(), driver.clone());
            }
            EntityMeta::Network { driver, scope, .. } => {
                map.insert("driver".to_string(), driver.clone());
                map.insert("scope".to_string(), scope.clone());
            }
        }
        if let Some(instance) = self.instance() {
            map.insert("instance".to_string(), instance.to_string());
        }
        map
    }
}

/// One runtime resource that carried at least one label under the selected prefixes.
///
/// The kind is the `meta` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEntity {
    pub id: String,
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub meta: EntityMeta,
}

impl LabeledEntity {
    pub fn kind(&self) -> Kind {
        self.meta.kind()
    }

    pub fn meta_map(&self) -> BTreeMap<String, String> {
        self.meta.to_map()
    }
}

impl Serialize for LabeledEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("LabeledEntity", 5)?;
        s.serialize_field("Kind", &self.kind())?;
        s.serialize_field("ID", &self.id)?;
        s.serialize_field("Name", &self.name)?;
        s.serialize_field("Labels", &self.labels)?;
        s.serialize_field("Meta", &self.meta_map())?;
        s.end()
    }
}
