use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::BundleError;

/// One GeoJSON-like feature. The `properties` object is guaranteed present;
/// every other member is carried through untouched and in its original order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    members: Map<String, Value>,
    properties: Map<String, Value>,
    /// Position of `properties` among the original members.
    properties_at: usize,
}

impl FeatureRecord {
    pub fn from_value(value: Value) -> Result<Self, BundleError> {
        match value {
            Value::Object(object) => Self::from_object(object),
            other => Err(BundleError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    pub fn from_object(object: Map<String, Value>) -> Result<Self, BundleError> {
        let mut members = Map::new();
        let mut properties = None;
        let mut properties_at = 0;

        for (name, value) in object {
            if name == "properties" {
                match value {
                    Value::Object(map) => {
                        properties = Some(map);
                        properties_at = members.len();
                    }
                    _ => return Err(BundleError::MissingProperties),
                }
            } else {
                members.insert(name, value);
            }
        }

        let properties = properties.ok_or(BundleError::MissingProperties)?;
        Ok(Self {
            members,
            properties,
            properties_at,
        })
    }

    /// Build a record from bare properties, as `{"type":"Feature","properties":{..}}`.
    pub fn with_properties(properties: Map<String, Value>) -> Self {
        let mut members = Map::new();
        members.insert("type".to_string(), Value::String("Feature".to_string()));
        Self {
            members,
            properties,
            properties_at: 1,
        }
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn geometry(&self) -> Option<&Value> {
        self.members.get("geometry")
    }

    pub fn id(&self) -> Option<&Value> {
        self.members.get("id")
    }

    /// Any non-`properties` member, e.g. `type` or a foreign member.
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    pub fn into_value(self) -> Value {
        let mut object = Map::new();
        let mut properties = Some(self.properties);
        for (i, (name, value)) in self.members.into_iter().enumerate() {
            if i == self.properties_at {
                if let Some(p) = properties.take() {
                    object.insert("properties".to_string(), Value::Object(p));
                }
            }
            object.insert(name, value);
        }
        if let Some(p) = properties {
            object.insert("properties".to_string(), Value::Object(p));
        }
        Value::Object(object)
    }

    /// Compact JSON matching `JSON.stringify` of the original object.
    pub fn to_json(&self) -> Result<String, BundleError> {
        crate::json::to_string(self)
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len() + 1))?;
        for (i, (name, value)) in self.members.iter().enumerate() {
            if i == self.properties_at {
                map.serialize_entry("properties", &self.properties)?;
            }
            map.serialize_entry(name, value)?;
        }
        if self.properties_at >= self.members.len() {
            map.serialize_entry("properties", &self.properties)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

impl TryFrom<Value> for FeatureRecord {
    type Error = BundleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
