use crate::geo::Coordinate;
use itertools::Itertools;
use std::{collections::BTreeMap, fmt};

/// One business-location entry.
///
/// The properties are kept ordered by their attribute name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub key: Option<Key>,
    properties: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: Key) -> Self {
        Self {
            key: Some(key),
            properties: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Insert a property and return the previous value, if any.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.properties.insert(name.into(), value)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_properties(self) -> impl Iterator<Item = (String, Value)> {
        self.properties.into_iter()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let properties = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            key: None,
            properties,
        }
    }
}

/// A property value together with its index flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub kind: ValueKind,
    /// Tells the destination store not to build an index for this value.
    pub exclude_from_indexes: bool,
}

impl Value {
    pub const fn indexed(kind: ValueKind) -> Self {
        Self {
            kind,
            exclude_from_indexes: false,
        }
    }

    pub const fn unindexed(kind: ValueKind) -> Self {
        Self {
            kind,
            exclude_from_indexes: true,
        }
    }

    pub fn null() -> Self {
        Self::indexed(ValueKind::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    /// The plain text of a scalar value.
    ///
    /// Timestamps render their RFC 3339 text.
    /// Returns `None` for null, nested, geo point, key and blob values.
    pub fn scalar_text(&self) -> Option<String> {
        match &self.kind {
            ValueKind::String(s) | ValueKind::Timestamp(s) => Some(s.clone()),
            ValueKind::Integer(i) => Some(i.to_string()),
            ValueKind::Double(d) => Some(d.to_string()),
            ValueKind::Boolean(b) => Some(b.to_string()),
            ValueKind::Null
            | ValueKind::Entity(_)
            | ValueKind::Array(_)
            | ValueKind::GeoPoint(_)
            | ValueKind::Key(_)
            | ValueKind::Blob(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    /// RFC 3339 text, kept as received.
    Timestamp(String),
    GeoPoint(Coordinate),
    Key(Key),
    /// Base64 encoded bytes.
    Blob(String),
    Entity(Box<Record>),
    Array(Vec<Value>),
}

impl From<ValueKind> for Value {
    fn from(kind: ValueKind) -> Self {
        Self::indexed(kind)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        ValueKind::String(s.to_owned()).into()
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        ValueKind::String(s).into()
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        ValueKind::Integer(i).into()
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        ValueKind::Double(d).into()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        ValueKind::Boolean(b).into()
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        ValueKind::Entity(Box::new(r)).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Key {
    pub partition: PartitionId,
    pub path: Vec<PathElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionId {
    pub project_id: String,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    pub kind: String,
    /// `None` for incomplete keys.
    pub id: Option<KeyId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyId {
    Id(i64),
    Name(String),
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self
            .path
            .iter()
            .map(|p| match &p.id {
                Some(id) => format!("{}:{id}", p.kind),
                None => p.kind.clone(),
            })
            .join("/");
        write!(f, "{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_value() {
        let mut r = Record::new();
        assert!(r.set("a", Value::from(1_i64)).is_none());
        let prev = r.set("a", Value::from("x")).unwrap();
        assert_eq!(prev.kind, ValueKind::Integer(1));
        assert_eq!(r.get("a").unwrap().as_str(), Some("x"));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn properties_are_ordered_by_name() {
        let r: Record = [("zip", "1"), ("city", "2"), ("line", "3")]
            .into_iter()
            .collect();
        let names: Vec<_> = r.property_names().collect();
        assert_eq!(names, vec!["city", "line", "zip"]);
    }

    #[test]
    fn scalar_text_of_values() {
        assert_eq!(Value::from("a").scalar_text().unwrap(), "a");
        assert_eq!(Value::from(62701_i64).scalar_text().unwrap(), "62701");
        assert_eq!(Value::from(true).scalar_text().unwrap(), "true");
        assert_eq!(Value::from(1.5).scalar_text().unwrap(), "1.5");
        assert!(Value::null().scalar_text().is_none());
        assert!(Value::from(Record::new()).scalar_text().is_none());
    }

    #[test]
    fn scalar_text_of_special_values() {
        let ts = Value::indexed(ValueKind::Timestamp("2017-01-01T00:00:00Z".into()));
        assert_eq!(ts.scalar_text().unwrap(), "2017-01-01T00:00:00Z");
        let point = Value::indexed(ValueKind::GeoPoint(Coordinate::new(1.0, 2.0)));
        assert!(point.scalar_text().is_none());
        assert!(Value::indexed(ValueKind::Key(Key::default()))
            .scalar_text()
            .is_none());
        assert!(Value::indexed(ValueKind::Blob("AAE=".into()))
            .scalar_text()
            .is_none());
    }

    #[test]
    fn display_key_path() {
        let key = Key {
            partition: PartitionId::default(),
            path: vec![
                PathElement {
                    kind: "State".into(),
                    id: Some(KeyId::Name("IL".into())),
                },
                PathElement {
                    kind: "Provider".into(),
                    id: Some(KeyId::Id(42)),
                },
            ],
        };
        assert_eq!(key.to_string(), r#"State:"IL"/Provider:42"#);
    }
}
