use super::*;
use geoenrich_entities::{geo::Coordinate, record as e};

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid integer value: {0}")]
    Integer(String),
    #[error("Invalid numeric key id: {0}")]
    KeyId(String),
    #[error("Path element of kind '{0}' has both an id and a name")]
    AmbiguousKeyId(String),
}

impl From<e::Record> for Entity {
    fn from(mut from: e::Record) -> Self {
        let key = from.key.take().map(Key::from);
        let properties = from
            .into_properties()
            .map(|(name, value)| (name, value.into()))
            .collect();
        Self { key, properties }
    }
}

impl TryFrom<Entity> for e::Record {
    type Error = ConversionError;
    fn try_from(from: Entity) -> Result<Self, Self::Error> {
        let Entity { key, properties } = from;
        let mut record = e::Record::new();
        record.key = key.map(e::Key::try_from).transpose()?;
        for (name, value) in properties {
            record.set(name, value.try_into()?);
        }
        Ok(record)
    }
}

impl From<e::Key> for Key {
    fn from(from: e::Key) -> Self {
        let e::Key { partition, path } = from;
        let e::PartitionId {
            project_id,
            namespace,
        } = partition;
        let partition_id = if project_id.is_empty() && namespace.is_none() {
            None
        } else {
            Some(PartitionId {
                project_id,
                namespace_id: namespace,
            })
        };
        Self {
            partition_id,
            path: path.into_iter().map(PathElement::from).collect(),
        }
    }
}

impl TryFrom<Key> for e::Key {
    type Error = ConversionError;
    fn try_from(from: Key) -> Result<Self, Self::Error> {
        let Key { partition_id, path } = from;
        let partition = partition_id
            .map(|p| e::PartitionId {
                project_id: p.project_id,
                namespace: p.namespace_id,
            })
            .unwrap_or_default();
        let path = path
            .into_iter()
            .map(e::PathElement::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Self { partition, path })
    }
}

impl From<e::PathElement> for PathElement {
    fn from(from: e::PathElement) -> Self {
        let e::PathElement { kind, id } = from;
        let (id, name) = match id {
            Some(e::KeyId::Id(id)) => (Some(id.to_string()), None),
            Some(e::KeyId::Name(name)) => (None, Some(name)),
            None => (None, None),
        };
        Self { kind, id, name }
    }
}

impl TryFrom<PathElement> for e::PathElement {
    type Error = ConversionError;
    fn try_from(from: PathElement) -> Result<Self, Self::Error> {
        let PathElement { kind, id, name } = from;
        let id = match (id, name) {
            (Some(_), Some(_)) => return Err(ConversionError::AmbiguousKeyId(kind)),
            (Some(id), None) => Some(e::KeyId::Id(
                id.parse().map_err(|_| ConversionError::KeyId(id))?,
            )),
            (None, Some(name)) => Some(e::KeyId::Name(name)),
            (None, None) => None,
        };
        Ok(Self { kind, id })
    }
}

impl From<e::Value> for Value {
    fn from(from: e::Value) -> Self {
        use e::ValueKind as K;
        let e::Value {
            kind,
            exclude_from_indexes,
        } = from;
        let value_type = match kind {
            K::Null => ValueType::NullValue(()),
            K::Boolean(b) => ValueType::BooleanValue(b),
            K::Integer(i) => ValueType::IntegerValue(i.to_string()),
            K::Double(d) => ValueType::DoubleValue(d),
            K::String(s) => ValueType::StringValue(s),
            K::Timestamp(t) => ValueType::TimestampValue(t),
            K::GeoPoint(Coordinate { lat, lng }) => ValueType::GeoPointValue(LatLng {
                latitude: lat,
                longitude: lng,
            }),
            K::Key(key) => ValueType::KeyValue(key.into()),
            K::Blob(b) => ValueType::BlobValue(b),
            K::Entity(r) => ValueType::EntityValue((*r).into()),
            K::Array(values) => ValueType::ArrayValue(ArrayValue {
                values: values.into_iter().map(Value::from).collect(),
            }),
        };
        Self {
            value_type,
            exclude_from_indexes,
        }
    }
}

impl TryFrom<Value> for e::Value {
    type Error = ConversionError;
    fn try_from(from: Value) -> Result<Self, Self::Error> {
        use e::ValueKind as K;
        let Value {
            value_type,
            exclude_from_indexes,
        } = from;
        let kind = match value_type {
            ValueType::NullValue(()) => K::Null,
            ValueType::BooleanValue(b) => K::Boolean(b),
            ValueType::IntegerValue(i) => {
                K::Integer(i.parse().map_err(|_| ConversionError::Integer(i))?)
            }
            ValueType::DoubleValue(d) => K::Double(d),
            ValueType::StringValue(s) => K::String(s),
            ValueType::TimestampValue(t) => K::Timestamp(t),
            ValueType::GeoPointValue(LatLng {
                latitude,
                longitude,
            }) => K::GeoPoint(Coordinate::new(latitude, longitude)),
            ValueType::KeyValue(key) => K::Key(key.try_into()?),
            ValueType::BlobValue(b) => K::Blob(b),
            ValueType::EntityValue(entity) => K::Entity(Box::new(entity.try_into()?)),
            ValueType::ArrayValue(ArrayValue { values }) => K::Array(
                values
                    .into_iter()
                    .map(e::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
        };
        Ok(Self {
            kind,
            exclude_from_indexes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_record_with_key_and_flags() {
        let mut record = e::Record::with_key(e::Key {
            partition: e::PartitionId {
                project_id: "demo".into(),
                namespace: None,
            },
            path: vec![e::PathElement {
                kind: "Provider".into(),
                id: Some(e::KeyId::Id(7)),
            }],
        });
        record.set("zip", e::Value::from(62701_i64));
        record.set("lat", e::Value::unindexed(e::ValueKind::Double(1.0)));

        let entity = Entity::from(record.clone());
        let key = entity.key.as_ref().unwrap();
        assert_eq!(key.path[0].id.as_deref(), Some("7"));
        assert!(key.path[0].name.is_none());
        assert_eq!(
            entity.properties["zip"].value_type,
            ValueType::IntegerValue("62701".into())
        );
        assert!(entity.properties["lat"].exclude_from_indexes);

        let back = e::Record::try_from(entity).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn keep_timestamp_geo_point_key_and_blob_values() {
        let json = r#"{
            "properties": {
                "last_update_date": { "timestampValue": "2017-01-01T00:00:00Z" },
                "loc": { "geoPointValue": { "latitude": 39.78, "longitude": -89.65 } },
                "parent": { "keyValue": { "path": [ { "kind": "Registry", "id": "5" } ] } },
                "raw": { "blobValue": "AAE=", "excludeFromIndexes": true }
            }
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        let record = e::Record::try_from(entity.clone()).unwrap();
        assert_eq!(
            record.get("last_update_date").unwrap().kind,
            e::ValueKind::Timestamp("2017-01-01T00:00:00Z".into())
        );
        assert_eq!(
            record.get("loc").unwrap().kind,
            e::ValueKind::GeoPoint(Coordinate::new(39.78, -89.65))
        );
        match &record.get("parent").unwrap().kind {
            e::ValueKind::Key(key) => assert_eq!(key.path[0].id, Some(e::KeyId::Id(5))),
            x => panic!("unexpected value {x:?}"),
        }
        assert!(record.get("raw").unwrap().exclude_from_indexes);
        assert_eq!(Entity::from(record), entity);
    }

    #[test]
    fn reject_invalid_integer() {
        let v = Value {
            value_type: ValueType::IntegerValue("12a".into()),
            exclude_from_indexes: false,
        };
        assert!(matches!(
            e::Value::try_from(v),
            Err(ConversionError::Integer(i)) if i == "12a"
        ));
    }

    #[test]
    fn reject_path_element_with_id_and_name() {
        let p = PathElement {
            kind: "Provider".into(),
            id: Some("1".into()),
            name: Some("x".into()),
        };
        assert!(matches!(
            e::PathElement::try_from(p),
            Err(ConversionError::AmbiguousKeyId(_))
        ));
    }

    #[test]
    fn omit_empty_partition() {
        let key = Key::from(e::Key {
            partition: e::PartitionId::default(),
            path: vec![],
        });
        assert!(key.partition_id.is_none());
    }
}
