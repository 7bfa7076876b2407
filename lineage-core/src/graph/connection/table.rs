use std::collections::HashMap;

use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{ConnectionError, ConnectionTypeId};

/// `ConnectionType` is the registered mapping from a type identifier to the
/// identifier used when describing the same relationship from the other
/// token's perspective
///
/// Once registered, the mapping is immutable for the life of the registry
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct ConnectionType {
    pub(crate) id: ConnectionTypeId,
    pub(crate) reciprocal_id: ConnectionTypeId,

    #[serde(with = "ts_seconds")]
    pub(crate) created_at: DateTime<Utc>,
}

impl ConnectionType {
    pub fn new(id: ConnectionTypeId, reciprocal_id: ConnectionTypeId) -> Self {
        Self {
            id,
            reciprocal_id,
            created_at: Utc::now(),
        }
    }

    pub fn get_id(&self) -> ConnectionTypeId {
        self.id
    }

    pub fn get_reciprocal_id(&self) -> ConnectionTypeId {
        self.reciprocal_id
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }
}

impl ToJSON for ConnectionType {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for ConnectionType {
    type Error = ConnectionError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json = serde_json::to_vec(&self)
            .map_err(|err| ConnectionError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for ConnectionType {
    type Error = ConnectionError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let conn_type: ConnectionType = serde_json::from_slice(&value)
            .map_err(|err| ConnectionError::EntityError(err.to_string()))?;
        Ok(conn_type)
    }
}

/// `TypeTable` holds the type-to-reciprocal mapping
///
/// The mapping is directional: registering `(0 -> 2)` says nothing about type
/// `2`. A deployment wanting full symmetry registers `(2 -> 0)` separately,
/// and an unregistered reverse lookup fails with
/// [`ConnectionError::UnknownType`]
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    mappings: HashMap<ConnectionTypeId, ConnectionTypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        id: ConnectionTypeId,
        reciprocal_id: ConnectionTypeId,
    ) -> Result<(), ConnectionError> {
        if self.mappings.contains_key(&id) {
            return Err(ConnectionError::DuplicateType(id));
        }

        self.mappings.insert(id, reciprocal_id);
        Ok(())
    }

    pub fn reciprocal_of(&self, id: ConnectionTypeId) -> Result<ConnectionTypeId, ConnectionError> {
        self.mappings
            .get(&id)
            .copied()
            .ok_or(ConnectionError::UnknownType(id))
    }

    pub fn contains(&self, id: ConnectionTypeId) -> bool {
        self.mappings.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut table = TypeTable::new();

        let registered = table.register(ConnectionTypeId::from(0), ConnectionTypeId::from(2));
        assert!(!registered.is_err());

        let reciprocal = table.reciprocal_of(ConnectionTypeId::from(0));
        assert!(!reciprocal.is_err());
        assert_eq!(reciprocal.unwrap(), ConnectionTypeId::from(2))
    }

    #[test]
    fn test_register_duplicate() {
        let mut table = TypeTable::new();

        let _ = table
            .register(ConnectionTypeId::from(1), ConnectionTypeId::from(1))
            .unwrap();

        let registered = table.register(ConnectionTypeId::from(1), ConnectionTypeId::from(3));
        assert!(registered.is_err());
        assert_eq!(
            registered.unwrap_err(),
            ConnectionError::DuplicateType(ConnectionTypeId::from(1))
        )
    }

    #[test]
    fn test_reciprocal_is_not_auto_symmetric() {
        let mut table = TypeTable::new();

        let _ = table
            .register(ConnectionTypeId::from(0), ConnectionTypeId::from(2))
            .unwrap();

        let reverse = table.reciprocal_of(ConnectionTypeId::from(2));
        assert!(reverse.is_err());
        assert_eq!(
            reverse.unwrap_err(),
            ConnectionError::UnknownType(ConnectionTypeId::from(2))
        );

        let _ = table
            .register(ConnectionTypeId::from(2), ConnectionTypeId::from(0))
            .unwrap();

        let reverse = table.reciprocal_of(ConnectionTypeId::from(2));
        assert!(!reverse.is_err());
        assert_eq!(reverse.unwrap(), ConnectionTypeId::from(0))
    }

    #[test]
    fn test_type_entity_bytes_roundtrip() {
        let conn_type = ConnectionType::new(ConnectionTypeId::from(3), ConnectionTypeId::from(3));

        let json_bytes: Result<Vec<u8>, ConnectionError> = conn_type.clone().try_into();
        assert!(!json_bytes.is_err());

        let rebuilt = ConnectionType::try_from(json_bytes.unwrap());
        assert!(!rebuilt.is_err());

        let rebuilt_type = rebuilt.unwrap();
        assert_eq!(rebuilt_type.get_id(), conn_type.get_id());
        assert_eq!(rebuilt_type.get_reciprocal_id(), conn_type.get_reciprocal_id())
    }
}
