use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{
    ConnectionEntityAccessor, ConnectionError, ConnectionId, ConnectionTypeId, TokenId,
};

/// `Connection` is a single leg of a relationship pair: a directed, typed
/// edge from `parent_token_id` to `child_token_id`
///
/// Every connection is created together with exactly one companion record
/// that mirrors the edge from the other endpoint's perspective using the
/// reciprocal type; `pair_id` points at that companion. The only mutable
/// field is `is_active`, which flips from pending to active exactly once and
/// always together with the pair
///
/// The validity window (`start_date`..`end_date`) is caller-supplied
/// metadata. It is validated for ordering at creation and carried verbatim
/// afterwards
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct Connection {
    pub(crate) id: ConnectionId,
    pub(crate) parent_token_id: TokenId,
    pub(crate) child_token_id: TokenId,
    pub(crate) type_id: ConnectionTypeId,

    #[serde(with = "ts_seconds")]
    pub(crate) start_date: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    pub(crate) end_date: DateTime<Utc>,

    pub(crate) is_active: bool,
    pub(crate) pair_id: ConnectionId,

    #[serde(with = "ts_seconds")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl Connection {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ConnectionId,
        parent_token_id: TokenId,
        child_token_id: TokenId,
        type_id: ConnectionTypeId,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        is_active: bool,
        pair_id: ConnectionId,
    ) -> Self {
        Self {
            id,
            parent_token_id,
            child_token_id,
            type_id,
            start_date,
            end_date,
            is_active,
            pair_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// `activate` flips the consent state. Activation is one-way: there is no
    /// transition back to pending
    pub(crate) fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}

impl ToJSON for Connection {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for Connection {
    type Error = ConnectionError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json = serde_json::to_vec(&self)
            .map_err(|err| ConnectionError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for Connection {
    type Error = ConnectionError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let connection: Connection = serde_json::from_slice(&value)
            .map_err(|err| ConnectionError::EntityError(err.to_string()))?;
        Ok(connection)
    }
}

impl ConnectionEntityAccessor for Connection {
    fn get_id(&self) -> ConnectionId {
        self.id
    }

    fn get_parent_token_id(&self) -> TokenId {
        self.parent_token_id
    }

    fn get_child_token_id(&self) -> TokenId {
        self.child_token_id
    }

    fn get_type_id(&self) -> ConnectionTypeId {
        self.type_id
    }

    fn get_start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn get_end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    fn get_is_active(&self) -> bool {
        self.is_active
    }

    fn get_pair_id(&self) -> ConnectionId {
        self.pair_id
    }

    fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }

    fn get_updated_at(&self) -> DateTime<Utc> {
        self.updated_at.to_owned()
    }
}
