use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::{self, Value};

use prople_jsonrpc_client::types::{ExecutorError, RpcValue};

use lineage_core::graph::connection::types::{
    ConnectionId, ConnectionTypeId, CreateConnectionParams, OwnerId, TokenId,
};

use crate::common::types::CommonError;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(tag = "param", content = "payload")]
pub enum Agent {
    OwnerOf { token_id: TokenId },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(tag = "param", content = "payload")]
pub enum Domain {
    AddConnectionType {
        caller: OwnerId,
        type_id: ConnectionTypeId,
        reciprocal_id: ConnectionTypeId,
    },
    AddConnection {
        caller: OwnerId,
        params: CreateConnectionParams,
    },
    ApproveConnection {
        caller: OwnerId,
        token_id: TokenId,
        type_id: ConnectionTypeId,
    },
    GetConnection {
        id: ConnectionId,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(tag = "type", content = "payload")]
pub enum Param {
    Agent(Agent),
    Domain(Domain),
}

impl RpcValue for Param {
    fn build_serde_value(&self) -> Result<Value, ExecutorError> {
        serde_json::to_value(self).map_err(|err| ExecutorError::BuildValueError(err.to_string()))
    }
}

impl TryFrom<Value> for Param {
    type Error = CommonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let param: Result<Param, CommonError> =
            serde_json::from_value(value).map_err(|err| CommonError::JSONError(err.to_string()));
        param
    }
}

/// `ConnectionPairResponse` is the payload returned by `add_connection`: the
/// ids of the two created legs, left (as proposed) first
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct ConnectionPairResponse {
    pub left_id: ConnectionId,
    pub right_id: ConnectionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rst_common::standard::serde_json;

    #[test]
    fn test_build_agent_serde_json_str() {
        let param = Param::Agent(Agent::OwnerOf {
            token_id: TokenId::from(2),
        });
        let try_json = serde_json::to_string(&param);
        assert!(!try_json.is_err());

        let expected = r#"{"type":"Agent","payload":{"param":"OwnerOf","payload":{"token_id":2}}}"#;
        assert_eq!(expected, try_json.unwrap())
    }

    #[test]
    fn test_build_domain_serde_json_str() {
        let param = Param::Domain(Domain::ApproveConnection {
            caller: OwnerId::from("did:lineage:bob"),
            token_id: TokenId::from(2),
            type_id: ConnectionTypeId::from(0),
        });
        let try_json = serde_json::to_string(&param);
        assert!(!try_json.is_err());

        let expected = r#"{"type":"Domain","payload":{"param":"ApproveConnection","payload":{"caller":"did:lineage:bob","token_id":2,"type_id":0}}}"#;
        assert_eq!(expected, try_json.unwrap())
    }

    #[test]
    fn test_agent_from_str() {
        let jsonstr = r#"{"type":"Agent","payload":{"param":"OwnerOf","payload":{"token_id":2}}}"#;

        let value: Result<Param, CommonError> =
            serde_json::from_str(jsonstr).map_err(|err| CommonError::JSONError(err.to_string()));
        assert!(!value.is_err());
        assert!(matches!(
            value.unwrap(),
            Param::Agent(Agent::OwnerOf { .. })
        ))
    }

    #[test]
    fn test_domain_from_str() {
        let jsonstr = r#"{"type":"Domain","payload":{"param":"GetConnection","payload":{"id":3}}}"#;

        let value: Result<Param, CommonError> =
            serde_json::from_str(jsonstr).map_err(|err| CommonError::JSONError(err.to_string()));
        assert!(!value.is_err());
        assert!(matches!(
            value.unwrap(),
            Param::Domain(Domain::GetConnection { .. })
        ));
    }

    #[test]
    fn test_domain_add_connection_roundtrip() {
        use rst_common::standard::chrono::{TimeZone, Utc};

        let param = Param::Domain(Domain::AddConnection {
            caller: OwnerId::from("did:lineage:alice"),
            params: CreateConnectionParams {
                parent_token_id: TokenId::from(0),
                child_token_id: TokenId::from(1),
                type_id: ConnectionTypeId::from(0),
                start_date: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                end_date: Utc.timestamp_opt(1_701_209_600, 0).unwrap(),
            },
        });

        let jsonstr = serde_json::to_string(&param).unwrap();
        let rebuilt = Param::try_from(serde_json::from_str::<Value>(&jsonstr).unwrap());
        assert!(!rebuilt.is_err());

        match rebuilt.unwrap() {
            Param::Domain(Domain::AddConnection { caller, params }) => {
                assert_eq!(caller, OwnerId::from("did:lineage:alice"));
                assert_eq!(params.parent_token_id, TokenId::from(0));
                assert_eq!(params.child_token_id, TokenId::from(1));
                assert_eq!(params.start_date.timestamp(), 1_700_000_000);
                assert_eq!(params.end_date.timestamp(), 1_701_209_600)
            }
            _ => panic!("unexpected param variant"),
        }
    }
}
