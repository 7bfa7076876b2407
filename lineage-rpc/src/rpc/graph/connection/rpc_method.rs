use prople_jsonrpc_core::types::RpcMethod;

use crate::common::types::CommonError;
use crate::rpc::shared::rpc::method::RpcMethodBuilder;

const METHOD_ADD_CONNECTION_TYPE: &str = "graph.connection.add_connection_type";
const METHOD_ADD_CONNECTION: &str = "graph.connection.add_connection";
const METHOD_APPROVE_CONNECTION: &str = "graph.connection.approve_connection";
const METHOD_GET_CONNECTION: &str = "graph.connection.get_connection_by_id";

const METHOD_TOKEN_OWNER_OF: &str = "token.owner_of";

/// `Domain` methods are served by this agent's connection handler
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    AddConnectionType,
    AddConnection,
    ApproveConnection,
    GetConnection,
}

/// `Agent` methods live on peer agents and are only ever called outbound,
/// like the ownership query against the token-registry agent
#[derive(Clone, Debug, PartialEq)]
pub enum Agent {
    OwnerOf,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Method {
    Domain(Domain),
    Agent(Agent),
}

impl RpcMethodBuilder for Method {
    fn build_path(&self) -> &str {
        match self {
            Method::Domain(domain) => match domain {
                Domain::AddConnectionType => METHOD_ADD_CONNECTION_TYPE,
                Domain::AddConnection => METHOD_ADD_CONNECTION,
                Domain::ApproveConnection => METHOD_APPROVE_CONNECTION,
                Domain::GetConnection => METHOD_GET_CONNECTION,
            },
            Method::Agent(agent) => match agent {
                Agent::OwnerOf => METHOD_TOKEN_OWNER_OF,
            },
        }
    }
}

impl TryFrom<RpcMethod> for Method {
    type Error = CommonError;

    // the type registration path must be matched before the bare connection
    // path, which is its prefix
    fn try_from(value: RpcMethod) -> Result<Self, Self::Error> {
        let given = value.to_string();
        match given.as_str() {
            _ if given.as_str().contains(METHOD_ADD_CONNECTION_TYPE) => {
                Ok(Self::Domain(Domain::AddConnectionType))
            }
            _ if given.as_str().contains(METHOD_APPROVE_CONNECTION) => {
                Ok(Self::Domain(Domain::ApproveConnection))
            }
            _ if given.as_str().contains(METHOD_GET_CONNECTION) => {
                Ok(Self::Domain(Domain::GetConnection))
            }
            _ if given.as_str().contains(METHOD_ADD_CONNECTION) => {
                Ok(Self::Domain(Domain::AddConnection))
            }
            _ if given.as_str().contains(METHOD_TOKEN_OWNER_OF) => {
                Ok(Self::Agent(Agent::OwnerOf))
            }
            _ => Err(CommonError::MethodError(format!(
                "unknown method: {}",
                given
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_test::table_test;

    use prople_jsonrpc_core::types::RpcMethod;

    use crate::rpc::shared::rpc::method::build_rpc_method;

    #[test]
    fn test_from_rpc_method() {
        let table = vec![
            (
                build_rpc_method(Method::Domain(Domain::AddConnectionType)),
                Method::Domain(Domain::AddConnectionType),
            ),
            (
                build_rpc_method(Method::Domain(Domain::AddConnection)),
                Method::Domain(Domain::AddConnection),
            ),
            (
                build_rpc_method(Method::Domain(Domain::ApproveConnection)),
                Method::Domain(Domain::ApproveConnection),
            ),
            (
                build_rpc_method(Method::Domain(Domain::GetConnection)),
                Method::Domain(Domain::GetConnection),
            ),
            (
                build_rpc_method(Method::Agent(Agent::OwnerOf)),
                Method::Agent(Agent::OwnerOf),
            ),
        ];

        for (validator, input, expected) in table_test!(table) {
            let from_method = Method::try_from(input.clone());
            assert!(!from_method.is_err());

            validator
                .given(&format!("{:?}", input))
                .when("cast back")
                .then("back to original form")
                .assert_eq(expected, from_method.unwrap());
        }
    }

    #[test]
    fn test_from_rpc_method_error() {
        let rpc_method = RpcMethod::from("unknown.method");
        let from_method = Method::try_from(rpc_method);
        assert!(from_method.is_err());
        assert!(matches!(
            from_method.unwrap_err(),
            CommonError::MethodError(_)
        ))
    }
}
