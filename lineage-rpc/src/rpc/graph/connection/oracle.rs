use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};

use prople_jsonrpc_client::types::Executor;

use lineage_core::graph::connection::types::{
    ConnectionError, OwnerId, OwnershipOracleBuilder, TokenId,
};

use crate::rpc::shared::rpc::method::build_rpc_method;

use super::rpc_method::{Agent as MethodAgent, Method};
use super::rpc_param::{Agent as ParamAgent, Param};

/// `OwnerOfResponse` is the answer of the token-registry agent to an
/// ownership query
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct OwnerOfResponse {
    pub owner: String,
}

/// `OwnershipRpcClient` resolves token ownership by calling the external
/// token-registry agent over JSON-RPC
///
/// Every call goes to the wire; nothing is cached here, the registry relies
/// on fresh answers at each decision point
#[derive(Clone)]
pub struct OwnershipRpcClient<TExecutor>
where
    TExecutor: Executor<OwnerOfResponse> + Clone,
{
    client: TExecutor,
    addr: String,
}

impl<TExecutor> OwnershipRpcClient<TExecutor>
where
    TExecutor: Executor<OwnerOfResponse> + Clone,
{
    pub fn new(client: TExecutor, addr: String) -> Self {
        Self { client, addr }
    }
}

#[async_trait]
impl<TExecutor> OwnershipOracleBuilder for OwnershipRpcClient<TExecutor>
where
    TExecutor: Executor<OwnerOfResponse> + Send + Sync + Clone,
{
    async fn owner_of(&self, token_id: TokenId) -> Result<OwnerId, ConnectionError> {
        let rpc_param = Param::Agent(ParamAgent::OwnerOf { token_id });
        let rpc_method = build_rpc_method(Method::Agent(MethodAgent::OwnerOf));

        let response = self
            .client
            .call(
                self.addr.to_owned(),
                Some(rpc_param),
                rpc_method.to_string(),
                None,
            )
            .await
            .map_err(|err| ConnectionError::OracleError(err.to_string()))?;

        // the token registry answers an error object only for tokens it does
        // not know
        if response.error.is_some() {
            return Err(ConnectionError::UnknownToken(token_id));
        }

        response
            .result
            .map(|resp| OwnerId::from(resp.owner))
            .ok_or(ConnectionError::UnknownToken(token_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    use rst_common::standard::serde_json;
    use rst_common::with_tokio::tokio;

    use prople_jsonrpc_client::executor::reqwest::Reqwest as ReqwestExecutor;
    use prople_jsonrpc_client::types::JSONResponse;

    use prople_jsonrpc_core::types::{RpcError, RpcErrorBuilder, RpcId};

    fn generate_rpc_client(addr: String) -> OwnershipRpcClient<ReqwestExecutor<OwnerOfResponse>> {
        OwnershipRpcClient::new(ReqwestExecutor::new(), addr)
    }

    #[tokio::test]
    async fn test_owner_of_success() {
        let mut server = Server::new_async().await;
        let addr = format!("{}/rpc", server.url());

        let jsonresp: JSONResponse<OwnerOfResponse> = JSONResponse {
            id: Some(RpcId::IntegerVal(1)),
            result: Some(OwnerOfResponse {
                owner: "did:lineage:bob".to_string(),
            }),
            error: None,
            jsonrpc: String::from("2.0"),
        };

        let jsonresp_str = serde_json::to_string(&jsonresp).unwrap();

        let mock = server
            .mock("POST", "/rpc")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"lineage.token.owner_of"}"#.to_string(),
            ))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(jsonresp_str)
            .create_async()
            .await;

        let client = generate_rpc_client(addr);
        let resp = client.owner_of(TokenId::from(2)).await;

        assert!(!resp.is_err());
        assert_eq!(resp.unwrap(), OwnerId::from("did:lineage:bob"));
        mock.assert();
    }

    #[tokio::test]
    async fn test_owner_of_unknown_token() {
        let mut server = Server::new_async().await;
        let addr = format!("{}/rpc", server.url());

        let response_err = RpcErrorBuilder::build(RpcError::InvalidParams);
        let jsonresp: JSONResponse<OwnerOfResponse> = JSONResponse {
            id: Some(RpcId::IntegerVal(1)),
            result: None,
            error: Some(response_err),
            jsonrpc: String::from("2.0"),
        };

        let jsonresp_str = serde_json::to_string(&jsonresp).unwrap();

        let mock = server
            .mock("POST", "/rpc")
            .match_body(Matcher::PartialJsonString(
                r#"{"method":"lineage.token.owner_of"}"#.to_string(),
            ))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(jsonresp_str)
            .create_async()
            .await;

        let client = generate_rpc_client(addr);
        let resp = client.owner_of(TokenId::from(9)).await;

        assert!(resp.is_err());
        assert_eq!(
            resp.unwrap_err(),
            ConnectionError::UnknownToken(TokenId::from(9))
        );
        mock.assert();
    }

    #[tokio::test]
    async fn test_owner_of_transport_error() {
        // nothing listens here
        let client = generate_rpc_client("http://127.0.0.1:1/rpc".to_string());
        let resp = client.owner_of(TokenId::from(0)).await;

        assert!(resp.is_err());
        assert!(matches!(
            resp.unwrap_err(),
            ConnectionError::OracleError(_)
        ))
    }
}
