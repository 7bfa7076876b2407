use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;

use prople_jsonrpc_core::types::{RpcError, RpcHandler, RpcHandlerOutput, RpcMethod};

use lineage_core::graph::connection::types::RegistryAPI;
use lineage_core::graph::connection::Connection;

use super::rpc_method::{Domain as MethodDomain, Method};
use super::rpc_param::{ConnectionPairResponse, Domain, Param};

#[derive(Clone)]
pub struct ConnectionHandler<TRegistry>
where
    TRegistry: RegistryAPI<EntityAccessor = Connection>,
{
    registry_api: TRegistry,
}

impl<TRegistry> ConnectionHandler<TRegistry>
where
    TRegistry: RegistryAPI<EntityAccessor = Connection>,
{
    pub fn new(registry_api: TRegistry) -> Self {
        Self { registry_api }
    }

    async fn add_connection_type(&self, param: Param) -> RpcHandlerOutput {
        match param {
            Param::Domain(domain) => match domain {
                Domain::AddConnectionType {
                    caller,
                    type_id,
                    reciprocal_id,
                } => {
                    let result = self
                        .registry_api
                        .add_connection_type(caller, type_id, reciprocal_id)
                        .await
                        .map_err(|err| RpcError::HandlerError(err.to_string()))?;

                    Ok(Some(Box::new(result)))
                }
                _ => Err(RpcError::InvalidParams),
            },
            _ => Err(RpcError::InvalidParams),
        }
    }

    async fn add_connection(&self, param: Param) -> RpcHandlerOutput {
        match param {
            Param::Domain(domain) => match domain {
                Domain::AddConnection { caller, params } => {
                    let (left_id, right_id) = self
                        .registry_api
                        .add_connection(caller, params)
                        .await
                        .map_err(|err| RpcError::HandlerError(err.to_string()))?;

                    Ok(Some(Box::new(ConnectionPairResponse { left_id, right_id })))
                }
                _ => Err(RpcError::InvalidParams),
            },
            _ => Err(RpcError::InvalidParams),
        }
    }

    async fn approve_connection(&self, param: Param) -> RpcHandlerOutput {
        match param {
            Param::Domain(domain) => match domain {
                Domain::ApproveConnection {
                    caller,
                    token_id,
                    type_id,
                } => {
                    let _ = self
                        .registry_api
                        .approve_connection(caller, token_id, type_id)
                        .await
                        .map_err(|err| RpcError::HandlerError(err.to_string()))?;

                    Ok(None)
                }
                _ => Err(RpcError::InvalidParams),
            },
            _ => Err(RpcError::InvalidParams),
        }
    }

    async fn get_connection(&self, param: Param) -> RpcHandlerOutput {
        match param {
            Param::Domain(domain) => match domain {
                Domain::GetConnection { id } => {
                    let result = self
                        .registry_api
                        .get_connection(id)
                        .await
                        .map_err(|err| RpcError::HandlerError(err.to_string()))?;

                    Ok(Some(Box::new(result)))
                }
                _ => Err(RpcError::InvalidParams),
            },
            _ => Err(RpcError::InvalidParams),
        }
    }
}

#[async_trait]
impl<TRegistry> RpcHandler for ConnectionHandler<TRegistry>
where
    TRegistry: RegistryAPI<EntityAccessor = Connection> + Send + Sync,
{
    async fn call(&self, method: RpcMethod, params: Option<Value>) -> RpcHandlerOutput {
        let param_value = params.ok_or(RpcError::InvalidParams)?;
        let rpc_param = Param::try_from(param_value).map_err(|_| RpcError::ParseError)?;
        let rpc_method = Method::try_from(method).map_err(|_| RpcError::InternalError)?;

        match rpc_method {
            Method::Domain(MethodDomain::AddConnectionType) => {
                self.add_connection_type(rpc_param).await
            }
            Method::Domain(MethodDomain::AddConnection) => self.add_connection(rpc_param).await,
            Method::Domain(MethodDomain::ApproveConnection) => {
                self.approve_connection(rpc_param).await
            }
            Method::Domain(MethodDomain::GetConnection) => self.get_connection(rpc_param).await,
            Method::Agent(_) => Err(RpcError::InternalError),
        }
    }
}
