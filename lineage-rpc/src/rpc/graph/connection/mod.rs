use rstdev_storage::engine::rocksdb::executor::Executor;

use rst_common::standard::async_trait::async_trait;

use prople_jsonrpc_client::executor::reqwest::Reqwest as ReqwestExecutor;
use prople_jsonrpc_core::types::RpcRoute;

use lineage_core::graph::connection::types::{OwnerId, RegistryAPI};
use lineage_core::graph::connection::usecase::Usecase;

use crate::common::types::CommonError;
use crate::config::{Oracle as OracleConfig, Policy as PolicyConfig};
use crate::rpc::shared::rpc::method::build_rpc_method;
use crate::rpc::shared::types::RPCService;

mod handler;
mod oracle;
mod policy;
mod repository;
mod rpc_method;
mod rpc_param;

pub use handler::ConnectionHandler;
pub use oracle::{OwnerOfResponse, OwnershipRpcClient};
pub use policy::OperatorPolicy;
pub use repository::Repository;
pub use rpc_method::{Domain as MethodDomain, Method, Agent as MethodAgent};
pub use rpc_param::{
    ConnectionPairResponse, Domain as ParamDomain, Param, Agent as ParamAgent,
};

type OracleRpcClient = OwnershipRpcClient<ReqwestExecutor<OwnerOfResponse>>;
type RegistryImplementer = Usecase<Repository, OracleRpcClient, OperatorPolicy>;

/// `Connection` wires the graph connection domain into an RPC service: the
/// RocksDB journal, the ownership-oracle client, the configured access
/// policy and the hydrated usecase behind one handler per domain method
pub struct Connection<TRegistry>
where
    TRegistry: RegistryAPI,
{
    executor: Executor,
    oracle_config: OracleConfig,
    policy_config: PolicyConfig,
    registry_api: Option<TRegistry>,
    routes: Vec<RpcRoute>,
}

impl<TRegistry> Connection<TRegistry>
where
    TRegistry: RegistryAPI,
{
    pub fn new(
        executor: Executor,
        oracle_config: OracleConfig,
        policy_config: PolicyConfig,
    ) -> Self {
        Self {
            executor,
            oracle_config,
            policy_config,
            registry_api: None,
            routes: Vec::new(),
        }
    }
}

#[async_trait]
impl RPCService for Connection<RegistryImplementer> {
    async fn build(&mut self) -> Result<(), CommonError> {
        let repo = Repository::new(self.executor.to_owned());

        let oracle = OwnershipRpcClient::new(
            ReqwestExecutor::new(),
            self.oracle_config.get_addr(),
        );

        let operators = self
            .policy_config
            .get_operators()
            .into_iter()
            .map(OwnerId::from)
            .collect::<Vec<OwnerId>>();
        let policy = OperatorPolicy::new(operators, self.policy_config.get_allow_parent_owner());

        let usecase = Usecase::load(repo, oracle, policy)
            .await
            .map_err(|err| CommonError::InternalError(err.to_string()))?;

        self.registry_api = Some(usecase);
        Ok(())
    }

    fn setup_rpc(&mut self) -> Result<(), CommonError> {
        let usecase = self
            .registry_api
            .as_ref()
            .ok_or(CommonError::InternalError(String::from(
                "missing registry usecase",
            )))?;

        let handler = ConnectionHandler::new(usecase.clone());
        let controller = Box::new(handler);

        self.routes.push(RpcRoute::new(
            build_rpc_method(Method::Domain(MethodDomain::AddConnectionType)),
            controller.clone(),
        ));

        self.routes.push(RpcRoute::new(
            build_rpc_method(Method::Domain(MethodDomain::AddConnection)),
            controller.clone(),
        ));

        self.routes.push(RpcRoute::new(
            build_rpc_method(Method::Domain(MethodDomain::ApproveConnection)),
            controller.clone(),
        ));

        self.routes.push(RpcRoute::new(
            build_rpc_method(Method::Domain(MethodDomain::GetConnection)),
            controller.clone(),
        ));

        Ok(())
    }

    fn routes(&self) -> Vec<RpcRoute> {
        self.routes.clone()
    }
}
