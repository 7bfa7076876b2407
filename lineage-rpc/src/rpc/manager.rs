use prople_jsonrpc_core::objects::RpcProcessor;

use rstdev_storage::engine::rocksdb::executor::Executor;

use crate::common::types::CommonError;
use crate::config::{Oracle as OracleConfig, Policy as PolicyConfig};
use crate::rpc::graph::connection::Connection as ConnectionService;
use crate::rpc::shared::types::RPCService;

pub struct Manager {
    processor: RpcProcessor,
}

impl Manager {
    pub fn new() -> Self {
        let processor = RpcProcessor::default();
        Self { processor }
    }

    pub async fn build_graph_service(
        &mut self,
        db_executor: Executor,
        oracle_config: OracleConfig,
        policy_config: PolicyConfig,
    ) -> Result<&mut Self, CommonError> {
        let mut connection_rpc = ConnectionService::new(db_executor, oracle_config, policy_config);

        let _ = connection_rpc.build().await?;
        let _ = connection_rpc.setup_rpc()?;
        let routes = connection_rpc.routes();

        if routes.is_empty() {
            return Err(CommonError::RpcError(String::from(
                "graph service doesn't have any routes",
            )));
        }

        for route in routes.iter() {
            self.processor.register_route(route.clone());
        }

        Ok(self)
    }

    pub fn processor(&self) -> RpcProcessor {
        self.processor.clone()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}
