use rst_common::standard::async_trait::async_trait;

use prople_jsonrpc_core::types::RpcRoute;

use crate::common::types::CommonError;

/// `RPCService` is the shape every domain RPC service follows: build its
/// composed usecase (which may hit storage, hence async), register its
/// routes, and hand them to the processor
#[async_trait]
pub trait RPCService {
    async fn build(&mut self) -> Result<(), CommonError>;
    fn setup_rpc(&mut self) -> Result<(), CommonError>;
    fn routes(&self) -> Vec<RpcRoute>;
}
