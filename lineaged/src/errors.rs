use rst_common::with_errors::thiserror::{self, Error};

#[derive(Debug, Error)]
pub enum LineageError {
    #[error("rpc error: {0}")]
    RpcError(String),
}
