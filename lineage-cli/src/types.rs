use rst_common::with_errors::thiserror::{self, Error};

pub const LINEAGE_DEFAULT_DIR: &str = ".lineage";
pub const LINEAGE_DATA_DIR: &str = "data";
pub const LINEAGE_CF_NAME: &str = "personal";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("homedir error: {0}")]
    HomeDirError(String),

    #[error("database error: {0}")]
    DBError(String),

    #[error("toml error: {0}")]
    TomlError(String),

    #[error("agent error: {0}")]
    AgentError(String),

    #[error("rpc error: {0}")]
    RpcError(String),

    #[error("json error: {0}")]
    JSONError(String),

    #[error("argument error: {0}")]
    ArgumentError(String),
}
