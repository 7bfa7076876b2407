//! `lineage-rpc` assembles the connection graph domain from `lineage-core`
//! into a JSON-RPC processor: TOML configuration, RocksDB persistence, the
//! outbound ownership-oracle client and the inbound request handlers.
//!
//! The crate exposes three things to the outside:
//!
//! - [`LineageRPC`], the entrypoint used by the daemon to parse a config file
//!   and build a ready-to-serve RPC processor
//! - [`build_rpc_method`] plus the method/param types under [`components`],
//!   shared with RPC clients such as the CLI
//! - [`DbBuilder`], the RocksDB executor builder
pub mod common;

mod config;
pub use config::Parser as ConfigManager;
pub use config::{App, Config, Database, Graph, Oracle, Policy, RocksDBCommon, RocksDBOptions};

mod rpc;
pub use rpc::shared::db::Builder as DbBuilder;
pub use rpc::shared::rpc::method::{build_rpc_method, RpcMethodBuilder, RPC_METHOD_PREFIX};
pub use rpc::Manager;

mod manager;
pub use manager::LineageRPC;

pub mod components {
    //! Re-exports consumed by RPC clients (the CLI and peer agents)
    pub mod connection {
        pub use crate::rpc::graph::connection::{
            ConnectionHandler, ConnectionPairResponse, Method, MethodDomain, MethodAgent,
            OperatorPolicy, OwnerOfResponse, OwnershipRpcClient, Param, ParamDomain, ParamAgent,
            Repository,
        };
    }
}
