use cli_table::{print_stdout, WithTitle};

use rst_common::standard::chrono::{TimeZone, Utc};
use rst_common::standard::serde_json;
use rst_common::with_logging::log::{debug, info};

use prople_jsonrpc_client::types::{Executor, NullValue};

use lineage_core::graph::connection::types::{
    ConnectionId, ConnectionTypeId, CreateConnectionParams, OwnerId, TokenId,
};
use lineage_core::graph::connection::{Connection as CoreConnection, ConnectionType};

use lineage_rpc::build_rpc_method;
use lineage_rpc::components::connection::{
    ConnectionPairResponse, Method, MethodDomain, Param, ParamDomain,
};

use crate::commands::agents::get_agent_address;
use crate::commands::handler::ContextHandler;
use crate::models::db::DB;
use crate::models::graph::connection::{ConnectionModel, ConnectionRow};
use crate::models::types::AgentName;
use crate::types::CliError;
use crate::utils::rpc::build_client;

use super::ConnectionCommands;

pub async fn handle_commands(
    ctx: &ContextHandler,
    commands: ConnectionCommands,
) -> Result<(), CliError> {
    debug!("connection command handler triggered...");

    let agent_addr = get_agent_address(ctx)?;

    match commands {
        ConnectionCommands::AddType(args) => {
            debug!(
                "[connection:add-type] type: {} | reciprocal: {}",
                args.type_id, args.reciprocal_id
            );

            let method = build_rpc_method(Method::Domain(MethodDomain::AddConnectionType));
            let client = build_client::<ConnectionType>();
            let resp = client
                .call(
                    agent_addr,
                    Some(Param::Domain(ParamDomain::AddConnectionType {
                        caller: OwnerId::from(args.caller),
                        type_id: ConnectionTypeId::from(args.type_id),
                        reciprocal_id: ConnectionTypeId::from(args.reciprocal_id),
                    })),
                    method.to_string(),
                    None,
                )
                .await
                .map_err(|err| CliError::RpcError(err.to_string()))?;

            let rpc_resp = resp
                .result
                .ok_or(CliError::RpcError(String::from("missing result")))?;

            let out = serde_json::to_string_pretty(&rpc_resp)
                .map_err(|err| CliError::RpcError(err.to_string()))?;

            info!("Connection type registered: {}", out)
        }
        ConnectionCommands::Add(args) => {
            debug!(
                "[connection:add] parent: {} | child: {} | type: {}",
                args.parent_token_id, args.child_token_id, args.type_id
            );

            let start_date = Utc
                .timestamp_opt(args.start_date, 0)
                .single()
                .ok_or(CliError::ArgumentError(String::from("invalid start date")))?;
            let end_date = Utc
                .timestamp_opt(args.end_date, 0)
                .single()
                .ok_or(CliError::ArgumentError(String::from("invalid end date")))?;

            let method = build_rpc_method(Method::Domain(MethodDomain::AddConnection));
            let client = build_client::<ConnectionPairResponse>();
            let resp = client
                .call(
                    agent_addr,
                    Some(Param::Domain(ParamDomain::AddConnection {
                        caller: OwnerId::from(args.caller),
                        params: CreateConnectionParams {
                            parent_token_id: TokenId::from(args.parent_token_id),
                            child_token_id: TokenId::from(args.child_token_id),
                            type_id: ConnectionTypeId::from(args.type_id),
                            start_date,
                            end_date,
                        },
                    })),
                    method.to_string(),
                    None,
                )
                .await
                .map_err(|err| CliError::RpcError(err.to_string()))?;

            let rpc_resp = resp
                .result
                .ok_or(CliError::RpcError(String::from("missing result")))?;

            let out = serde_json::to_string_pretty(&rpc_resp)
                .map_err(|err| CliError::RpcError(err.to_string()))?;

            info!("Connection pair created: {}", out)
        }
        ConnectionCommands::Approve(args) => {
            debug!(
                "[connection:approve] token: {} | type: {}",
                args.token_id, args.type_id
            );

            let method = build_rpc_method(Method::Domain(MethodDomain::ApproveConnection));
            let client = build_client::<NullValue>();
            let resp = client
                .call(
                    agent_addr,
                    Some(Param::Domain(ParamDomain::ApproveConnection {
                        caller: OwnerId::from(args.caller),
                        token_id: TokenId::from(args.token_id),
                        type_id: ConnectionTypeId::from(args.type_id),
                    })),
                    method.to_string(),
                    None,
                )
                .await
                .map_err(|err| CliError::RpcError(err.to_string()))?;

            if let Some(err) = resp.error {
                let err_json = serde_json::to_string(&err)
                    .map_err(|err| CliError::JSONError(err.to_string()))?;
                return Err(CliError::RpcError(format!(
                    "approval rejected: {}",
                    err_json
                )));
            }

            info!(
                "Connection approved for token {} with type {}",
                args.token_id, args.type_id
            )
        }
        ConnectionCommands::Get(args) => {
            debug!("[connection:get] id: {}", args.id);

            let agent = ctx
                .agent()
                .ok_or(CliError::AgentError(String::from("missing agent")))?;

            let method = build_rpc_method(Method::Domain(MethodDomain::GetConnection));
            let client = build_client::<CoreConnection>();
            let resp = client
                .call(
                    agent_addr,
                    Some(Param::Domain(ParamDomain::GetConnection {
                        id: ConnectionId::from(args.id),
                    })),
                    method.to_string(),
                    None,
                )
                .await
                .map_err(|err| CliError::RpcError(err.to_string()))?;

            let rpc_resp = resp
                .result
                .ok_or(CliError::RpcError(String::from("missing result")))?;

            let row = ConnectionRow::from(&rpc_resp);
            let _ = print_stdout(vec![row].with_title())
                .map_err(|err| CliError::RpcError(err.to_string()))?;

            let db = DB::new(ctx.db());
            let _ = db
                .save(
                    AgentName::from(agent.clone()),
                    ConnectionModel::new(rpc_resp),
                )
                .await
                .map_err(|err| CliError::DBError(err.to_string()))?;
        }
    }

    Ok(())
}
