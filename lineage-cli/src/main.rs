use clap::{Parser, Subcommand};
use rst_common::with_tokio::tokio;

use lineage_cli::commands::agents::{agent_handler, read_agent_session, AgentArgs};
use lineage_cli::commands::connection::{connection_handler, ConnectionArgs};
use lineage_cli::commands::handler::ContextHandler;
use lineage_cli::commands::ping::{ping_handler, PingArgs};
use lineage_cli::types::{CliError, LINEAGE_CF_NAME, LINEAGE_DATA_DIR, LINEAGE_DEFAULT_DIR};
use lineage_cli::utils::db::setup_database;
use lineage_cli::utils::homedir::setup_homedir;

#[derive(Parser)]
#[command(name = "lineage-cli")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Used to manage known agents and the active session
    Agent(AgentArgs),

    /// Used to check an agent's liveness
    Ping(PingArgs),

    /// Used to manage the connection graph
    Connection(ConnectionArgs),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let lineage_dir = setup_homedir(LINEAGE_DEFAULT_DIR)?;
    let data_dir = format!("{}/{}", lineage_dir, LINEAGE_DATA_DIR);
    let db_executor = setup_database(data_dir, LINEAGE_CF_NAME.to_string())?;

    let mut ctx = ContextHandler::new(db_executor);
    let _ = ctx.build_config(cli.log_level.clone(), lineage_dir);

    let agent_session = read_agent_session(&ctx).ok();
    let _ = ctx.set_agent(agent_session);

    match cli.command {
        Commands::Agent(args) => agent_handler(&ctx, args.commands)?,
        Commands::Ping(args) => ping_handler(&ctx, args.commands).await?,
        Commands::Connection(args) => connection_handler(&ctx, args.commands).await?,
    }

    Ok(())
}
