use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as connection_handler;

#[derive(Args, Clone)]
pub struct ConnectionArgs {
    #[command(subcommand)]
    pub commands: ConnectionCommands,
}

#[derive(Clone, Subcommand)]
#[command(subcommand_help_heading = "Connection")]
pub enum ConnectionCommands {
    /// Register a connection type with its reciprocal type
    #[command(name = "add-type")]
    AddType(AddTypeArgs),

    /// Propose a connection between two tokens
    #[command(name = "add")]
    Add(AddConnectionArgs),

    /// Approve a pending connection addressed to one of your tokens
    #[command(name = "approve")]
    Approve(ApproveArgs),

    /// Fetch a single connection record by its id
    #[command(name = "get")]
    Get(GetArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddTypeArgs {
    /// caller is your identity URI, it must hold the operator grant
    #[arg(long, short, required = true)]
    pub caller: String,

    #[arg(long, required = true)]
    pub type_id: u64,

    #[arg(long, required = true)]
    pub reciprocal_id: u64,
}

#[derive(Args, Debug, Clone)]
pub struct AddConnectionArgs {
    /// caller is your identity URI
    #[arg(long, short, required = true)]
    pub caller: String,

    #[arg(long, required = true)]
    pub parent_token_id: u64,

    #[arg(long, required = true)]
    pub child_token_id: u64,

    #[arg(long, required = true)]
    pub type_id: u64,

    /// start of the validity window, unix seconds
    #[arg(long, required = true)]
    pub start_date: i64,

    /// end of the validity window, unix seconds
    #[arg(long, required = true)]
    pub end_date: i64,
}

#[derive(Args, Debug, Clone)]
pub struct ApproveArgs {
    /// caller is your identity URI, it must own the awaiting token
    #[arg(long, short, required = true)]
    pub caller: String,

    #[arg(long, required = true)]
    pub token_id: u64,

    #[arg(long, required = true)]
    pub type_id: u64,
}

#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    #[arg(long, required = true)]
    pub id: u64,
}
