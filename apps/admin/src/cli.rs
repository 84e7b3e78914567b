use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "backup-admin",
    version,
    about = "Manage backup servers, destinations, tasks and logs"
)]
pub struct Cli {
    /// Config file (default: ./admin.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Base url of the backend api, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    pub api_base: Option<String>,
    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bitwarden servers backups are pulled from
    #[command(subcommand)]
    Servers(ServerCommand),
    /// Places backups are written to
    #[command(subcommand)]
    Destinations(DestinationCommand),
    /// Scheduled backup jobs
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Backup run history
    #[command(subcommand)]
    Logs(LogCommand),
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

/// Request body for create/update, inline or from a file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// JSON body
    #[arg(long)]
    pub data: Option<String>,
    /// File holding the JSON body
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ServerCommand {
    List {
        #[arg(long)]
        enabled: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: u64,
    },
    Create(PayloadArgs),
    Update {
        id: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    Delete {
        id: u64,
    },
    Enable {
        id: u64,
    },
    Disable {
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum DestinationCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: u64,
    },
    Create(PayloadArgs),
    Update {
        id: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    Delete {
        id: u64,
    },
    Enable {
        id: u64,
    },
    Disable {
        id: u64,
    },
    /// Flip the enabled flag server-side
    Toggle {
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: u64,
    },
    Create(PayloadArgs),
    Update {
        id: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    Delete {
        id: u64,
    },
    Enable {
        id: u64,
    },
    Disable {
        id: u64,
    },
    /// Run the task now
    Execute {
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum LogCommand {
    List {
        #[arg(long)]
        task_id: Option<u64>,
        #[command(flatten)]
        page: PageArgs,
        /// Print the decoded execution trace of each run
        #[arg(long)]
        entries: bool,
    },
}
