#![forbid(unsafe_code)]

//! Participant registry microservice.
//!
//! `registry serve` runs the gRPC server; `registry client` sends a single
//! create, retrieve, update or delete request to a running server.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use registry_adapter::{bind_listener, serve, shutdown_signal};
use registry_kernel_contracts::ApiVersion;
use registry_storage::ParticipantStore;
use registry_tools::client_cli::{connect, execute_client_command, ClientCommand, ClientRequest};
use registry_tools::logging::{init_logging, LogDestination};
use registry_tools::participant_input::collect_participant;
use registry_tools::{DEFAULT_GRPC_PORT, DEFAULT_LOG_FILE, DEFAULT_SERVER_ADDRESS};

#[derive(Parser, Debug)]
#[command(name = "registry")]
#[command(about = "A simple participant registry microservice")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the registry server
    Serve(ServeArgs),
    /// Send a request to the registry server
    Client(ClientArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// TCP port to listen on
    #[arg(short = 'g', long, env = "REGISTRY_GRPC_PORT", default_value_t = DEFAULT_GRPC_PORT)]
    grpc_port: u16,

    /// Host address to bind to
    #[arg(long, env = "REGISTRY_GRPC_HOST", default_value = "0.0.0.0")]
    host: String,

    /// File to write the server log to (STDOUT logs to standard out)
    #[arg(short, long, env = "REGISTRY_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: String,
}

#[derive(Args, Debug)]
struct ClientArgs {
    /// Address of the server hosting the registry service
    #[arg(short, long, env = "REGISTRY_SERVER_ADDRESS", default_value = DEFAULT_SERVER_ADDRESS)]
    server_address: String,

    /// Server request (create|retrieve|update|delete)
    #[arg(short, long)]
    request: String,

    /// Reference number for the participant
    #[arg(short = 'i', long)]
    refnum: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve(args) => run_server(args).await,
        Command::Client(args) => run_client(args).await,
    }
}

async fn run_server(args: ServeArgs) -> Result<(), String> {
    init_logging(&LogDestination::from_flag(&args.log_file))?;
    tracing::info!("registry microservice launched");

    let addr: SocketAddr = format!("{}:{}", args.host, args.grpc_port)
        .parse()
        .map_err(|e| format!("invalid bind address '{}:{}': {e}", args.host, args.grpc_port))?;
    let listener = bind_listener(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;

    let store = Arc::new(ParticipantStore::new_in_memory());
    serve(listener, store, shutdown_signal())
        .await
        .map_err(|e| format!("gRPC server error: {e}"))?;
    tracing::info!("finished");
    Ok(())
}

async fn run_client(args: ClientArgs) -> Result<(), String> {
    init_logging(&LogDestination::Stderr)?;

    let request: ClientRequest = args.request.parse()?;
    let command = if request.needs_participant() {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        let participant =
            collect_participant(&args.refnum, &mut input, &mut out, Utc::now().year())
                .map_err(|e| e.to_string())?;
        match request {
            ClientRequest::Create => ClientCommand::Create(participant),
            _ => ClientCommand::Update(participant),
        }
    } else {
        match request {
            ClientRequest::Retrieve => ClientCommand::Retrieve(args.refnum),
            _ => ClientCommand::Delete(args.refnum),
        }
    };

    let mut client = connect(&args.server_address).await?;
    let output = execute_client_command(&mut client, ApiVersion::CURRENT, command).await?;
    let mut stdout = io::stdout();
    writeln!(stdout, "{output}").map_err(|e| e.to_string())?;
    Ok(())
}
