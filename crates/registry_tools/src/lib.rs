#![forbid(unsafe_code)]

pub mod client_cli;
pub mod logging;
pub mod participant_input;

pub const DEFAULT_GRPC_PORT: u16 = 9090;
pub const DEFAULT_SERVER_ADDRESS: &str = "localhost:9090";
pub const DEFAULT_LOG_FILE: &str = "./registry-microservice.log";
