#![forbid(unsafe_code)]

pub mod grpc_api {
    tonic::include_proto!("registry.v1");
}

pub mod mapping;
pub mod server;
pub mod service;

pub use server::{bind_listener, serve, shutdown_signal};
pub use service::GrpcRegistryService;
