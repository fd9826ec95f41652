#![forbid(unsafe_code)]

use std::str::FromStr;
use std::time::Duration;

use registry_adapter::grpc_api::{
    registry_service_client::RegistryServiceClient, CreateRequest, DeleteRequest,
    RetrieveRequest, UpdateRequest,
};
use registry_adapter::mapping::{participant_from_wire, participant_to_wire};
use registry_kernel_contracts::Participant;
use tonic::transport::{Channel, Endpoint};
use tonic::Request;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRequest {
    Create,
    Retrieve,
    Update,
    Delete,
}

impl ClientRequest {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientRequest::Create => "create",
            ClientRequest::Retrieve => "retrieve",
            ClientRequest::Update => "update",
            ClientRequest::Delete => "delete",
        }
    }

    pub fn needs_participant(self) -> bool {
        matches!(self, ClientRequest::Create | ClientRequest::Update)
    }
}

impl FromStr for ClientRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(ClientRequest::Create),
            "retrieve" => Ok(ClientRequest::Retrieve),
            "update" => Ok(ClientRequest::Update),
            "delete" => Ok(ClientRequest::Delete),
            _ => Err("only create|retrieve|update|delete requests are supported".to_string()),
        }
    }
}

/// A fully-formed client call, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Create(Participant),
    Retrieve(String),
    Update(Participant),
    Delete(String),
}

impl ClientCommand {
    pub fn request(&self) -> ClientRequest {
        match self {
            ClientCommand::Create(_) => ClientRequest::Create,
            ClientCommand::Retrieve(_) => ClientRequest::Retrieve,
            ClientCommand::Update(_) => ClientRequest::Update,
            ClientCommand::Delete(_) => ClientRequest::Delete,
        }
    }

    pub fn reference_id(&self) -> &str {
        match self {
            ClientCommand::Create(p) | ClientCommand::Update(p) => &p.reference_id,
            ClientCommand::Retrieve(id) | ClientCommand::Delete(id) => id,
        }
    }
}

pub async fn connect(server_address: &str) -> Result<RegistryServiceClient<Channel>, String> {
    let uri = if server_address.contains("://") {
        server_address.to_string()
    } else {
        format!("http://{server_address}")
    };
    let channel = Endpoint::from_shared(uri)
        .map_err(|e| format!("invalid server address '{server_address}': {e}"))?
        .connect_timeout(REQUEST_TIMEOUT)
        .connect()
        .await
        .map_err(|e| format!("could not connect to gRPC server: {e}"))?;
    Ok(RegistryServiceClient::new(channel))
}

/// Sends one request and renders the outcome. No retries.
pub async fn execute_client_command(
    client: &mut RegistryServiceClient<Channel>,
    api_version: &str,
    command: ClientCommand,
) -> Result<String, String> {
    let name = command.request().as_str();
    let reference_id = command.reference_id().to_string();
    let failed = |detail: String| format!("{name} request failed: {detail}");

    match command {
        ClientCommand::Create(participant) => {
            let res = client
                .create(with_deadline(CreateRequest {
                    api_version: api_version.to_string(),
                    participant: Some(participant_to_wire(participant)),
                }))
                .await
                .map_err(|s| failed(s.message().to_string()))?
                .into_inner();
            if !res.created {
                return Err(failed("server did not confirm creation".to_string()));
            }
        }
        ClientCommand::Retrieve(id) => {
            let res = client
                .retrieve(with_deadline(RetrieveRequest {
                    api_version: api_version.to_string(),
                    id,
                }))
                .await
                .map_err(|s| failed(s.message().to_string()))?
                .into_inner();
            let participant =
                participant_from_wire(res.participant).map_err(|e| failed(e.to_string()))?;
            tracing::info!(%reference_id, "retrieve request successful");
            return serde_json::to_string_pretty(&participant).map_err(|e| failed(e.to_string()));
        }
        ClientCommand::Update(participant) => {
            let res = client
                .update(with_deadline(UpdateRequest {
                    api_version: api_version.to_string(),
                    participant: Some(participant_to_wire(participant)),
                }))
                .await
                .map_err(|s| failed(s.message().to_string()))?
                .into_inner();
            if !res.updated {
                return Err(failed("server did not confirm update".to_string()));
            }
        }
        ClientCommand::Delete(id) => {
            let res = client
                .delete(with_deadline(DeleteRequest {
                    api_version: api_version.to_string(),
                    id,
                }))
                .await
                .map_err(|s| failed(s.message().to_string()))?
                .into_inner();
            if !res.deleted {
                return Err(failed("server did not confirm deletion".to_string()));
            }
        }
    }
    tracing::info!(%reference_id, "{name} request successful");
    Ok(format!("{name} request successful for: {reference_id}"))
}

fn with_deadline<T>(message: T) -> Request<T> {
    let mut request = Request::new(message);
    request.set_timeout(REQUEST_TIMEOUT);
    request
}
