#![forbid(unsafe_code)]

use std::sync::Arc;

use registry_kernel_contracts::{Participant, RegistryError};
use registry_storage::ParticipantStore;
use tonic::{Request, Response, Status};

use crate::grpc_api::{
    registry_service_server::{RegistryService, RegistryServiceServer},
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, Participant as WireParticipant,
    RetrieveRequest, RetrieveResponse, UpdateRequest, UpdateResponse,
};
use crate::mapping::{participant_from_wire, participant_to_wire, status_from_error};

/// The four registry call handlers over a shared participant store.
#[derive(Debug, Clone)]
pub struct GrpcRegistryService {
    store: Arc<ParticipantStore>,
}

impl GrpcRegistryService {
    pub fn new(store: Arc<ParticipantStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ParticipantStore> {
        &self.store
    }

    pub fn into_service(self) -> RegistryServiceServer<Self> {
        RegistryServiceServer::new(self)
    }

    fn api_version(&self) -> String {
        self.store.version().as_str().to_string()
    }

    /// A request under a foreign version is refused before its body is read.
    fn admit_participant(
        &self,
        api_version: &str,
        participant: Option<WireParticipant>,
    ) -> Result<Participant, RegistryError> {
        self.store.check_version(api_version)?;
        participant_from_wire(participant)
    }
}

#[tonic::async_trait]
impl RegistryService for GrpcRegistryService {
    async fn create(
        &self,
        request: Request<CreateRequest>,
    ) -> Result<Response<CreateResponse>, Status> {
        let req = request.into_inner();
        let participant = match self.admit_participant(&req.api_version, req.participant) {
            Ok(participant) => participant,
            Err(err) => {
                tracing::warn!(error = %err, "create request rejected");
                return Err(status_from_error(err));
            }
        };
        let reference_id = participant.reference_id.clone();
        match self.store.create(&req.api_version, participant) {
            Ok(()) => {
                tracing::info!(%reference_id, "participant created");
                Ok(Response::new(CreateResponse {
                    api_version: self.api_version(),
                    created: true,
                }))
            }
            Err(err) => {
                tracing::warn!(%reference_id, error = %err, "create request rejected");
                Err(status_from_error(err))
            }
        }
    }

    async fn retrieve(
        &self,
        request: Request<RetrieveRequest>,
    ) -> Result<Response<RetrieveResponse>, Status> {
        let req = request.into_inner();
        match self.store.retrieve(&req.api_version, &req.id) {
            Ok(participant) => {
                tracing::info!(reference_id = %req.id, "participant retrieved");
                Ok(Response::new(RetrieveResponse {
                    api_version: self.api_version(),
                    participant: Some(participant_to_wire(participant)),
                }))
            }
            Err(err) => {
                tracing::warn!(reference_id = %req.id, error = %err, "retrieve request rejected");
                Err(status_from_error(err))
            }
        }
    }

    async fn update(
        &self,
        request: Request<UpdateRequest>,
    ) -> Result<Response<UpdateResponse>, Status> {
        let req = request.into_inner();
        let participant = match self.admit_participant(&req.api_version, req.participant) {
            Ok(participant) => participant,
            Err(err) => {
                tracing::warn!(error = %err, "update request rejected");
                return Err(status_from_error(err));
            }
        };
        let reference_id = participant.reference_id.clone();
        match self.store.update(&req.api_version, participant) {
            Ok(()) => {
                tracing::info!(%reference_id, "participant updated");
                Ok(Response::new(UpdateResponse {
                    api_version: self.api_version(),
                    updated: true,
                }))
            }
            Err(err) => {
                tracing::warn!(%reference_id, error = %err, "update request rejected");
                Err(status_from_error(err))
            }
        }
    }

    async fn delete(
        &self,
        request: Request<DeleteRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let req = request.into_inner();
        match self.store.delete(&req.api_version, &req.id) {
            Ok(()) => {
                tracing::info!(reference_id = %req.id, "participant deleted");
                Ok(Response::new(DeleteResponse {
                    api_version: self.api_version(),
                    deleted: true,
                }))
            }
            Err(err) => {
                tracing::warn!(reference_id = %req.id, error = %err, "delete request rejected");
                Err(status_from_error(err))
            }
        }
    }
}
