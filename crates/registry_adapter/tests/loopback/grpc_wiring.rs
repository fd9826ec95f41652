#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::NaiveDate;
use registry_adapter::grpc_api::{
    registry_service_client::RegistryServiceClient, CreateRequest, DeleteRequest, Participant,
    RetrieveRequest, UpdateRequest,
};
use registry_adapter::mapping::date_to_timestamp;
use registry_adapter::{bind_listener, serve};
use registry_storage::ParticipantStore;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::transport::Channel;
use tonic::Code;

struct Running {
    client: RegistryServiceClient<Channel>,
    store: Arc<ParticipantStore>,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), tonic::transport::Error>>,
}

async fn start() -> Running {
    let listener = bind_listener(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener addr");
    let store = Arc::new(ParticipantStore::new_in_memory());
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve(listener, store.clone(), async move {
        let _ = stopped.await;
    }));
    let client = RegistryServiceClient::connect(format!("http://{addr}"))
        .await
        .expect("connect client");
    Running {
        client,
        store,
        stop,
        handle,
    }
}

fn participant(id: &str, phone: &str) -> Participant {
    Participant {
        id: id.to_string(),
        dob: Some(date_to_timestamp(
            NaiveDate::from_ymd_opt(1990, 5, 2).unwrap(),
        )),
        phone: phone.to_string(),
        address: "1 Main St".to_string(),
    }
}

#[tokio::test]
async fn at_loopback_01_crud_over_the_wire() {
    let Running {
        mut client,
        store,
        stop,
        handle,
    } = start().await;

    let created = client
        .create(CreateRequest {
            api_version: "1".to_string(),
            participant: Some(participant("P001", "555-1000")),
        })
        .await
        .unwrap()
        .into_inner();
    assert!(created.created);

    let dup = client
        .create(CreateRequest {
            api_version: "1".to_string(),
            participant: Some(participant("P001", "555-1000")),
        })
        .await
        .unwrap_err();
    assert_eq!(dup.code(), Code::AlreadyExists);

    let updated = client
        .update(UpdateRequest {
            api_version: "1".to_string(),
            participant: Some(participant("P001", "555-2000")),
        })
        .await
        .unwrap()
        .into_inner();
    assert!(updated.updated);

    let got = client
        .retrieve(RetrieveRequest {
            api_version: "1".to_string(),
            id: "P001".to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(got.participant, Some(participant("P001", "555-2000")));

    let deleted = client
        .delete(DeleteRequest {
            api_version: "1".to_string(),
            id: "P001".to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert!(deleted.deleted);

    let missing = client
        .retrieve(RetrieveRequest {
            api_version: "1".to_string(),
            id: "P001".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(missing.code(), Code::NotFound);
    assert!(store.is_empty().unwrap());

    drop(client);
    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn at_loopback_02_version_mismatch_reaches_client_verbatim() {
    let Running {
        mut client,
        store,
        stop,
        handle,
    } = start().await;

    let status = client
        .create(CreateRequest {
            api_version: "2".to_string(),
            participant: Some(participant("P001", "555-1000")),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unimplemented);
    assert_eq!(
        status.message(),
        "unsupported API version requested: current service implements version '1', but version '2' was requested"
    );
    assert!(store.is_empty().unwrap());

    drop(client);
    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn at_loopback_03_concurrent_clients_same_id_one_winner() {
    let Running {
        client,
        store,
        stop,
        handle,
    } = start().await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let mut client = client.clone();
        tasks.push(tokio::spawn(async move {
            client
                .create(CreateRequest {
                    api_version: "1".to_string(),
                    participant: Some(participant("P001", &format!("555-{i}"))),
                })
                .await
        }));
    }
    let mut ok = 0;
    let mut dup = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => ok += 1,
            Err(status) if status.code() == Code::AlreadyExists => dup += 1,
            Err(status) => panic!("unexpected status: {status}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(dup, 15);
    assert_eq!(store.len().unwrap(), 1);

    drop(client);
    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
