//! HTTP API.
//!
//! # Endpoints
//!
//! - `POST /events/pool-initialized`    – signed event delivery
//! - `GET  /pool-initializations/{id}`  – record by event id
//! - `GET  /pool-initializations`       – records in ascending id order

pub mod extractors;
mod ingest;
mod pool_initializations;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use poolidx_core::identity::InvalidEventId;
use poolidx_core::pool_config::ConfigLengthError;
use poolidx_core::store::StoreError;

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/events/pool-initialized",
            post(ingest::ingest_pool_initialized),
        )
        .route(
            "/pool-initializations",
            get(pool_initializations::list_pool_initializations),
        )
        .route(
            "/pool-initializations/{id}",
            get(pool_initializations::get_pool_initialization),
        )
}

/// Errors that can occur in API handlers.
#[derive(Debug)]
enum ApiError {
    /// The delivered config is not exactly 32 bytes.
    InvalidConfig(ConfigLengthError),
    InvalidId(InvalidEventId),
    NotFound,
    /// The indexer runner has stopped accepting events.
    QueueClosed,
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidConfig(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            ApiError::InvalidId(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, "pool initialization not found").into_response()
            }
            ApiError::QueueClosed => {
                tracing::error!("Indexer queue closed, rejecting event");
                (StatusCode::SERVICE_UNAVAILABLE, "indexer unavailable").into_response()
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "API store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::build_router;
    use crate::state::AppState;
    use alloy_primitives::{Address, B256, Bytes, U256, address, b256};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use poolidx_core::assembler::assemble;
    use poolidx_core::config::{IngestConfig, ServerConfig, SharedConfig};
    use poolidx_core::events::{PoolInitialized, PoolInitializedReceiver, pool_initialized_channel};
    use poolidx_core::processors::{IndexOutcome, PoolInitializationIndexer};
    use poolidx_core::store::{MemoryPoolInitializationStore, PoolInitializationStore};
    use poolidx_sdk::objects::{
        BlockInfo, PoolInitializedEvent, PoolInitializedParams, PoolKey, TransactionInfo,
    };
    use poolidx_sdk::signature::{SIGNATURE_HEADER, SignedObject};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"test-secret";
    const CORE: Address = address!("4000000000000000000000000000000000000000");

    struct Harness {
        router: Router,
        state: AppState,
        store: Arc<MemoryPoolInitializationStore>,
        event_rx: PoolInitializedReceiver,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryPoolInitializationStore::new());
        let config = SharedConfig::new(
            ServerConfig {
                listen: "127.0.0.1:0".parse().unwrap(),
            },
            IngestConfig::new(SECRET.to_vec(), None),
        );
        let (event_tx, event_rx) = pool_initialized_channel();
        let state = AppState::new(store.clone(), config, event_tx);
        Harness {
            router: build_router(state.clone()),
            state,
            store,
            event_rx,
        }
    }

    /// Concentrated pool: extension 0x10..01, fee 3000, tick spacing 60.
    fn concentrated_config() -> Bytes {
        let mut config = vec![0u8; 32];
        config[0] = 0x10;
        config[19] = 0x01;
        config[20..28].copy_from_slice(&3000u64.to_be_bytes());
        config[28..].copy_from_slice(&0x8000_003Cu32.to_be_bytes());
        Bytes::from(config)
    }

    fn event(block_number: u64, config: Bytes) -> PoolInitializedEvent {
        PoolInitializedEvent {
            address: CORE,
            block: BlockInfo {
                number: block_number,
                hash: B256::repeat_byte(0xaa),
                timestamp: 1234,
            },
            transaction: TransactionInfo {
                hash: b256!("0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20"),
                index: 7,
            },
            log_index: 3,
            params: PoolInitializedParams {
                pool_id: B256::repeat_byte(0x01),
                pool_key: PoolKey {
                    token0: address!("2000000000000000000000000000000000000000"),
                    token1: address!("3000000000000000000000000000000000000000"),
                    config,
                },
                tick: 15,
                sqrt_ratio: U256::from(123456u64),
            },
        }
    }

    fn signed_request(event: PoolInitializedEvent, secret: &[u8]) -> Request<Body> {
        let signed = SignedObject::new(event, secret).unwrap();
        Request::builder()
            .method("POST")
            .uri("/events/pool-initialized")
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signed.to_header())
            .body(Body::from(signed.json))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn store_directly(store: &MemoryPoolInitializationStore, block_number: u64) {
        let event = PoolInitialized::try_from(event(block_number, concentrated_config())).unwrap();
        assert!(store.put(assemble(&event)).await.unwrap());
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let response = h.router.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ingest_then_lookup() {
        let mut h = harness();

        let response = h
            .router
            .clone()
            .oneshot(signed_request(event(99, concentrated_config()), SECRET))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(
            json_body(response).await["id"],
            "0x00000000000000630000000700000003"
        );

        // Play the runner's part for the one queued event.
        let queued = h.event_rx.recv().await.unwrap();
        let indexer =
            PoolInitializationIndexer::new(h.store.clone(), h.state.config.ingest.clone());
        assert!(matches!(
            indexer.handle(queued).await.unwrap(),
            IndexOutcome::Inserted(_)
        ));

        let response = h
            .router
            .oneshot(get(
                "/pool-initializations/0x00000000000000630000000700000003",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["fee"], 3000);
        assert_eq!(
            body["extension"],
            "0x1000000000000000000000000000000000000001"
        );
        assert_eq!(body["poolType"]["kind"], "concentrated");
        assert_eq!(body["poolType"]["tickSpacing"], 60);
        assert!(body["poolType"].get("amplification").is_none());
        assert_eq!(body["blockNumber"], 99);
        assert_eq!(body["logIndex"], 3);
    }

    #[tokio::test]
    async fn test_ingest_rejects_bad_signature() {
        let h = harness();
        let response = h
            .router
            .oneshot(signed_request(
                event(99, concentrated_config()),
                b"wrong-secret",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ingest_rejects_missing_signature() {
        let h = harness();
        let json = serde_json::to_string(&event(99, concentrated_config())).unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/events/pool-initialized")
            .header("content-type", "application/json")
            .body(Body::from(json))
            .unwrap();
        let response = h.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ingest_rejects_short_config() {
        let mut h = harness();
        let config = Bytes::from(vec![0u8; 31]);
        let response = h
            .router
            .oneshot(signed_request(event(99, config), SECRET))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(h.event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_ingest_with_closed_queue() {
        let h = harness();
        drop(h.event_rx);
        let response = h
            .router
            .oneshot(signed_request(event(99, concentrated_config()), SECRET))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_get_unknown_and_malformed_ids() {
        let h = harness();

        let response = h
            .router
            .clone()
            .oneshot(get(
                "/pool-initializations/0x00000000000000010000000000000000",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = h
            .router
            .oneshot(get("/pool-initializations/0x1234"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let h = harness();
        for block_number in [3, 1, 2] {
            store_directly(&h.store, block_number).await;
        }

        let response = h
            .router
            .clone()
            .oneshot(get("/pool-initializations?limit=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = json_body(response).await;
        let blocks: Vec<_> = page
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["blockNumber"].as_u64().unwrap())
            .collect();
        assert_eq!(blocks, vec![1, 2]);

        let response = h
            .router
            .clone()
            .oneshot(get(
                "/pool-initializations?after=0x00000000000000020000000700000003",
            ))
            .await
            .unwrap();
        let page = json_body(response).await;
        assert_eq!(page.as_array().unwrap().len(), 1);
        assert_eq!(page[0]["blockNumber"], 3);

        let response = h
            .router
            .oneshot(get("/pool-initializations?after=nothex"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sdk_client_round_trip() {
        use poolidx_sdk::client::IndexerClient;
        use poolidx_sdk::objects::ListPoolInitializationsQuery;

        let mut h = harness();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(axum::serve(listener, h.router.clone()).into_future());

        let base_url = url::Url::parse(&format!("http://{addr}")).unwrap();
        let client = IndexerClient::new(base_url, SECRET);

        let accepted = client
            .deliver(event(500, concentrated_config()))
            .await
            .unwrap();
        assert_eq!(
            accepted.id.to_string(),
            "0x00000000000001f40000000700000003"
        );

        let queued = h.event_rx.recv().await.unwrap();
        let indexer =
            PoolInitializationIndexer::new(h.store.clone(), h.state.config.ingest.clone());
        indexer.handle(queued).await.unwrap();

        let record = client.get(accepted.id).await.unwrap().unwrap();
        assert_eq!(record.block_number, 500);
        assert_eq!(record.fee, 3000);

        let missing = client
            .get(alloy_primitives::FixedBytes::ZERO)
            .await
            .unwrap();
        assert!(missing.is_none());

        let page = client
            .list(&ListPoolInitializationsQuery {
                after: None,
                limit: Some(10),
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, accepted.id);
    }
}
