#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use wellness_client::api::SessionApi;
use wellness_client::error::ClientError;
use wellness_core::error::CoreError;
use wellness_core::session::memory::MemorySessionStore;
use wellness_core::session::service::SessionService;
use wellness_core::session::transition::TransitionPolicy;
use wellness_core::session::{Session, SessionInput, SessionStatus};
use wellness_core::types::{DbId, SessionId};

pub const OWNER: DbId = 7;

/// One request as seen by [`FakeApi`], recorded when it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SaveDraft { session_id: Option<String>, title: String },
    Publish { session_id: Option<String>, title: String },
    Get(SessionId),
}

/// In-process [`SessionApi`] over the real lifecycle service.
pub struct FakeApi {
    pub store: Arc<MemorySessionStore>,
    service: SessionService,
    latency: Duration,
    fail: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Self::with_latency(Duration::ZERO)
    }

    /// Every call waits `latency` (in Tokio time) after being recorded.
    pub fn with_latency(latency: Duration) -> Arc<Self> {
        let store = Arc::new(MemorySessionStore::new());
        Arc::new(Self {
            service: SessionService::new(store.clone(), TransitionPolicy::default()),
            store,
            latency,
            fail: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn service(&self) -> &SessionService {
        &self.service
    }

    /// Make every following upsert fail with a 500.
    pub fn fail_upserts(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn upsert(
        &self,
        input: &SessionInput,
        target: SessionStatus,
    ) -> Result<Session, ClientError> {
        let call = match target {
            SessionStatus::Draft => Call::SaveDraft {
                session_id: input.session_id.clone(),
                title: input.title.clone().unwrap_or_default(),
            },
            SessionStatus::Published => Call::Publish {
                session_id: input.session_id.clone(),
                title: input.title.clone().unwrap_or_default(),
            },
        };
        self.calls.lock().unwrap().push(call);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Rejected {
                status: 500,
                message: "An internal error occurred".to_string(),
                details: Vec::new(),
            });
        }

        self.service
            .upsert(OWNER, input, target)
            .await
            .map_err(to_client_error)
    }
}

fn to_client_error(err: CoreError) -> ClientError {
    match err {
        CoreError::NotFound { .. } => ClientError::NotFound,
        CoreError::Unauthorized(_) => ClientError::Unauthorized,
        CoreError::Validation(details) => ClientError::Rejected {
            status: 400,
            message: "Validation failed".to_string(),
            details,
        },
        CoreError::BadRequest(message) => ClientError::Rejected {
            status: 400,
            message,
            details: Vec::new(),
        },
        CoreError::Conflict(message) => ClientError::Rejected {
            status: 409,
            message,
            details: Vec::new(),
        },
        CoreError::Internal(_) => ClientError::Rejected {
            status: 500,
            message: "An internal error occurred".to_string(),
            details: Vec::new(),
        },
    }
}

#[async_trait]
impl SessionApi for FakeApi {
    async fn save_draft(&self, input: &SessionInput) -> Result<Session, ClientError> {
        self.upsert(input, SessionStatus::Draft).await
    }

    async fn publish(&self, input: &SessionInput) -> Result<Session, ClientError> {
        self.upsert(input, SessionStatus::Published).await
    }

    async fn get_owned(&self, id: SessionId) -> Result<Session, ClientError> {
        self.calls.lock().unwrap().push(Call::Get(id));
        self.service
            .get_owned(OWNER, id)
            .await
            .map_err(to_client_error)
    }
}

/// Let spawned tasks that are ready run to completion.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub async fn advance(secs: f64) {
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    settle().await;
}
