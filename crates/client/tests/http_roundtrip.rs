//! End-to-end: the real router on a loopback listener, driven by
//! `HttpSessionApi` and `SessionEditor`.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use wellness_api::auth::jwt::{generate_access_token, JwtConfig};
use wellness_api::config::ServerConfig;
use wellness_api::router::build_app_router;
use wellness_api::state::AppState;
use wellness_client::api::{HttpSessionApi, SessionApi};
use wellness_client::autosave::{AutoSaveConfig, AutoSaveStatus};
use wellness_client::editor::SessionEditor;
use wellness_client::error::ClientError;
use wellness_core::session::memory::MemorySessionStore;
use wellness_core::session::service::SessionService;
use wellness_core::session::transition::TransitionPolicy;
use wellness_core::session::{SessionInput, SessionStatus};
use wellness_core::types::SessionId;

struct Server {
    base_url: String,
    jwt: JwtConfig,
}

impl Server {
    fn api_for(&self, user: i64) -> HttpSessionApi {
        let token = generate_access_token(user, &self.jwt).unwrap();
        HttpSessionApi::new(self.base_url.clone(), token)
    }
}

async fn spawn_server() -> Server {
    let jwt = JwtConfig {
        secret: "loopback-test-secret".to_string(),
        access_token_expiry_mins: 15,
    };
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        allow_unpublish: true,
        database_url: None,
        jwt: jwt.clone(),
    };
    let state = AppState {
        sessions: SessionService::new(
            Arc::new(MemorySessionStore::new()),
            TransitionPolicy::default(),
        ),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Server {
        base_url: format!("http://{addr}"),
        jwt,
    }
}

fn input(title: &str) -> SessionInput {
    SessionInput {
        session_id: None,
        title: Some(title.to_string()),
        tags: Some("Yoga, Morning".to_string()),
        resource_url: Some("https://example.com/yoga.json".to_string()),
    }
}

#[tokio::test]
async fn draft_then_publish_over_http() {
    let server = spawn_server().await;
    let api = server.api_for(1);

    let draft = api.save_draft(&input("Morning Yoga")).await.unwrap();
    assert_eq!(draft.status, SessionStatus::Draft);
    assert_eq!(draft.tags, vec!["yoga", "morning"]);

    let mut update = input("Morning Yoga");
    update.session_id = Some(draft.id.to_string());
    let published = api.publish(&update).await.unwrap();
    assert_eq!(published.id, draft.id);
    assert_eq!(published.status, SessionStatus::Published);
    assert_eq!(published.created_at, draft.created_at);
    assert!(published.updated_at > draft.updated_at);

    let fetched = api.get_owned(draft.id).await.unwrap();
    assert_eq!(fetched, published);
}

#[tokio::test]
async fn server_errors_map_onto_client_errors() {
    let server = spawn_server().await;
    let alice = server.api_for(1);
    let bob = server.api_for(2);

    let err = alice.save_draft(&input("  ")).await.unwrap_err();
    assert_matches!(err, ClientError::Rejected { status: 400, details, .. } => {
        assert_eq!(details, vec!["Title is required".to_string()]);
    });

    let created = alice.save_draft(&input("Mine")).await.unwrap();
    let err = bob.get_owned(created.id).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound);

    let err = alice.get_owned(SessionId::now_v7()).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound);

    let forged = HttpSessionApi::new(server.base_url.clone(), "not-a-jwt");
    let err = forged.save_draft(&input("Nope")).await.unwrap_err();
    assert_matches!(err, ClientError::Unauthorized);
}

#[tokio::test]
async fn editor_auto_saves_then_publishes_against_the_real_server() {
    let server = spawn_server().await;
    let api = Arc::new(server.api_for(1));
    let config = AutoSaveConfig {
        debounce: Duration::from_millis(50),
        saved_display: Duration::from_secs(10),
    };
    let editor = SessionEditor::new(api.clone(), config);
    let mut rx = editor.subscribe();

    editor.set_title("Morning Yoga");
    editor.set_resource_url("https://example.com/yoga.json");

    tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|status| *status == AutoSaveStatus::Saved),
    )
    .await
    .expect("auto-save did not complete")
    .unwrap();

    let id = editor.session_id().unwrap();
    assert_eq!(api.get_owned(id).await.unwrap().status, SessionStatus::Draft);

    let published = editor.publish().await.unwrap();
    assert_eq!(published.id, id);
    assert_eq!(published.status, SessionStatus::Published);
}
