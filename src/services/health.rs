use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::content::ContentIndex;
use crate::services::reminder::ReminderScheduler;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub content: ContentHealth,
    pub reminders: ReminderHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentHealth {
    pub articles: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReminderHealth {
    pub active_chats: usize,
    pub paused_chats: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<ReminderScheduler>,
    pub index: Arc<ContentIndex>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(scheduler: Arc<ReminderScheduler>, index: Arc<ContentIndex>) -> Self {
        let state = AppState {
            scheduler,
            index,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = state.scheduler.counts().await;
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let status = if state.index.is_empty() { "degraded" } else { "healthy" };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        content: ContentHealth {
            articles: state.index.len(),
        },
        reminders: ReminderHealth {
            active_chats: counts.active,
            paused_chats: counts.paused,
        },
        uptime_seconds: uptime,
    })
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    // Inline search is useless without content.
    if state.index.is_empty() {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    } else {
        Ok(Json("ready"))
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::transport::{InlineArticle, Transport};
    use crate::content::Article;
    use crate::error::Result;
    use crate::services::reminder::ReminderSettings;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use std::collections::HashSet;
    use std::time::Duration;
    use teloxide::types::{BotCommand, ChatId, MessageId, UserId};

    struct SilentTransport;

    #[async_trait]
    impl Transport for SilentTransport {
        async fn send_message(&self, _: ChatId, _: &str, _: Option<MessageId>) -> Result<MessageId> {
            Ok(MessageId(1))
        }
        async fn delete_message(&self, _: ChatId, _: MessageId) -> Result<()> {
            Ok(())
        }
        async fn forward_message(&self, _: ChatId, _: ChatId, _: MessageId) -> Result<()> {
            Ok(())
        }
        async fn pinned_message(&self, _: ChatId) -> Result<Option<MessageId>> {
            Ok(None)
        }
        async fn chat_administrators(&self, _: ChatId) -> Result<HashSet<UserId>> {
            Ok(HashSet::new())
        }
        async fn answer_inline_query(&self, _: &str, _: Vec<InlineArticle>) -> Result<()> {
            Ok(())
        }
        async fn register_commands(&self, _: Vec<BotCommand>) -> Result<()> {
            Ok(())
        }
    }

    fn create_test_health_service(articles: Vec<Article>) -> (HealthService, Arc<ReminderScheduler>) {
        let scheduler = Arc::new(ReminderScheduler::new(
            Arc::new(SilentTransport),
            ReminderSettings::new(Duration::from_secs(1800), "reminder"),
        ));
        let index = Arc::new(ContentIndex::build(articles));
        (HealthService::new(scheduler.clone(), index), scheduler)
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_reminders() {
        let (health_service, scheduler) =
            create_test_health_service(vec![Article::new("a", "Legal help", "", &[])]);
        scheduler.start(ChatId(-100)).await;
        scheduler.start(ChatId(-200)).await;
        scheduler.stop(ChatId(-200)).await;

        let server = TestServer::new(health_service.router).expect("Failed to create test server");
        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let health: HealthResponse = response.json();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(health.content.articles, 1);
        assert_eq!(health.reminders.active_chats, 1);
        assert_eq!(health.reminders.paused_chats, 1);

        scheduler.shutdown().await;
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let (health_service, _) = create_test_health_service(vec![Article::new("a", "Legal", "", &[])]);
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let ready: String = response.json();
        assert_eq!(ready, "ready");
    }

    #[tokio::test]
    async fn test_readiness_fails_without_content() {
        let (health_service, _) = create_test_health_service(Vec::new());
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let (health_service, _) = create_test_health_service(Vec::new());
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/live").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let alive: String = response.json();
        assert_eq!(alive, "alive");
    }
}
