use super::HandlerError;
use crate::bot::router::{CommandRouter, Inbound};
use std::sync::Arc;
use teloxide::prelude::*;

pub async fn inline_query_handler(q: InlineQuery, router: Arc<CommandRouter>) -> Result<(), HandlerError> {
    router
        .route(Inbound::InlineQuery {
            id: q.id,
            query: q.query,
        })
        .await;
    Ok(())
}
