pub mod inline;
pub mod message;

use crate::bot::commands::Command;
use crate::bot::router::CommandRouter;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct BotHandler {
    pub router: Arc<CommandRouter>,
}

impl BotHandler {
    pub fn new(router: Arc<CommandRouter>) -> Self {
        Self { router }
    }

    /// Update tree: commands, then join/leave notices, then inline queries.
    /// Anything else falls through unhandled.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let router = self.router.clone();
        let router_membership = self.router.clone();
        let router_inline = self.router.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |msg: Message, cmd: Command| {
                        let router = router.clone();
                        async move { message::command_handler(msg, cmd, router).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| message::is_membership_notice(&msg))
                    .endpoint(move |msg: Message| {
                        let router = router_membership.clone();
                        async move { message::membership_handler(msg, router).await }
                    }),
            )
            .branch(Update::filter_inline_query().endpoint(move |q: InlineQuery| {
                let router = router_inline.clone();
                async move { inline::inline_query_handler(q, router).await }
            }))
    }
}
