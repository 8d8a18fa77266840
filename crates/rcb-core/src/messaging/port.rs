use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::Menu,
    Result,
};

/// Outbound side of the transport.
///
/// `formatted` asks the adapter to render the `*bold*` Markdown subset; plain
/// text is sent verbatim.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str, formatted: bool) -> Result<MessageRef>;

    async fn send_menu(
        &self,
        chat_id: ChatId,
        text: &str,
        menu: &Menu,
        formatted: bool,
    ) -> Result<MessageRef>;

    async fn edit_text(&self, msg: MessageRef, text: &str, formatted: bool) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}
