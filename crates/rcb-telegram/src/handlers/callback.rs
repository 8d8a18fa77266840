use std::sync::Arc;

use teloxide::prelude::*;

use rcb_core::{
    domain::{ChatId, MessageId, MessageRef},
    messaging::types::InboundEvent,
};

use crate::router::AppState;

use super::dispatch_and_deliver;

/// Button press from a message the bot sent.
///
/// `None` when the callback carries no data or its message is no longer
/// available (too old, inline mode).
pub(crate) fn button_event(q: &CallbackQuery) -> Option<InboundEvent> {
    let msg = q.message.as_ref()?;
    let data = q.data.clone().filter(|d| !d.is_empty())?;
    let chat_id = ChatId(msg.chat.id.0);

    Some(InboundEvent::ButtonPress {
        data,
        chat_id,
        message: Some(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        }),
    })
}

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    // Always answer so the client stops its spinner; the answer carries no text.
    if let Err(e) = state.messenger.answer_callback(&q.id).await {
        tracing::debug!(error = %e, "failed to answer callback query");
    }

    let Some(event) = button_event(&q) else {
        return Ok(());
    };

    dispatch_and_deliver(&state, event).await;
    Ok(())
}
