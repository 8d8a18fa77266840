//! Telegram update handlers.
//!
//! Each handler only translates a Telegram update into an `InboundEvent`,
//! lets the core router decide, and delivers the result. Authorization is the
//! router's job, not the handlers'.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use rcb_core::{delivery::deliver, messaging::types::InboundEvent};

use crate::router::AppState;

mod callback;
mod commands;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.starts_with('/') {
        return Ok(());
    }

    let Some(event) = commands::command_event(text, msg.chat.id, &state.bot_username) else {
        return Ok(());
    };
    dispatch_and_deliver(&state, event).await;
    Ok(())
}

async fn dispatch_and_deliver(state: &AppState, event: InboundEvent) {
    let out = state.router.dispatch(&event);
    if out.is_empty() {
        return;
    }
    if let Err(e) = deliver(state.messenger.as_ref(), &out).await {
        tracing::warn!(error = %e, ?event, "failed to deliver reply");
    }
}
