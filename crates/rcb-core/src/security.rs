use crate::domain::ChatId;

// ============== Authorization ==============

/// Single identity check for every inbound event.
///
/// Events without an originating chat (scheduler ticks) are internal and
/// always pass; anything else must come from the authorized chat.
pub fn is_authorized(origin: Option<ChatId>, authorized: ChatId) -> bool {
    match origin {
        Some(chat_id) => chat_id == authorized,
        None => true,
    }
}
