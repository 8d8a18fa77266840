use rcb_core::{domain::ChatId, messaging::types::InboundEvent};

/// A slash command split into its parts.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedCommand {
    /// Lowercase name without the leading `/`.
    pub name: String,
    /// Bot named after `@`, if any.
    pub addressee: Option<String>,
    pub args: String,
}

/// Split `/cmd@botname args` into name, addressee and arguments.
pub(crate) fn parse_command(text: &str) -> ParsedCommand {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let args = parts.next().unwrap_or("").trim().to_string();

    let mut head = first.trim_start_matches('/').splitn(2, '@');
    let name = head.next().unwrap_or("").to_lowercase();
    let addressee = head
        .next()
        .filter(|bot| !bot.is_empty())
        .map(str::to_string);

    ParsedCommand {
        name,
        addressee,
        args,
    }
}

/// Event for a command sent to this bot, or `None` when it names another bot.
pub(crate) fn command_event(
    text: &str,
    chat: teloxide::types::ChatId,
    bot_username: &str,
) -> Option<InboundEvent> {
    // Arguments are accepted and ignored; none of the commands take any.
    let cmd = parse_command(text);
    if let Some(addressee) = &cmd.addressee {
        if !addressee.eq_ignore_ascii_case(bot_username) {
            tracing::debug!(
                command = %cmd.name,
                args = %cmd.args,
                %addressee,
                "command for another bot"
            );
            return None;
        }
    }
    Some(InboundEvent::command(cmd.name, ChatId(chat.0)))
}
