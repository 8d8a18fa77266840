//! Command router: maps an inbound event to the messages it produces.
//!
//! Dispatch is pure given the event, the config and the clock. Every event
//! goes through the same authorization guard before any handler runs.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::{
    config::Config,
    domain::{ChatId, MessageRef},
    messaging::types::{InboundEvent, Menu, MenuAction, OutboundMessage},
    replies,
    security::is_authorized,
};

/// Why an event produced no output. Never surfaced to the sender.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("event from unauthorized chat {chat_id}")]
    Unauthorized { chat_id: ChatId },

    #[error("unrecognized action: {0:?}")]
    UnrecognizedAction(String),

    #[error("unrecognized command: {0:?}")]
    UnrecognizedCommand(String),
}

/// Source of "today" for the daily report.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct CommandRouter {
    cfg: Arc<Config>,
    today: Clock,
}

impl CommandRouter {
    pub fn new(cfg: Arc<Config>) -> Self {
        Self::with_clock(cfg, local_today)
    }

    pub fn with_clock(cfg: Arc<Config>, today: Clock) -> Self {
        Self { cfg, today }
    }

    pub fn authorized_chat(&self) -> ChatId {
        self.cfg.authorized_chat_id
    }

    /// Route an event, dropping rejected ones silently.
    pub fn dispatch(&self, event: &InboundEvent) -> Vec<OutboundMessage> {
        match self.route(event) {
            Ok(out) => out,
            Err(rejection) => {
                tracing::debug!(%rejection, "dropping event");
                Vec::new()
            }
        }
    }

    /// Route an event, reporting why nothing was produced.
    pub fn route(&self, event: &InboundEvent) -> Result<Vec<OutboundMessage>, Rejection> {
        let authorized = self.authorized_chat();
        if !is_authorized(event.origin(), authorized) {
            return Err(Rejection::Unauthorized {
                chat_id: event.origin().unwrap_or(authorized),
            });
        }

        match event {
            InboundEvent::Command { name, .. } => self.on_command(name),
            InboundEvent::ButtonPress { data, message, .. } => self.on_button(data, *message),
            InboundEvent::TimerTick => Ok(self.on_timer()),
        }
    }

    fn on_command(&self, name: &str) -> Result<Vec<OutboundMessage>, Rejection> {
        let chat = self.authorized_chat();
        let msg = match name.to_ascii_lowercase().as_str() {
            "start" => OutboundMessage::plain(chat, replies::welcome())
                .with_menu(Menu::one_per_row(&MenuAction::ALL)),
            "status" => OutboundMessage::formatted(chat, replies::status()),
            "help" => OutboundMessage::formatted(chat, replies::help()),
            other => return Err(Rejection::UnrecognizedCommand(other.to_string())),
        };
        Ok(vec![msg])
    }

    fn on_button(
        &self,
        data: &str,
        origin: Option<MessageRef>,
    ) -> Result<Vec<OutboundMessage>, Rejection> {
        let chat = self.authorized_chat();
        let action = MenuAction::parse(data)
            .ok_or_else(|| Rejection::UnrecognizedAction(data.to_string()))?;

        let out = match action {
            MenuAction::RunDms => vec![
                OutboundMessage::plain(chat, replies::run_dms_ack()).editing(origin),
                OutboundMessage::plain(chat, replies::run_dms_confirmation()),
            ],
            MenuAction::DmReport => vec![OutboundMessage::formatted(chat, replies::dm_report())],
            MenuAction::ViewLog => vec![OutboundMessage::plain(chat, replies::view_log())],
        };
        Ok(out)
    }

    fn on_timer(&self) -> Vec<OutboundMessage> {
        vec![OutboundMessage::formatted(
            self.authorized_chat(),
            replies::daily_report((self.today)()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageId;

    const ME: ChatId = ChatId(987_654_321);
    const STRANGER: ChatId = ChatId(1_234);

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn router() -> CommandRouter {
        CommandRouter::with_clock(Arc::new(Config::for_chat(ME)), fixed_day)
    }

    fn all_user_events(chat_id: ChatId) -> Vec<InboundEvent> {
        let mut events: Vec<InboundEvent> = ["start", "status", "help", "nope"]
            .into_iter()
            .map(|c| InboundEvent::command(c, chat_id))
            .collect();
        events.extend(
            ["run_dms", "dm_report", "view_log", "unknown_action"]
                .into_iter()
                .map(|d| InboundEvent::button(d, chat_id)),
        );
        events
    }

    #[test]
    fn unauthorized_chat_gets_nothing() {
        let r = router();
        for event in all_user_events(STRANGER) {
            assert!(r.dispatch(&event).is_empty(), "{event:?}");
            assert_eq!(
                r.route(&event),
                Err(Rejection::Unauthorized { chat_id: STRANGER })
            );
        }
    }

    #[test]
    fn start_sends_menu_with_three_actions_in_order() {
        let out = router().dispatch(&InboundEvent::command("start", ME));
        assert_eq!(out.len(), 1);
        let msg = &out[0];
        assert_eq!(msg.chat_id, ME);
        assert!(msg.text.contains("Welcome"));
        let menu = msg.markup.as_ref().expect("start attaches a menu");
        assert_eq!(menu.rows.len(), 3);
        assert_eq!(
            menu.action_ids().collect::<Vec<_>>(),
            vec!["run_dms", "dm_report", "view_log"]
        );
        assert!(menu.rows[0][0].label.contains("Run DM Script Now"));
        assert!(menu.rows[1][0].label.contains("View DM Report"));
        assert!(menu.rows[2][0].label.contains("Request Log File"));
    }

    #[test]
    fn status_and_help_are_single_formatted_messages() {
        let r = router();
        for name in ["status", "help", "HELP"] {
            let out = r.dispatch(&InboundEvent::command(name, ME));
            assert_eq!(out.len(), 1, "{name}");
            assert!(out[0].formatted);
            assert!(out[0].markup.is_none());
        }
        let help = &r.dispatch(&InboundEvent::command("help", ME))[0].text;
        for cmd in ["/start", "/status", "/help"] {
            assert!(help.contains(cmd));
        }
    }

    #[test]
    fn unknown_command_is_ignored() {
        let r = router();
        let event = InboundEvent::command("report", ME);
        assert!(r.dispatch(&event).is_empty());
        assert_eq!(
            r.route(&event),
            Err(Rejection::UnrecognizedCommand("report".to_string()))
        );
    }

    #[test]
    fn run_dms_edits_origin_then_confirms() {
        let origin = MessageRef {
            chat_id: ME,
            message_id: MessageId(77),
        };
        let event = InboundEvent::ButtonPress {
            data: "run_dms".to_string(),
            chat_id: ME,
            message: Some(origin),
        };
        let out = router().dispatch(&event);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|m| m.chat_id == ME));
        assert_eq!(out[0].edit, Some(origin));
        assert!(out[0].text.contains("Command sent to your PC"));
        assert_eq!(out[1].edit, None);
        assert!(out[1].text.contains("DM trigger command sent"));
    }

    #[test]
    fn run_dms_without_origin_still_sends_two() {
        let out = router().dispatch(&InboundEvent::button("run_dms", ME));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|m| m.chat_id == ME && m.edit.is_none()));
    }

    #[test]
    fn report_is_formatted_and_log_is_plain() {
        let r = router();
        let report = r.dispatch(&InboundEvent::button("dm_report", ME));
        assert_eq!(report.len(), 1);
        assert!(report[0].formatted);

        let log = r.dispatch(&InboundEvent::button("view_log", ME));
        assert_eq!(log.len(), 1);
        assert!(!log[0].formatted);
    }

    #[test]
    fn unknown_action_is_ignored() {
        let r = router();
        let event = InboundEvent::button("unknown_action", ME);
        assert!(r.dispatch(&event).is_empty());
        assert_eq!(
            r.route(&event),
            Err(Rejection::UnrecognizedAction("unknown_action".to_string()))
        );
    }

    #[test]
    fn timer_tick_reports_today_to_authorized_chat() {
        let out = router().dispatch(&InboundEvent::TimerTick);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].chat_id, ME);
        assert!(out[0].formatted);
        assert!(out[0].text.contains("17 Oct 2026"));
    }

    #[test]
    fn timer_tick_uses_the_local_calendar_by_default() {
        let r = CommandRouter::new(Arc::new(Config::for_chat(ME)));
        let before = Local::now().date_naive();
        let out = r.dispatch(&InboundEvent::TimerTick);
        let after = Local::now().date_naive();
        let text = &out[0].text;
        assert!(
            text.contains(&before.format(replies::REPORT_DATE_FORMAT).to_string())
                || text.contains(&after.format(replies::REPORT_DATE_FORMAT).to_string())
        );
    }

    #[test]
    fn dispatch_is_idempotent() {
        let r = router();
        let mut events = all_user_events(ME);
        events.push(InboundEvent::TimerTick);
        for event in events {
            assert_eq!(r.dispatch(&event), r.dispatch(&event), "{event:?}");
        }
    }
}
