use crate::domain::{ChatId, MessageRef};

/// Inbound event, already stripped of transport details.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// Slash command; `name` has no leading `/` and no `@botname` suffix.
    Command { name: String, chat_id: ChatId },
    /// Inline button press. `message` is the message that carried the menu.
    ButtonPress {
        data: String,
        chat_id: ChatId,
        message: Option<MessageRef>,
    },
    /// Daily scheduler tick. Has no originating chat.
    TimerTick,
}

impl InboundEvent {
    pub fn command(name: impl Into<String>, chat_id: ChatId) -> Self {
        Self::Command {
            name: name.into(),
            chat_id,
        }
    }

    pub fn button(data: impl Into<String>, chat_id: ChatId) -> Self {
        Self::ButtonPress {
            data: data.into(),
            chat_id,
            message: None,
        }
    }

    /// Chat the event came from, if any.
    pub fn origin(&self) -> Option<ChatId> {
        match self {
            Self::Command { chat_id, .. } | Self::ButtonPress { chat_id, .. } => Some(*chat_id),
            Self::TimerTick => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub action_id: String,
}

/// Inline keyboard: ordered rows of ordered buttons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    /// One button per row, in the order given.
    pub fn one_per_row(actions: &[MenuAction]) -> Self {
        let rows = actions
            .iter()
            .map(|a| {
                vec![MenuButton {
                    label: a.label().to_string(),
                    action_id: a.as_str().to_string(),
                }]
            })
            .collect();
        Self { rows }
    }

    #[cfg(test)]
    pub(crate) fn action_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().flatten().map(|b| b.action_id.as_str())
    }
}

/// The actions offered by the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    RunDms,
    DmReport,
    ViewLog,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [Self::RunDms, Self::DmReport, Self::ViewLog];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RunDms => "run_dms",
            Self::DmReport => "dm_report",
            Self::ViewLog => "view_log",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RunDms => "▶️ Run DM Script Now",
            Self::DmReport => "📊 View DM Report",
            Self::ViewLog => "📋 Request Log File",
        }
    }

    pub fn parse(action_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == action_id)
    }
}

/// A message the router wants delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub markup: Option<Menu>,
    pub formatted: bool,
    /// Replace the text of this message instead of sending a new one.
    pub edit: Option<MessageRef>,
}

impl OutboundMessage {
    pub fn plain(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            markup: None,
            formatted: false,
            edit: None,
        }
    }

    pub fn formatted(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            formatted: true,
            ..Self::plain(chat_id, text)
        }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.markup = Some(menu);
        self
    }

    pub fn editing(mut self, target: Option<MessageRef>) -> Self {
        self.edit = target;
        self
    }
}
