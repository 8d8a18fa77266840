//! Telegram adapter (teloxide).
//!
//! This crate implements the `rcb-core` MessagingPort over the Telegram Bot API
//! and turns Telegram updates into router events.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};

pub mod handlers;
pub mod router;

use rcb_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    formatting::convert_markdown_to_html,
    messaging::{port::MessagingPort, types::Menu},
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    /// Body and parse mode for a message: formatted text goes out as HTML.
    fn render(text: &str, formatted: bool) -> (String, Option<ParseMode>) {
        if formatted {
            (convert_markdown_to_html(text), Some(ParseMode::Html))
        } else {
            (text.to_string(), None)
        }
    }

    fn markup(menu: &Menu) -> InlineKeyboardMarkup {
        let rows: Vec<Vec<InlineKeyboardButton>> = menu
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action_id.clone()))
                    .collect()
            })
            .collect();
        InlineKeyboardMarkup::new(rows)
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str, formatted: bool) -> Result<MessageRef> {
        let (body, mode) = Self::render(text, formatted);
        let mut req = self.bot.send_message(Self::tg_chat(chat_id), body);
        if let Some(mode) = mode {
            req = req.parse_mode(mode);
        }
        let msg = req.await.map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_menu(
        &self,
        chat_id: ChatId,
        text: &str,
        menu: &Menu,
        formatted: bool,
    ) -> Result<MessageRef> {
        let (body, mode) = Self::render(text, formatted);
        let mut req = self
            .bot
            .send_message(Self::tg_chat(chat_id), body)
            .reply_markup(Self::markup(menu));
        if let Some(mode) = mode {
            req = req.parse_mode(mode);
        }
        let msg = req.await.map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_text(&self, msg: MessageRef, text: &str, formatted: bool) -> Result<()> {
        let (body, mode) = Self::render(text, formatted);
        let mut req = self.bot.edit_message_text(
            Self::tg_chat(msg.chat_id),
            Self::tg_msg_id(msg.message_id),
            body,
        );
        if let Some(mode) = mode {
            req = req.parse_mode(mode);
        }
        req.await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcb_core::messaging::types::MenuAction;

    #[test]
    fn formatted_text_is_rendered_as_html() {
        let (body, mode) = TelegramMessenger::render("*Bot Status*", true);
        assert_eq!(body, "<b>Bot Status</b>");
        assert_eq!(mode, Some(ParseMode::Html));
    }

    #[test]
    fn plain_text_is_sent_verbatim() {
        let (body, mode) = TelegramMessenger::render("a <b> *c*", false);
        assert_eq!(body, "a <b> *c*");
        assert_eq!(mode, None);
    }

    #[test]
    fn menu_rows_map_to_keyboard_rows() {
        let markup = TelegramMessenger::markup(&Menu::one_per_row(&MenuAction::ALL));
        assert_eq!(markup.inline_keyboard.len(), 3);
        assert!(markup.inline_keyboard.iter().all(|row| row.len() == 1));
        assert_eq!(markup.inline_keyboard[0][0].text, "▶️ Run DM Script Now");
    }
}
