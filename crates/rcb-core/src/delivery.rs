use crate::{
    domain::MessageRef,
    messaging::{port::MessagingPort, types::OutboundMessage},
    Result,
};

/// Deliver router output in order, stopping at the first transport error.
///
/// Returns a reference for every delivered message (edits return the edited
/// message's reference).
pub async fn deliver(port: &dyn MessagingPort, out: &[OutboundMessage]) -> Result<Vec<MessageRef>> {
    let mut sent = Vec::with_capacity(out.len());
    for msg in out {
        let r = match (&msg.edit, &msg.markup) {
            (Some(target), _) => {
                port.edit_text(*target, &msg.text, msg.formatted).await?;
                *target
            }
            (None, Some(menu)) => {
                port.send_menu(msg.chat_id, &msg.text, menu, msg.formatted)
                    .await?
            }
            (None, None) => port.send_text(msg.chat_id, &msg.text, msg.formatted).await?,
        };
        sent.push(r);
    }
    Ok(sent)
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::testing::{Call, RecordingMessenger};
    use super::*;
    use crate::{
        config::Config,
        domain::{ChatId, MessageId},
        messaging::types::InboundEvent,
        router::CommandRouter,
    };

    const ME: ChatId = ChatId(10);

    fn router() -> CommandRouter {
        fn day() -> NaiveDate {
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
        }
        CommandRouter::with_clock(Arc::new(Config::for_chat(ME)), day)
    }

    #[tokio::test]
    async fn start_is_delivered_as_a_menu() {
        let port = RecordingMessenger::default();
        let out = router().dispatch(&InboundEvent::command("start", ME));
        let refs = deliver(&port, &out).await.unwrap();
        assert_eq!(refs.len(), 1);

        let calls = port.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::Menu { chat_id, menu, .. } => {
                assert_eq!(*chat_id, ME);
                assert_eq!(menu.rows.len(), 3);
            }
            other => panic!("expected menu send, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_dms_edits_then_sends() {
        let port = RecordingMessenger::default();
        let origin = MessageRef {
            chat_id: ME,
            message_id: MessageId(5),
        };
        let out = router().dispatch(&InboundEvent::ButtonPress {
            data: "run_dms".to_string(),
            chat_id: ME,
            message: Some(origin),
        });
        let refs = deliver(&port, &out).await.unwrap();
        assert_eq!(refs[0], origin);

        let calls = port.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::Edit { msg, .. } if *msg == origin));
        assert!(matches!(
            &calls[1],
            Call::Text { chat_id, formatted: false, .. } if *chat_id == ME
        ));
    }

    #[tokio::test]
    async fn stops_at_first_transport_error() {
        let port = RecordingMessenger::failing_at(0);
        let out = router().dispatch(&InboundEvent::button("run_dms", ME));
        assert_eq!(out.len(), 2);
        assert!(deliver(&port, &out).await.is_err());
        assert!(port.calls().is_empty());
    }

    #[tokio::test]
    async fn nothing_to_deliver_is_ok() {
        let port = RecordingMessenger::default();
        let refs = deliver(&port, &[]).await.unwrap();
        assert!(refs.is_empty());
        assert!(port.calls().is_empty());
    }
}
