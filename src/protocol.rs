use serde::Deserialize;

use crate::forge::types::CommentEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Comment(CommentEvent),
    Exit,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireMessage {
    Comment(CommentEvent),
    Exit,
}

pub fn parse_client_message(line: &str) -> Result<ClientMessage, serde_json::Error> {
    let wire: WireMessage = serde_json::from_str(line)?;
    let message = match wire {
        WireMessage::Comment(event) => ClientMessage::Comment(event),
        WireMessage::Exit => ClientMessage::Exit,
    };
    Ok(message)
}
