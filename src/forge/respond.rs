use crate::forge::types::CommentEvent;

/// Plain-text failure reply: author mention, the message, and the original
/// comment quoted with its permalink so the report stays attributable.
pub fn format_reply(event: &CommentEvent, message: &str) -> String {
    let mut reply = format!("@{}: {}\n\n", event.author, message);
    reply.push_str(&format!("In response to [this comment]({}):\n\n", event.html_url));
    for line in event.body.lines() {
        reply.push_str("> ");
        reply.push_str(line);
        reply.push('\n');
    }
    reply
}
