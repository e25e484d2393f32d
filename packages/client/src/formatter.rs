//! Message formatting utilities for client display.

use roomchat_server::infrastructure::dto::websocket::ServerEvent;

const ARCHIVE_SEPARATOR: &str = "<br>";
const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one server event for the terminal
    ///
    /// # Arguments
    ///
    /// * `event` - The event received from the server
    /// * `me` - This client's member name (to mark as "me")
    pub fn format_event(event: &ServerEvent, me: &str) -> String {
        match event {
            ServerEvent::Connect {
                chat,
                admin,
                archive,
                ..
            } => Self::format_connect(chat, admin, archive, me),
            ServerEvent::Join { name, chat_users } => {
                format!("\n+ {} joined {}\n", name, Self::format_users(chat_users, me))
            }
            ServerEvent::Sent { name, text } => format!("\n@{}: {}\n", name, text),
            ServerEvent::Disconnect { name, chat_users } => {
                format!("\n- {} left {}\n", name, Self::format_users(chat_users, me))
            }
            ServerEvent::Interrupt { message, .. } => format!("\n! {}\n", message),
        }
    }

    fn format_connect(chat: &str, admin: &str, archive: &str, me: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Room '{}' (admin: {})\n", chat, admin));
        if admin == me {
            output.push_str("You are the admin. Use /kick <name> to remove a member.\n");
        }
        if !archive.is_empty() {
            output.push_str("History:\n");
            for line in archive.split(ARCHIVE_SEPARATOR) {
                output.push_str(&format!("  {}\n", line));
            }
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    fn format_users(users: &[String], me: &str) -> String {
        let names: Vec<String> = users
            .iter()
            .map(|user| {
                if user == me {
                    format!("{} (me)", user)
                } else {
                    user.clone()
                }
            })
            .collect();
        format!("[{}]", names.join(", "))
    }
}
