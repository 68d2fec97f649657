/// A single entry in the concierge transcript. Entries are never edited or
/// removed once appended.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub sources: Vec<Citation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn model(text: impl Into<String>, sources: Vec<Citation>) -> Self {
        ChatMessage {
            role: Role::Model,
            text: text.into(),
            sources,
        }
    }
}

/// A web source the gateway grounded a reply on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

const CHIP_LABEL_MAX: usize = 20;

impl Citation {
    /// Both fields must carry text for the citation to be shown.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.uri.trim().is_empty()
    }

    /// Label for the source chip: the title, truncated to 20 characters
    /// with an ellipsis when longer.
    pub fn chip_label(&self) -> String {
        if self.title.chars().count() > CHIP_LABEL_MAX {
            let head: String = self.title.chars().take(CHIP_LABEL_MAX).collect();
            format!("{head}…")
        } else {
            self.title.clone()
        }
    }
}

pub const WELCOME: &str = "Welcome to LuxeDrive. How can I assist you with our fleet today?";

/// Ordered, append-only transcript for one widget session. Seeded with the
/// concierge's welcome line; no persistence, dies with the process.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Conversation {
            messages: vec![ChatMessage::model(WELCOME, Vec::new())],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Conversation::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_conversation_holds_only_welcome() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::Model);
        assert_eq!(conversation.messages()[0].text, WELCOME);
        assert!(conversation.messages()[0].sources.is_empty());
    }

    #[test]
    fn test_push_keeps_chronological_order() {
        let mut conversation = Conversation::new();
        conversation.push(ChatMessage::user("first"));
        conversation.push(ChatMessage::model("second", Vec::new()));

        let texts: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec![WELCOME, "first", "second"]);
    }

    #[test]
    fn test_incomplete_citations_are_rejected() {
        let complete = Citation {
            title: "A".to_string(),
            uri: "u1".to_string(),
        };
        let untitled = Citation {
            title: String::new(),
            uri: "u2".to_string(),
        };
        let unlinked = Citation {
            title: "B".to_string(),
            uri: String::new(),
        };

        assert!(complete.is_complete());
        assert!(!untitled.is_complete());
        assert!(!unlinked.is_complete());
    }

    #[test]
    fn test_chip_label_truncates_long_titles() {
        let long = Citation {
            title: "Extremely Long Charging Network Name".to_string(),
            uri: "https://example.com/chargers".to_string(),
        };
        assert_eq!(long.chip_label(), "Extremely Long Charg…");

        let short = Citation {
            title: "Tesla".to_string(),
            uri: "https://example.com".to_string(),
        };
        assert_eq!(short.chip_label(), "Tesla");
    }
}
