use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaximPrompt {
    pub input: String,
}

/// A maxim as it appears in the source document, before pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMaxim {
    pub number: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaximRecord {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemsDocument {
    pub poems: Vec<PoemRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaximsDocument {
    pub maxims: Vec<MaximRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MaximPromptsDocument {
    pub maxims: Vec<MaximPrompt>,
}

/// A record the formatter can turn into a user/assistant exchange.
pub trait Exchange {
    fn prompt(&self) -> &str;
    fn reply(&self) -> &str;
}

impl Exchange for PoemRecord {
    fn prompt(&self) -> &str {
        &self.input
    }

    fn reply(&self) -> &str {
        &self.output
    }
}

impl Exchange for MaximRecord {
    fn prompt(&self) -> &str {
        &self.input
    }

    fn reply(&self) -> &str {
        &self.output
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationExample {
    pub messages: Vec<Message>,
}

impl ConversationExample {
    pub fn new(system: &str, user: &str, assistant: &str) -> Self {
        ConversationExample {
            messages: vec![
                Message {
                    role: Role::System,
                    content: system.to_string(),
                },
                Message {
                    role: Role::User,
                    content: user.to_string(),
                },
                Message {
                    role: Role::Assistant,
                    content: assistant.to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_serializes_with_lowercase_roles() {
        let ex = ConversationExample::new("S", "X", "Y");
        let json = serde_json::to_string(&ex).unwrap();
        assert_eq!(
            json,
            r#"{"messages":[{"role":"system","content":"S"},{"role":"user","content":"X"},{"role":"assistant","content":"Y"}]}"#
        );
    }

    #[test]
    fn prompts_document_ignores_extra_fields() {
        let doc: MaximPromptsDocument =
            serde_json::from_str(r#"{"maxims":[{"input":"a","note":"x"},{"input":"b"}]}"#).unwrap();
        assert_eq!(doc.maxims.len(), 2);
        assert_eq!(doc.maxims[1].input, "b");
    }
}
