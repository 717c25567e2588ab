use serde::Deserialize;

use crate::config::DatasetSettings;
use crate::records::{ConversationExample, Exchange, MaximRecord, PoemRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Poem,
    Maxim,
}

/// An intermediate JSON document; a `maxims` key takes precedence over
/// `poems` when both are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourceDocument {
    Maxims { maxims: Vec<MaximRecord> },
    Poems { poems: Vec<PoemRecord> },
}

impl SourceDocument {
    pub fn kind(&self) -> RecordKind {
        match self {
            SourceDocument::Maxims { .. } => RecordKind::Maxim,
            SourceDocument::Poems { .. } => RecordKind::Poem,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SourceDocument::Maxims { maxims } => maxims.len(),
            SourceDocument::Poems { poems } => poems.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn system_prompt(settings: &DatasetSettings, kind: RecordKind) -> &str {
    match kind {
        RecordKind::Poem => &settings.poem_system_prompt,
        RecordKind::Maxim => &settings.maxim_system_prompt,
    }
}

/// One system/user/assistant example per record, in source order.
pub fn format_records<R: Exchange>(records: &[R], system_prompt: &str) -> Vec<ConversationExample> {
    records
        .iter()
        .map(|r| ConversationExample::new(system_prompt, r.prompt(), r.reply()))
        .collect()
}

pub fn format_document(doc: &SourceDocument, system_prompt: &str) -> Vec<ConversationExample> {
    match doc {
        SourceDocument::Maxims { maxims } => format_records(maxims, system_prompt),
        SourceDocument::Poems { poems } => format_records(poems, system_prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Message, Role};

    #[test]
    fn record_becomes_three_turns() {
        let records = vec![PoemRecord {
            input: "X".into(),
            output: "Y".into(),
        }];
        let examples = format_records(&records, "S");
        assert_eq!(
            examples[0].messages,
            vec![
                Message {
                    role: Role::System,
                    content: "S".into()
                },
                Message {
                    role: Role::User,
                    content: "X".into()
                },
                Message {
                    role: Role::Assistant,
                    content: "Y".into()
                },
            ]
        );
    }

    #[test]
    fn key_presence_selects_kind() {
        let doc: SourceDocument =
            serde_json::from_str(r#"{"poems":[{"input":"a","output":"b"}]}"#).unwrap();
        assert_eq!(doc.kind(), RecordKind::Poem);

        let doc: SourceDocument = serde_json::from_str(
            r#"{"poems":[],"maxims":[{"input":"q","output":"r"},{"input":"s","output":"t"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.kind(), RecordKind::Maxim);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn neither_key_is_rejected() {
        assert!(serde_json::from_str::<SourceDocument>(r#"{"records":[]}"#).is_err());
    }

    #[test]
    fn prompt_follows_kind() {
        let settings = DatasetSettings::default();
        assert!(system_prompt(&settings, RecordKind::Poem).contains("Continue writing your poem"));
        assert!(system_prompt(&settings, RecordKind::Maxim).contains("Respond to the following"));
    }

    #[test]
    fn order_is_preserved() {
        let doc = SourceDocument::Maxims {
            maxims: (0..5)
                .map(|i| MaximRecord {
                    input: format!("q{}", i),
                    output: format!("a{}", i),
                })
                .collect(),
        };
        let users: Vec<String> = format_document(&doc, "S")
            .into_iter()
            .map(|ex| ex.messages[1].content.clone())
            .collect();
        assert_eq!(users, vec!["q0", "q1", "q2", "q3", "q4"]);
    }
}
