use crate::model::ContentDescriptor;
use serde_json::{Value, json};

/// Control message pushed to a screen over its persistent channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Tell the screen to re-fetch its page.
    Reload,
    /// Push fresh content; the screen switches on the descriptor's `type`.
    Show(ContentDescriptor),
}

impl ScreenCommand {
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Reload => json!({ "type": "reload" }),
            Self::Show(content) => json!(content),
        }
    }
}
