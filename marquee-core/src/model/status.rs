use crate::model::ScreenId;
use serde::{Deserialize, Serialize};

/// Connectivity event pushed to admin observers. Field names are pinned by
/// the admin frontend.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusUpdate {
    ScreenStatusUpdate {
        screen_id: ScreenId,
        connected: bool,
    },
}

impl StatusUpdate {
    pub fn new(screen_id: ScreenId, connected: bool) -> Self {
        Self::ScreenStatusUpdate {
            screen_id,
            connected,
        }
    }

    pub fn screen_id(&self) -> ScreenId {
        match self {
            Self::ScreenStatusUpdate { screen_id, .. } => *screen_id,
        }
    }

    pub fn connected(&self) -> bool {
        match self {
            Self::ScreenStatusUpdate { connected, .. } => *connected,
        }
    }
}
