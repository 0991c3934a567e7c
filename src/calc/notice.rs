// src/calc/notice.rs
//
// Messages pour le collaborateur “notification” (toast).
// Le noyau ne fait que les produire ; l’UI décide comment les montrer.

use crate::engine::ErrorKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn evaluation(kind: ErrorKind) -> Self {
        Self::error(kind.message())
    }

    pub fn max_length() -> Self {
        Self::error("Max input length reached.")
    }

    pub fn copied(text: &str) -> Self {
        Self::info("Copied", format!("{text} copied to clipboard."))
    }

    pub fn copy_failed() -> Self {
        Self::error("Could not copy to clipboard.")
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
