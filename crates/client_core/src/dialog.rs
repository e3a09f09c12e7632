use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonColor {
    Primary,
    Accent,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: Option<String>,
    pub message: String,
    pub ok_label: String,
    pub cancel_label: String,
    pub ok_color: Option<ButtonColor>,
}

impl ConfirmRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            ok_label: "Accept".to_string(),
            cancel_label: "Cancel".to_string(),
            ok_color: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_labels(mut self, ok: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.ok_label = ok.into();
        self.cancel_label = cancel.into();
        self
    }

    pub fn with_ok_color(mut self, color: ButtonColor) -> Self {
        self.ok_color = Some(color);
        self
    }
}

/// A yes/no prompt. Resolves to `true` only when the ok button was chosen.
#[async_trait]
pub trait ConfirmDialog: Send + Sync {
    async fn confirm(&self, request: &ConfirmRequest) -> bool;
}

/// Answers every prompt the same way without asking anyone.
pub struct FixedAnswer(pub bool);

#[async_trait]
impl ConfirmDialog for FixedAnswer {
    async fn confirm(&self, _request: &ConfirmRequest) -> bool {
        self.0
    }
}
