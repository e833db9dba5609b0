#![forbid(unsafe_code)]

//! User-facing outcome notifications.
//!
//! A [`Notification`] is what the UI shows in its modal dialog after an
//! action completes. [`Notification::from_response`] classifies a backend
//! style `{status, msg, data}` response by keywords in its status text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Title used for successful responses when the caller gives none.
pub const DEFAULT_SUCCESS_TITLE: &str = "Operación exitosa";
/// Label of the dismiss button.
pub const DEFAULT_BUTTON_TEXT: &str = "Aceptar";
/// Message for an error response without text.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Ha ocurrido un error inesperado";

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A dialog-ready outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Per-field messages, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
    pub button_text: String,
    pub show_close_button: bool,
}

impl Notification {
    fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            details: None,
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            show_close_button: false,
        }
    }

    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    /// Error with optional per-field details. Closable.
    #[must_use]
    pub fn error(
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<BTreeMap<String, String>>,
    ) -> Self {
        Self {
            details,
            show_close_button: true,
            ..Self::new(NotificationKind::Error, title, message)
        }
    }

    /// Closable warning.
    #[must_use]
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            show_close_button: true,
            ..Self::new(NotificationKind::Warning, title, message)
        }
    }

    #[must_use]
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    #[must_use]
    pub fn with_button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = text.into();
        self
    }

    /// Classify `response` by its status text.
    ///
    /// | status contains                          | result                    |
    /// |------------------------------------------|---------------------------|
    /// | `exitoso`, `éxito`, `success`            | success, `success_title`  |
    /// | `Conflicto`, `conflict`                  | warning "Conflicto"       |
    /// | `Error en los datos`, `validation`       | error with field details  |
    /// | anything else                            | error "Error"             |
    #[must_use]
    pub fn from_response(response: &ApiResponse, success_title: Option<&str>) -> Self {
        fn contains_any(status: &str, needles: &[&str]) -> bool {
            needles.iter().any(|needle| status.contains(needle))
        }

        let status = response.status.as_str();

        let notification = if contains_any(status, &["exitoso", "éxito", "success"]) {
            Self::success(
                success_title.unwrap_or(DEFAULT_SUCCESS_TITLE),
                response.msg.clone(),
            )
        } else if contains_any(status, &["Conflicto", "conflict"]) {
            Self::warning("Conflicto", response.msg.clone())
        } else if contains_any(status, &["Error en los datos", "validation"]) {
            Self::error(
                "Error en los datos",
                response.msg.clone(),
                response.field_details(),
            )
        } else {
            let message = if response.msg.is_empty() {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            } else {
                response.msg.clone()
            };
            Self::error("Error", message, None)
        };
        tracing::debug!(status, kind = ?notification.kind, "response classified");
        notification
    }
}

/// A `{status, msg, data}` service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            msg: msg.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// `data` as field → message, when it is a JSON object.
    fn field_details(&self) -> Option<BTreeMap<String, String>> {
        let object = self.data.as_ref()?.as_object()?;
        Some(
            object
                .iter()
                .map(|(field, value)| {
                    let message = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (field.clone(), message)
                })
                .collect(),
        )
    }
}
