//! Ошибки обращения к backend.

use thiserror::Error;

/// Сообщение по умолчанию, если сервер не прислал описание.
pub const DEFAULT_SAVE_ERROR: &str = "Ошибка сохранения";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Запрос не дошёл до сервера (сеть, CORS, построение запроса)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Сервер ответил не-2xx статусом; `message` извлечён из тела, если удалось
    #[error("HTTP {status}")]
    Http { status: u16, message: Option<String> },

    #[error("Decode error: {0}")]
    Decode(String),

    /// `status: false` в конверте ответа
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl AppError {
    /// Текст для показа пользователю.
    pub fn user_message(&self) -> String {
        let msg = match self {
            AppError::Http { message, .. } => message.as_deref(),
            AppError::Rejected(msg) | AppError::Transport(msg) => Some(msg.as_str()),
            AppError::Decode(_) => None,
        };
        msg.map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SAVE_ERROR)
            .to_string()
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => AppError::Decode(e.to_string()),
            other => AppError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let e = AppError::Rejected("Объект с таким кодом уже существует".into());
        assert_eq!(e.user_message(), "Объект с таким кодом уже существует");

        let e = AppError::Http {
            status: 400,
            message: Some("Неверный формат".into()),
        };
        assert_eq!(e.user_message(), "Неверный формат");
    }

    #[test]
    fn test_user_message_falls_back_to_default() {
        assert_eq!(
            AppError::Http { status: 500, message: None }.user_message(),
            DEFAULT_SAVE_ERROR
        );
        assert_eq!(AppError::Rejected("  ".into()).user_message(), DEFAULT_SAVE_ERROR);
        assert_eq!(AppError::Decode("eof".into()).user_message(), DEFAULT_SAVE_ERROR);
    }
}
