//! Тонкие обёртки над `gloo_net` для JSON-запросов к backend.

use contracts::shared::api_response::{ApiResponse, StatusResponse};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{AppError, DEFAULT_SAVE_ERROR};

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, AppError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await?;
    read_json(response).await
}

pub async fn post_json<B, T>(url: &str, body: &B) -> Result<T, AppError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = Request::post(url).json(body)?.send().await?;
    read_json(response).await
}

pub async fn put_json<B, T>(url: &str, body: &B) -> Result<T, AppError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = Request::put(url).json(body)?.send().await?;
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let text = response.text().await?;
    if !(200..300).contains(&status) {
        return Err(http_error(status, &text));
    }
    Ok(serde_json::from_str(&text)?)
}

/// Error bodies usually carry the same envelope; its message is kept.
fn http_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<StatusResponse>(body)
        .ok()
        .and_then(|r| r.message().map(str::to_string));
    AppError::Http { status, message }
}

/// Отклоняет конверт со `status: false`.
pub fn accept<T>(response: ApiResponse<T>) -> Result<ApiResponse<T>, AppError> {
    if response.status {
        Ok(response)
    } else {
        let message = response.message().unwrap_or(DEFAULT_SAVE_ERROR).to_string();
        Err(AppError::Rejected(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_passes_ok_envelope() {
        let resp: StatusResponse = serde_json::from_str(r#"{"status":true}"#).unwrap();
        assert!(accept(resp).is_ok());
    }

    #[test]
    fn test_accept_rejects_with_server_message() {
        let resp: StatusResponse =
            serde_json::from_str(r#"{"status":false,"description":"Объект используется"}"#).unwrap();
        assert_eq!(
            accept(resp).unwrap_err(),
            AppError::Rejected("Объект используется".into())
        );

        let silent: StatusResponse = serde_json::from_str(r#"{"status":false}"#).unwrap();
        assert_eq!(
            accept(silent).unwrap_err().user_message(),
            DEFAULT_SAVE_ERROR
        );
    }

    #[test]
    fn test_http_error_extracts_description_list() {
        let err = http_error(422, r#"{"status":false,"description":["Код обязателен"]}"#);
        assert_eq!(err.user_message(), "Код обязателен");

        let err = http_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err, AppError::Http { status: 502, message: None });
    }
}
