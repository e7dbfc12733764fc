//! JSON body extractor that reports malformed bodies in the API error format.
//!
//! A body whose field has the wrong type is reported against that field,
//! the same way validation failures are.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use clickaulas_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::Json`], but rejections become validation errors.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(AppError::validation(
                "Expected request with `Content-Type: application/json`",
            )
            .into());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        decode(&bytes).map(Self).map_err(ApiError)
    }
}

/// Deserializes `bytes`, naming the offending field when the shape is wrong.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        let path = e.path().to_string();
        let inner = e.into_inner();
        if inner.is_data() && path != "." {
            AppError::invalid_field(path, inner.to_string())
        } else {
            AppError::validation(format!("Invalid JSON body: {inner}"))
        }
    })?;
    deserializer
        .end()
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?;
    Ok(value)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use clickaulas_core::error::ErrorKind;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Booking {
        class_name: String,
        #[allow(dead_code)]
        seats: u32,
    }

    #[test]
    fn test_wrong_type_names_the_field() {
        let err = decode::<Booking>(br#"{"className": 7, "seats": 3}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let fields = err.fields.expect("field errors");
        assert!(fields.contains_key("className"));
    }

    #[test]
    fn test_syntax_error_has_no_fields() {
        let err = decode::<Booking>(b"{\"className\": ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.fields.is_none());
    }

    #[test]
    fn test_valid_body() {
        let booking = decode::<Booking>(br#"{"className": "7A", "seats": 3}"#).unwrap();
        assert_eq!(booking.class_name, "7A");
    }

    #[test]
    fn test_json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(has_json_content_type(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        assert!(has_json_content_type(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!has_json_content_type(&headers));
    }
}
