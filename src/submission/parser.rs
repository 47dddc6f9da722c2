use axum::http::HeaderMap;
use serde_json::Value;

use super::Submission;

/// Media type of a Content-Type value, lowercased and without parameters.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Parse a request body based on its Content-Type header.
///
/// Browser forms post `application/x-www-form-urlencoded`, which is also the
/// fallback when the header is missing or unrecognised. Multipart bodies need
/// their boundary and go through [`parse_multipart`].
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Submission, String> {
    match content_type.map(media_type).as_deref() {
        Some("application/json") => parse_json(body),
        Some("multipart/form-data") => {
            Err("multipart/form-data bodies must be parsed with parse_multipart".to_string())
        }
        _ => parse_form_urlencoded(body),
    }
}

/// Parse any supported body, dispatching multipart to multer.
pub async fn parse_request(headers: &HeaderMap, body: bytes::Bytes) -> Result<Submission, String> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    if content_type.map(media_type).as_deref() == Some("multipart/form-data") {
        parse_multipart(headers, body).await
    } else {
        parse_body(content_type, &body)
    }
}

pub fn parse_form_urlencoded(body: &[u8]) -> Result<Submission, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;
    Ok(form_urlencoded::parse(body_str.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

fn parse_json(body: &[u8]) -> Result<Submission, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Submission::new());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?;
    let Value::Object(obj) = value else {
        return Err("JSON body must be an object".to_string());
    };

    Ok(obj
        .into_iter()
        .map(|(k, v)| (k, value_to_text(v)))
        .collect())
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse multipart form data using multer.
pub async fn parse_multipart(headers: &HeaderMap, body: bytes::Bytes) -> Result<Submission, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut submission = Submission::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        // Unnamed parts carry nothing a form field could map to
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;
        submission.insert(name, value);
    }

    Ok(submission)
}
