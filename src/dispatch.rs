use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Serialize;

pub const APPLICATION_JSON: &str = "application/json";

/// Serializes a payload and restores the literal `<`, `>` and `&` that some
/// JSON encoders emit as `\u003c`, `\u003e` and `\u0026`. Slack and Teams
/// both render these characters as-is.
pub fn encode_payload<T: Serialize>(payload: &T) -> Result<String> {
    let json = serde_json::to_string(payload).context("Failed to serialize webhook payload")?;
    Ok(unescape_html(&json))
}

/// Only rewrites real escapes: a `\\u0026` behind an odd run of backslashes
/// is an escaped backslash followed by literal text and is kept.
pub fn unescape_html(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut backslashes = 0usize;
    let mut rest = json;

    while let Some(c) = rest.chars().next() {
        if c == '\\' && backslashes % 2 == 0 {
            if let Some(literal) = entity_escape(&rest[1..]) {
                out.push(literal);
                rest = &rest[6..];
                backslashes = 0;
                continue;
            }
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn entity_escape(after_backslash: &str) -> Option<char> {
    match after_backslash.get(..5)? {
        "u003c" => Some('<'),
        "u003e" => Some('>'),
        "u0026" => Some('&'),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Delivery {
    pub status: StatusCode,
    pub body: String,
}

/// One-shot webhook poster. No retries, no timeout beyond the client default.
pub struct Dispatcher {
    client: Client,
    dry_run: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            dry_run: false,
        }
    }

    /// Encodes payloads but prints them instead of posting.
    pub fn dry_run() -> Self {
        Self {
            client: Client::new(),
            dry_run: true,
        }
    }

    /// Posts the payload; a transport failure or a non-2xx answer is an error.
    pub async fn post<T: Serialize>(&self, url: &str, payload: &T) -> Result<Option<Delivery>> {
        let body = encode_payload(payload)?;
        debug!("Request body: {}", body);

        if self.dry_run {
            info!("Dry run, not posting to {}", url);
            println!("{}", body);
            return Ok(None);
        }

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to post to webhook {}", url))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!("Webhook response: {} {}", status, body);

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Webhook {} answered {}: {}",
                url,
                status,
                body
            ));
        }

        Ok(Some(Delivery { status, body }))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::{header, HeaderMap, StatusCode as HookStatus},
        routing::post,
        Router,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Hook {
        status: HookStatus,
        requests: Arc<Mutex<Vec<(Option<String>, String)>>>,
    }

    async fn capture(
        State(hook): State<Hook>,
        headers: HeaderMap,
        body: String,
    ) -> (HookStatus, &'static str) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        hook.requests.lock().unwrap().push((content_type, body));
        (hook.status, "ok")
    }

    async fn spawn_hook(status: HookStatus) -> (String, Hook) {
        let hook = Hook {
            status,
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/hook", post(capture))
            .with_state(hook.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/hook", addr), hook)
    }

    #[test]
    fn test_unescape_html() {
        let escaped = r#"{"text":"\u003chttps://nagios|Nagios\u003e \u0026 more"}"#;
        assert_eq!(
            unescape_html(escaped),
            r#"{"text":"<https://nagios|Nagios> & more"}"#
        );

        // escaped backslash, then a real escape
        assert_eq!(unescape_html(r#""\\\u0026""#), r#""\\&""#);
        // escaped backslash followed by literal text
        assert_eq!(unescape_html(r#""\\u0026""#), r#""\\u0026""#);
    }

    #[test]
    fn test_encode_payload_keeps_literal_entities() -> Result<()> {
        let payload = json!({ "value": "load <90% & rising> on <web01>" });
        let body = encode_payload(&payload)?;

        assert_eq!(body, r#"{"value":"load <90% & rising> on <web01>"}"#);
        assert!(!body.contains("\\u00"));

        Ok(())
    }

    #[test]
    fn test_encode_payload_keeps_escaped_backslashes() -> Result<()> {
        let output = r"C:\u0026temp <ok>";
        let body = encode_payload(&json!({ "value": output }))?;

        let parsed: serde_json::Value = serde_json::from_str(&body)?;
        assert_eq!(parsed["value"], output);

        Ok(())
    }

    #[tokio::test]
    async fn test_post_sends_json() -> Result<()> {
        let (url, hook) = spawn_hook(HookStatus::OK).await;
        let dispatcher = Dispatcher::new();

        let delivery = dispatcher
            .post(&url, &json!({ "text": "a & b" }))
            .await?
            .expect("delivery");

        assert_eq!(delivery.status, StatusCode::OK);
        assert_eq!(delivery.body, "ok");

        let requests = hook.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.as_deref(), Some("application/json"));
        assert_eq!(requests[0].1, r#"{"text":"a & b"}"#);

        Ok(())
    }

    #[tokio::test]
    async fn test_post_non_success_is_error() {
        let (url, hook) = spawn_hook(HookStatus::INTERNAL_SERVER_ERROR).await;
        let dispatcher = Dispatcher::new();

        let result = dispatcher.post(&url, &json!({ "text": "x" })).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("500"));
        assert_eq!(hook.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_post_unreachable_is_error() {
        let dispatcher = Dispatcher::new();
        let result = dispatcher.post("http://127.0.0.1:9/hook", &json!({})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_does_not_post() -> Result<()> {
        let (url, hook) = spawn_hook(HookStatus::OK).await;
        let dispatcher = Dispatcher::dry_run();

        let delivery = dispatcher.post(&url, &json!({ "text": "x" })).await?;

        assert!(delivery.is_none());
        assert!(hook.requests.lock().unwrap().is_empty());

        Ok(())
    }
}
