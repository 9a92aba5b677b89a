use charter_store::app_config::CrmConfig;
use serde_json::{json, Value};

/// Splits a full name into the first/last tokens the CRM payload wants:
/// first token is the given name, the remainder joined by spaces is the
/// family name (empty when there is no remainder).
pub fn split_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    let mut parts = trimmed.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    /// Server-held credential is absent; fail closed without calling out.
    #[error("Server configuration error")]
    MissingCredentials,

    /// Non-2xx from the CRM, message relayed where available.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Internal server error")]
    Transport(#[from] reqwest::Error),
}

/// Server-side relay to the HighLevel contacts API. Attaches the held bearer
/// token, the fixed location id and the pinned API version header.
pub struct HighLevelClient {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    token: Option<String>,
    location_id: Option<String>,
}

impl HighLevelClient {
    pub fn new(config: &CrmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            token: config.token.clone(),
            location_id: config.location_id.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.location_id.is_some()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_location_id(&self) -> bool {
        self.location_id.is_some()
    }

    /// `POST {base}/contacts/`. No retry: the caller resubmits manually.
    pub async fn create_contact(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        tags: &[&str],
    ) -> Result<Value, CrmError> {
        let (Some(token), Some(location_id)) = (&self.token, &self.location_id) else {
            return Err(CrmError::MissingCredentials);
        };

        let (first_name, last_name) = split_name(name);
        let mut body = json!({
            "firstName": first_name,
            "lastName": last_name,
            "name": name.trim(),
            "email": email,
            "phone": phone,
            "locationId": location_id,
        });
        if !tags.is_empty() {
            body["tags"] = json!(tags);
        }

        let response = self
            .http
            .post(format!("{}/contacts/", self.base_url))
            .bearer_auth(token)
            .header("Version", &self.api_version)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body: Value = response.json().await.unwrap_or_else(|_| json!({}));
            tracing::error!(status = status.as_u16(), body = %error_body, "HighLevel API error");
            let message = error_body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HighLevel API error: {}", status.as_u16()));
            return Err(CrmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let result: Value = response.json().await?;
        Ok(result.get("contact").cloned().unwrap_or(result))
    }
}
