//! Mail notifier
//!
//! Fire-and-forget delivery through an HTTP mail relay. Sends never block
//! the calling operation and failures are logged, not propagated. When no
//! relay is configured the service is a debug-logged no-op.

use serde::Serialize;

/// Mail relay configuration (from environment)
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Relay endpoint; None disables sending
    pub api_url: Option<String>,
    /// Bearer token for the relay
    pub api_key: Option<String>,
    /// From address
    pub from: String,
    /// Base URL used to build links in outgoing mail
    pub public_base_url: String,
}

impl MailerConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("MAIL_API_URL").ok(),
            api_key: std::env::var("MAIL_API_KEY").ok(),
            from: std::env::var("MAIL_FROM").unwrap_or_else(|_| "no-reply@comanda.app".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct MailPayload {
    from: String,
    to: String,
    subject: String,
    text: String,
}

/// Mail relay client
#[derive(Clone)]
pub struct MailerService {
    config: MailerConfig,
    client: reqwest::Client,
}

impl MailerService {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Send the account confirmation mail
    pub fn send_confirmation(&self, name: &str, email: &str, code: &str) {
        let link = format!("{}/api/auth/confirm/{}", self.config.public_base_url, code);
        self.dispatch(MailPayload {
            from: self.config.from.clone(),
            to: email.to_string(),
            subject: "Please confirm your account".to_string(),
            text: format!(
                "Hello {name},\n\nThank you for subscribing. Please confirm your email \
                 by opening the following link:\n{link}\n"
            ),
        });
    }

    /// Send the password reset mail
    pub fn send_password_reset(&self, name: &str, email: &str, code: &str) {
        let link = format!("{}/reset/{}", self.config.public_base_url, code);
        self.dispatch(MailPayload {
            from: self.config.from.clone(),
            to: email.to_string(),
            subject: "Please reset your password".to_string(),
            text: format!(
                "Hello {name},\n\nPlease open the following link to reset your \
                 password:\n{link}\n"
            ),
        });
    }

    fn dispatch(&self, payload: MailPayload) {
        let Some(api_url) = self.config.api_url.clone() else {
            tracing::debug!(to = %payload.to, subject = %payload.subject, "Mail relay not configured, skipping send");
            return;
        };

        let client = self.client.clone();
        let api_key = self.config.api_key.clone();

        tokio::spawn(async move {
            let mut request = client.post(&api_url).json(&payload);
            if let Some(key) = api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!(to = %payload.to, "Mail accepted by relay");
                }
                Ok(resp) => {
                    tracing::warn!(
                        to = %payload.to,
                        status = %resp.status(),
                        "Mail relay returned non-success status"
                    );
                }
                Err(e) => {
                    tracing::warn!(to = %payload.to, error = %e, "Failed to reach mail relay");
                }
            }
        });
    }
}
