use async_trait::async_trait;

use crate::config::Config;
use crate::error::AppError;

/// Outbound alert channel. The dispatcher only needs "send this and tell me
/// whether it arrived"; the HTTP mail API lives behind this seam so tests
/// can capture sends instead.
#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// Sends mail through an HTTP mail API (Maileroo-style form POST).
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
        }
    }
}

#[async_trait]
impl AlertSender for HttpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let form = [
            ("from", self.from.as_str()),
            ("to", recipient),
            ("subject", subject),
            ("plain", body),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("X-API-Key", &self.api_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Delivery(format!("mail API returned {status}")));
        }
        Ok(())
    }
}

/// Capture-only sender for tests and local runs without a mail API key.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: std::sync::Mutex<Vec<SentAlert>>,
    pub fail_next: std::sync::atomic::AtomicBool,
}

#[derive(Debug, Clone)]
pub struct SentAlert {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl RecordingMailer {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("mailer mutex poisoned").len()
    }
}

#[async_trait]
impl AlertSender for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError> {
        if self.fail_next.swap(false, std::sync::atomic::Ordering::SeqCst) {
            return Err(AppError::Delivery("simulated transport failure".into()));
        }
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(SentAlert {
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}
