// Form submission: posts the two team id lists to the match endpoint.
//
// With no endpoint configured the dry-run submitter logs the form instead,
// so the whole flow can be exercised offline.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use lineup_core::config::SubmitConfig;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected the lineup with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Acknowledgement of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub status: u16,
    pub submitted_at: DateTime<Utc>,
}

/// Destination for the submitted form fields.
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, fields: &[(String, String)]) -> Result<SubmitReceipt, SubmitError>;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Posts the fields form-encoded to a fixed URL.
pub struct HttpSubmitter {
    http: reqwest::Client,
    url: String,
}

impl HttpSubmitter {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpSubmitter {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FormSubmitter for HttpSubmitter {
    async fn submit(&self, fields: &[(String, String)]) -> Result<SubmitReceipt, SubmitError> {
        debug!("POST {} with {} fields", self.url, fields.len());
        let response = self.http.post(&self.url).form(fields).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Submission rejected: {} {}", status, body);
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }
        info!("Lineup submitted to {} ({})", self.url, status);
        Ok(SubmitReceipt {
            status: status.as_u16(),
            submitted_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

/// Logs the form as JSON and keeps a copy of every submission.
#[derive(Default)]
pub struct DryRunSubmitter {
    submitted: Mutex<Vec<Vec<(String, String)>>>,
}

impl DryRunSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every form submitted so far, oldest first.
    pub fn submissions(&self) -> Vec<Vec<(String, String)>> {
        match self.submitted.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl FormSubmitter for DryRunSubmitter {
    async fn submit(&self, fields: &[(String, String)]) -> Result<SubmitReceipt, SubmitError> {
        let body: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
            .collect();
        info!(
            "Dry run, lineup not sent: {}",
            serde_json::Value::Object(body)
        );
        match self.submitted.lock() {
            Ok(mut guard) => guard.push(fields.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(fields.to_vec()),
        }
        Ok(SubmitReceipt {
            status: 200,
            submitted_at: Utc::now(),
        })
    }
}

/// Pick the submitter for the configured endpoint.
pub fn from_config(submit: &SubmitConfig) -> Result<Arc<dyn FormSubmitter>, SubmitError> {
    match &submit.url {
        Some(url) => {
            info!("Submitting lineups to {}", url);
            let submitter = HttpSubmitter::new(url.clone(), Duration::from_secs(submit.timeout_secs))?;
            Ok(Arc::new(submitter))
        }
        None => {
            info!("No submit.url configured, using dry run");
            Ok(Arc::new(DryRunSubmitter::new()))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
