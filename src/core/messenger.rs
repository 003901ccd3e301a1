//! Request/response envelopes exchanged with the host (popup, content
//! renderer) and a line-delimited JSON loop to serve them.

use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use crate::core::phishing::analyze_url;
use crate::models::RiskAssessment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    AnalyzeUrl { url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RiskAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(result: RiskAssessment) -> Self {
        Response {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Response {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Messages pushed to the page renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ContentMessage {
    ShowWarning { data: RiskAssessment },
}

/// Dismissible page banner shown for phishing verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningBanner {
    pub title: &'static str,
    pub body: &'static str,
    pub dismiss_label: &'static str,
}

impl WarningBanner {
    /// `None` unless the message carries a phishing verdict.
    pub fn for_message(message: &ContentMessage) -> Option<Self> {
        match message {
            ContentMessage::ShowWarning { data } if data.is_phishing => Some(WarningBanner {
                title: "Warning: Potential Phishing Website Detected!",
                body: "This website shows characteristics commonly associated with phishing attempts.",
                dismiss_label: "Dismiss",
            }),
            ContentMessage::ShowWarning { .. } => None,
        }
    }
}

pub fn handle(request: &Request) -> Response {
    match request {
        Request::AnalyzeUrl { url } => match analyze_url(url) {
            Ok(assessment) => Response::ok(assessment),
            Err(e) => {
                debug!(url = %url, error = %e, "analysis request rejected");
                Response::failed(e.to_string())
            }
        },
    }
}

/// Answer one JSON request per input line with one JSON response per output
/// line. Returns the number of requests answered.
pub fn serve<R: BufRead, W: Write>(reader: R, mut writer: W) -> io::Result<usize> {
    let mut answered = 0;
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(trimmed) {
            Ok(request) => handle(&request),
            Err(e) => {
                warn!(error = %e, "malformed request");
                Response::failed(format!("malformed request: {}", e))
            }
        };

        serde_json::to_writer(&mut writer, &response)?;
        writeln!(writer)?;
        writer.flush()?;
        answered += 1;
    }
    Ok(answered)
}
