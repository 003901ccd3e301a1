use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

use crate::core::messenger::{ContentMessage, WarningBanner};
use crate::core::phishing::analyze_url;

/// A committed top-level or sub-frame navigation in a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEvent {
    pub tab_id: u32,
    pub frame_id: u32,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: &'static str,
    pub color: &'static str,
}

impl Badge {
    pub const WARNING: Badge = Badge { text: "⚠️", color: "#c62828" };
    pub const SAFE: Badge = Badge { text: "✓", color: "#2e7d32" };
}

/// Indicator change for one tab, plus the page warning and its rendered
/// banner when phishing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabUpdate {
    pub tab_id: u32,
    pub badge: Badge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ContentMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<WarningBanner>,
}

/// Only main-frame navigations are assessed. Failures are logged and
/// suppress the indicator; they never mark the tab safe.
pub fn on_committed(event: &NavigationEvent) -> Option<TabUpdate> {
    if event.frame_id != 0 {
        return None;
    }

    match analyze_url(&event.url) {
        Ok(assessment) if assessment.is_phishing => {
            info!(tab = event.tab_id, url = %event.url, score = assessment.risk_score, "phishing navigation");
            let warning = ContentMessage::ShowWarning { data: assessment };
            Some(TabUpdate {
                tab_id: event.tab_id,
                badge: Badge::WARNING,
                banner: WarningBanner::for_message(&warning),
                warning: Some(warning),
            })
        }
        Ok(_) => Some(TabUpdate {
            tab_id: event.tab_id,
            badge: Badge::SAFE,
            warning: None,
            banner: None,
        }),
        Err(e) => {
            error!(tab = event.tab_id, error = %e, "error analyzing navigation");
            None
        }
    }
}

/// Consume navigation events (one JSON object per line) and emit the
/// resulting tab updates. Returns how many updates were written.
pub fn watch<R: BufRead, W: Write>(reader: R, mut writer: W) -> io::Result<usize> {
    let mut emitted = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: NavigationEvent = match serde_json::from_str(&line) {
            Ok(ev) => ev,
            Err(e) => {
                warn!(error = %e, "skipping malformed navigation event");
                continue;
            }
        };
        if let Some(update) = on_committed(&event) {
            serde_json::to_writer(&mut writer, &update)?;
            writeln!(writer)?;
            writer.flush()?;
            emitted += 1;
        }
    }
    Ok(emitted)
}
