pub mod core;
pub mod data;
pub mod database;
pub mod error;
pub mod models;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use crate::core::config::{default_config_path, Settings};
use crate::core::report::PanelReport;
use crate::core::{analyze_url, messenger, navigation};
use crate::database::{Database, HistoryEntry};

#[derive(Parser, Debug)]
#[command(name = "phishsense", version, about = "Lexical phishing risk scoring for URLs")]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one or more URLs
    Analyze {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Output JSON
        #[arg(short, long)]
        json: bool,
        /// Do not record results in the history log
        #[arg(long)]
        no_history: bool,
    },
    /// Show or clear past analyses
    History {
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(long)]
        clear: bool,
        #[arg(short, long)]
        json: bool,
    },
    /// Answer line-delimited JSON analyze requests on stdin
    Serve,
    /// Turn navigation events on stdin into tab indicator updates
    Watch,
    /// Print the effective settings
    Config {
        /// Also write them to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn open_history(settings: &Settings) -> Result<Database> {
    if let Some(parent) = settings.history_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating history directory {}", parent.display()))?;
    }
    Database::new(&settings.history_path, settings.history_limit)
        .with_context(|| format!("opening history at {}", settings.history_path.display()))
}

/// Returns how many inputs could not be analyzed.
fn analyze(settings: &Settings, urls: &[String], json: bool, no_history: bool) -> Result<usize> {
    let history = if settings.record_history && !no_history {
        match open_history(settings) {
            Ok(db) => Some(db),
            Err(e) => {
                warn!(error = %format!("{:#}", e), "history unavailable, results will not be recorded");
                None
            }
        }
    } else {
        None
    };

    let mut reports = Vec::new();
    let mut failures = 0;
    for url in urls {
        let assessment = match analyze_url(url) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("cannot analyze this input: {}", e);
                failures += 1;
                continue;
            }
        };

        // History writes are best effort and never fail the analysis.
        if let Some(db) = &history {
            if let Err(e) = db.record(&HistoryEntry::new(url, &assessment)) {
                warn!(url = %url, error = %e, "failed to record history");
            }
        }

        let report = PanelReport::build(url, &assessment, settings.top_features);
        if json {
            reports.push(report);
        } else {
            println!("{}", report);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    info!(analyzed = urls.len() - failures, failures, "analysis finished");
    Ok(failures)
}

fn history(settings: &Settings, limit: Option<usize>, clear: bool, json: bool) -> Result<ExitCode> {
    let db = open_history(settings)?;
    if clear {
        let removed = db.clear()?;
        println!("Cleared {} history entries", removed);
        return Ok(ExitCode::SUCCESS);
    }

    let entries = db.recent(limit.unwrap_or(db.limit()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if db.is_empty()? {
        println!("No analyses recorded yet");
    } else {
        for e in &entries {
            let verdict = if e.is_phishing { "PHISHING" } else { "ok" };
            println!("{}  {:>3}%  {:<8}  {}", e.timestamp, (e.risk_score * 100.0).round(), verdict, e.url);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;

    match cli.command {
        Command::Analyze { urls, json, no_history } => {
            let failures = analyze(&settings, &urls, json, no_history)?;
            Ok(if failures > 0 { ExitCode::from(2) } else { ExitCode::SUCCESS })
        }
        Command::History { limit, clear, json } => history(&settings, limit, clear, json),
        Command::Serve => {
            let answered = messenger::serve(io::stdin().lock(), io::stdout().lock())?;
            info!(answered, "message loop closed");
            Ok(ExitCode::SUCCESS)
        }
        Command::Watch => {
            let emitted = navigation::watch(io::stdin().lock(), io::stdout().lock())?;
            info!(emitted, "navigation stream closed");
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { save } => {
            if save {
                let path = cli.config.unwrap_or_else(default_config_path);
                settings
                    .save(&path)
                    .with_context(|| format!("writing settings to {}", path.display()))?;
                info!(path = %path.display(), "settings saved");
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from(["phishsense", "analyze", "--json", "--no-history", "http://a.io/"]).unwrap();
        match cli.command {
            Command::Analyze { urls, json, no_history } => {
                assert_eq!(urls, vec!["http://a.io/".to_string()]);
                assert!(json);
                assert!(no_history);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn analyze_requires_a_url() {
        assert!(Cli::try_parse_from(["phishsense", "analyze"]).is_err());
    }

    #[test]
    fn analyze_records_only_valid_urls() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            history_path: dir.path().join("h").join("history.db"),
            history_limit: 5,
            top_features: 3,
            record_history: true,
        };
        let urls = vec!["https://example.com/".to_string(), "not a url".to_string()];
        assert_eq!(analyze(&settings, &urls, true, false).unwrap(), 1);

        let db = open_history(&settings).unwrap();
        let entries = db.recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://example.com/");
    }

    #[test]
    fn history_listing_on_empty_and_cleared_log() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            history_path: dir.path().join("history.db"),
            history_limit: 5,
            top_features: 3,
            record_history: true,
        };
        history(&settings, None, false, false).unwrap();
        assert!(open_history(&settings).unwrap().is_empty().unwrap());

        analyze(&settings, &["https://example.com/".to_string()], true, false).unwrap();
        history(&settings, Some(1), false, false).unwrap();
        history(&settings, None, true, false).unwrap();
        assert!(open_history(&settings).unwrap().is_empty().unwrap());
    }
}
