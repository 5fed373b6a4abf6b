//! Command-line interface for truthlens.
//!
//! Drives one session per invocation: select a file name, run the mocked
//! analysis while printing claims as they are revealed, and optionally export
//! the resulting report.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::debug;

use crate::adapters::MockClaimGenerator;
use crate::core::{read_report, FileReportWriter, RevealTiming, RunOutcome, SessionController};
use crate::domain::{Claim, ConfidenceBand, Session};

/// truthlens - Mocked real-time fact checker
#[derive(Parser, Debug)]
#[command(name = "truthlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a file (only its name is used) and print the claims found
    Analyze {
        /// File name to analyze (defaults to the configured placeholder)
        file_name: Option<String>,

        /// Write a JSON report once the analysis finishes
        #[arg(short, long)]
        export: bool,

        /// Directory to write the report to (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for confidence jitter, for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a previously exported report
    Show {
        /// Path to the report JSON file
        path: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze {
                file_name,
                export,
                output,
                seed,
            } => analyze(file_name, export, output, seed).await,
            Commands::Show { path } => show_report(path).await,
            Commands::Config => show_config(),
        }
    }
}

/// Run one analysis session
async fn analyze(
    file_name: Option<String>,
    export: bool,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let config = crate::config::config()?;

    let source = match seed {
        Some(seed) => MockClaimGenerator::seeded(seed),
        None => MockClaimGenerator::new(),
    };
    let controller = SessionController::with_default_label(
        Arc::new(source),
        RevealTiming::from(&config.reveal),
        config.default_label.clone(),
    );

    if let Some(name) = file_name {
        controller.select_file(name);
    }

    let mut updates = controller.subscribe();
    let handle = controller.analyze();
    eprintln!("Analyzing…");

    follow_reveal(&mut updates, &mut std::io::stdout()).await?;

    match handle.wait().await? {
        RunOutcome::Completed { revealed } => eprintln!("\n[Found {} claims]", revealed),
        RunOutcome::Failed { error, revealed } => {
            eprintln!("\n[Analysis failed after {} claims: {}]", revealed, error)
        }
        RunOutcome::Superseded => eprintln!("\n[Analysis superseded]"),
    }

    if export {
        let writer = report_writer(output)?;
        debug!(dir = %writer.dir().display(), "Exporting report");
        let path = controller.export_to(&writer).await?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Write each newly revealed claim until the run leaves the running state.
///
/// Returns the number of claims written.
async fn follow_reveal<W: Write>(
    updates: &mut watch::Receiver<Session>,
    out: &mut W,
) -> Result<usize> {
    let mut shown = 0;
    loop {
        let running = {
            let session = updates.borrow_and_update();
            for (offset, claim) in session.results.iter().enumerate().skip(shown) {
                out.write_all(render_claim(offset + 1, claim).as_bytes())?;
            }
            shown = session.results.len();
            session.is_analyzing
        };
        out.flush()?;

        if !running || updates.changed().await.is_err() {
            break;
        }
    }

    Ok(shown)
}

/// Writer for `--output`, falling back to the configured reports directory
fn report_writer(output: Option<PathBuf>) -> Result<FileReportWriter> {
    match output {
        Some(dir) => Ok(FileReportWriter::new(dir)),
        None => FileReportWriter::from_config(),
    }
}

/// Print a saved report
async fn show_report(path: PathBuf) -> Result<()> {
    let report = read_report(&path).await?;

    println!("Generated: {}", report.generated_at);
    println!(
        "Input: {}",
        if report.input.file_name.is_empty() {
            "(no file selected)"
        } else {
            report.input.file_name.as_str()
        }
    );

    if report.results.is_empty() {
        println!("\nNo claims recorded");
        return Ok(());
    }

    for (index, claim) in report.results.iter().enumerate() {
        print!("{}", render_claim(index + 1, claim));
    }

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = crate::config::reload_config()?;

    println!("Config file: {}", match &config.config_file {
        Some(path) => path.display().to_string(),
        None => "(none - using defaults)".to_string(),
    });
    println!("Home: {}", config.home.display());
    println!("Reports: {}", config.reports.display());
    println!("Default label: {}", config.default_label);
    println!("\nReveal:");
    println!("  initial_delay_ms: {}", config.reveal.initial_delay_ms);
    println!("  interval_ms: {}", config.reveal.interval_ms);
    println!("  analysis_timeout_seconds: {}", config.reveal.analysis_timeout_seconds);

    Ok(())
}

/// Render a claim as a plain-text card
fn render_claim(position: usize, claim: &Claim) -> String {
    let sources: Vec<String> = claim
        .sources
        .iter()
        .map(|s| format!("{} <{}>", s.name, s.url))
        .collect();

    format!(
        "\n#{} [{}] {}\n   confidence {:>3}% {}\n   {}\n   sources: {}\n",
        position,
        claim.verdict,
        claim.text,
        claim.confidence,
        confidence_bar(claim.confidence, claim.band()),
        claim.explanation,
        sources.join(", ")
    )
}

/// Twenty-cell progress bar, with a fill character per band
fn confidence_bar(confidence: u8, band: ConfidenceBand) -> String {
    let filled = (usize::from(confidence.min(100)) + 2) / 5;
    let fill = match band {
        ConfidenceBand::High => '█',
        ConfidenceBand::Medium => '▓',
        ConfidenceBand::Low => '░',
    };
    format!(
        "[{}{}]",
        fill.to_string().repeat(filled),
        " ".repeat(20 - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn seeded_controller() -> SessionController {
        SessionController::new(
            Arc::new(MockClaimGenerator::seeded(3)),
            RevealTiming::default(),
        )
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::parse_from(["truthlens", "analyze", "report.pdf", "--export", "--seed", "7"]);

        match cli.command {
            Commands::Analyze {
                file_name,
                export,
                seed,
                ..
            } => {
                assert_eq!(file_name.as_deref(), Some("report.pdf"));
                assert!(export);
                assert_eq!(seed, Some(7));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_is_unset_without_flag() {
        let cli = Cli::parse_from(["truthlens", "analyze"]);

        match cli.command {
            Commands::Analyze { output, .. } => assert!(output.is_none()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_reveal_writes_each_claim_once() {
        let controller = seeded_controller();
        controller.select_file("report.pdf");

        let mut updates = controller.subscribe();
        let handle = controller.analyze();

        let mut out = Vec::new();
        let written = follow_reveal(&mut updates, &mut out).await.unwrap();
        handle.wait().await.unwrap();

        assert_eq!(written, 3);
        let text = String::from_utf8(out).unwrap();
        for claim in &controller.snapshot().results {
            assert_eq!(text.matches(claim.text.as_str()).count(), 1);
        }
        assert_eq!(text.matches("\n#1 ").count(), 1);
        assert_eq!(text.matches("\n#2 ").count(), 1);
        assert_eq!(text.matches("\n#3 ").count(), 1);
        assert!(!text.contains("\n#4 "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_reveal_joined_mid_run() {
        let controller = seeded_controller();
        let handle = controller.analyze();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        // Two claims are already visible when the viewer attaches
        let mut updates = controller.subscribe();
        let mut out = Vec::new();
        let written = follow_reveal(&mut updates, &mut out).await.unwrap();
        handle.wait().await.unwrap();

        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(out).unwrap().matches("\n#").count(), 3);
    }

    #[tokio::test]
    async fn test_follow_reveal_idle_session_writes_nothing() {
        let controller = seeded_controller();
        let mut updates = controller.subscribe();

        let mut out = Vec::new();
        assert_eq!(follow_reveal(&mut updates, &mut out).await.unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_writer_prefers_output_flag() {
        let temp = TempDir::new().unwrap();
        let writer = report_writer(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(writer.dir(), temp.path());
    }

    #[test]
    fn test_report_writer_defaults_to_configured_dir() {
        let writer = report_writer(None).unwrap();
        assert_eq!(writer.dir(), crate::config::reports_dir().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_branch_writes_report() {
        let temp = TempDir::new().unwrap();
        let controller = seeded_controller();
        controller.analyze().wait().await.unwrap();

        let writer = report_writer(Some(temp.path().to_path_buf())).unwrap();
        let path = controller.export_to(&writer).await.unwrap();

        let report = read_report(&path).await.unwrap();
        assert_eq!(report.results.len(), 3);
    }

    #[test]
    fn test_confidence_bar_width() {
        assert_eq!(confidence_bar(100, ConfidenceBand::High).chars().count(), 22);
        assert_eq!(confidence_bar(10, ConfidenceBand::Low), format!("[░░{}]", " ".repeat(18)));
        assert_eq!(confidence_bar(0, ConfidenceBand::Low), format!("[{}]", " ".repeat(20)));
    }
}
