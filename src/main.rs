// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and resolve the config (defaults < file < flags)
// 3. Load the bookmark file, run the batch checker, print results
// 4. Exit with proper code (0 = all valid, 1 = invalid bookmarks, 2 = error)
// =============================================================================

mod bookmark;      // src/bookmark.rs - data model
mod checker;       // src/checker/ - probing and batch orchestration
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - runtime settings
mod error;         // src/error.rs - typed errors
mod export;        // src/export.rs - CSV report
mod logging;       // src/logging.rs - tracing setup
mod parser;        // src/parser/ - HTML and Markdown bookmark files

use anyhow::{Context, Result};
use bookmark::{filter_bookmarks, Bookmark, BookmarkSet, BookmarkStatus, CheckSummary};
use checker::{BatchOrchestrator, HttpChecker, RemoteChecker, RunEvent, UrlChecker};
use clap::Parser;
use cli::{CheckArgs, Cli, Commands};
use config::Config;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every checked bookmark is valid (or nothing was checked)
//   Ok(1) = at least one invalid bookmark
//   Err   = could not load the file / config; main maps this to 2
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Parse { file, json } => handle_parse(&file, json),
        Commands::Check(args) => handle_check(args).await,
    }
}

// Handles the 'parse' subcommand: load and list, no network
fn handle_parse(file: &Path, json: bool) -> Result<i32> {
    let bookmarks = parser::load_file(file, Config::default().max_file_bytes)
        .with_context(|| format!("failed to load {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bookmarks)?);
    } else {
        println!("📄 Parsed {} bookmark(s) from {}\n", bookmarks.len(), file.display());
        print_bookmark_list(&bookmarks);
    }
    Ok(0)
}

// Handles the 'check' subcommand
async fn handle_check(args: CheckArgs) -> Result<i32> {
    let config = resolve_config(&args)?;
    let json = args.json;

    let bookmarks = parser::load_file(&args.file, config.max_file_bytes)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let mut set = BookmarkSet::new();
    set.load(bookmarks);

    progress(json, format!("📄 Loaded {} bookmark(s) from {}", set.len(), args.file.display()));

    let checker: Box<dyn UrlChecker> = match &config.service_url {
        Some(service_url) => {
            progress(json, format!("🛰️  Using check service: {}", service_url));
            Box::new(RemoteChecker::new(&config, service_url)?)
        }
        None => Box::new(HttpChecker::new(&config)?),
    };
    let orchestrator = BatchOrchestrator::new(checker, config.batch_size);

    let report = orchestrator
        .run_check(&mut set, |event| print_progress(&event, json))
        .await;

    let shown = filter_bookmarks(
        set.bookmarks(),
        args.status.as_status(),
        args.search.as_deref(),
    );
    print_results(&shown, &report.summary, json)?;

    if args.export {
        let today = chrono::Local::now().date_naive();
        let written = export::write_invalid_report(set.bookmarks(), &args.export_dir, today)
            .with_context(|| format!("failed to write CSV into {}", args.export_dir.display()))?;

        match written {
            Some(path) => progress(json, format!("💾 Exported invalid bookmarks to {}", path.display())),
            None => progress(json, "💾 No invalid bookmarks to export".to_string()),
        }
    }

    progress(
        json,
        format!(
            "⏱️  Finished {} batch(es) of up to {} in {:.1}s",
            report.batches,
            orchestrator.batch_size(),
            report.elapsed.as_secs_f64()
        ),
    );

    Ok(if report.summary.invalid > 0 { 1 } else { 0 })
}

// Defaults, then the --config file, then individual flags
fn resolve_config(args: &CheckArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if let Some(service_url) = &args.service_url {
        config.service_url = Some(service_url.clone());
    }

    config.validate()?;
    Ok(config)
}

// Progress lines go to stdout normally, but to stderr with --json so the
// JSON document on stdout stays parseable
fn progress(json: bool, message: String) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

fn print_progress(event: &RunEvent<'_>, json: bool) {
    match event {
        RunEvent::Started { total, batches } => progress(
            json,
            format!("\n🌐 Checking {} bookmark(s) in {} batch(es)...\n", total, batches),
        ),
        RunEvent::BatchStarted {
            index,
            batches,
            ids,
            bookmarks,
        } => {
            let checking = bookmarks
                .iter()
                .filter(|b| b.status == BookmarkStatus::Checking)
                .count();
            tracing::debug!(batch = index + 1, batches, size = ids.len(), checking, "batch started");
        }
        RunEvent::BatchFinished {
            index,
            batches,
            results,
        } => {
            let invalid = results
                .iter()
                .filter(|b| b.status == BookmarkStatus::Invalid)
                .count();
            progress(
                json,
                format!(
                    "   batch {}/{}: {} checked, {} invalid",
                    index + 1,
                    batches,
                    results.len(),
                    invalid
                ),
            );
        }
        RunEvent::Finished { .. } => progress(json, String::new()),
    }
}

// Prints the results either as a table or JSON
fn print_results(bookmarks: &[&Bookmark], summary: &CheckSummary, json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "summary": summary,
            "bookmarks": bookmarks,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(bookmarks, summary);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(bookmarks: &[&Bookmark], summary: &CheckSummary) {
    println!(
        "{:<30} {:<50} {:<12} {:>8}  {}",
        "NAME", "URL", "STATUS", "TIME", "MESSAGE"
    );
    println!("{}", "=".repeat(120));

    for bookmark in bookmarks {
        let time = match bookmark.response_time_ms {
            Some(ms) if bookmark.status.is_final() => format!("{}ms", ms),
            _ => String::new(),
        };
        let message = bookmark.error_message.as_deref().unwrap_or("");

        println!(
            "{:<30} {:<50} {:<12} {:>8}  {}",
            truncate(&bookmark.name, 28),
            truncate(&bookmark.url, 48),
            format_status(bookmark.status),
            time,
            message
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Valid: {}", summary.valid);
    println!("   ❌ Invalid: {}", summary.invalid);
    if summary.pending + summary.checking > 0 {
        println!("   ⏳ Unchecked: {}", summary.pending + summary.checking);
    }
    println!("   📋 Total: {}", summary.total);
}

fn print_bookmark_list(bookmarks: &[Bookmark]) {
    println!("{:<30} {:<50} {}", "NAME", "URL", "CATEGORY");
    println!("{}", "=".repeat(100));

    for bookmark in bookmarks {
        println!(
            "{:<30} {:<50} {}",
            truncate(&bookmark.name, 28),
            truncate(&bookmark.url, 48),
            bookmark.category.as_deref().unwrap_or("")
        );
    }
}

fn format_status(status: BookmarkStatus) -> &'static str {
    match status {
        BookmarkStatus::Pending => "⏳ PENDING",
        BookmarkStatus::Checking => "🔄 CHECKING",
        BookmarkStatus::Valid => "✅ VALID",
        BookmarkStatus::Invalid => "❌ INVALID",
    }
}

// Shortens text for a fixed-width column without splitting a UTF-8 char
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
