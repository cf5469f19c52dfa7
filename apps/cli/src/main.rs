mod config;
mod errors;
mod match_client;
mod models;
mod resume;
mod search;
mod view;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::match_client::MatchClient;
use crate::search::{ResumeRef, SearchSession};
use crate::view::cards;

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Search matched job listings for a GitHub profile and resume")]
#[command(version)]
struct Cli {
    /// GitHub username to match against
    github_username: String,

    /// Resume document to extract text from (.pdf, .txt, or .md)
    #[arg(long, value_name = "FILE")]
    resume: Option<PathBuf>,

    /// Identifier of a resume the backend already knows
    #[arg(long, value_name = "ID", conflicts_with = "resume")]
    resume_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (defaults cover a local backend)
    let config = Config::from_env()?;

    // Initialize structured logging on stderr; stdout belongs to the cards
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting scout v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the job board client
    let board = Arc::new(MatchClient::new(&config.api_url));
    info!("Job board client ready at {}", config.api_url);

    // Build the search session
    let mut session = SearchSession::new(board, cli.github_username);
    if let Some(id) = cli.resume_id {
        session.set_resume_id(id);
    }
    if let Some(path) = cli.resume {
        if session.ingest_resume(&path).await.is_err() {
            print!("{}", cards::render_modal(&session.modal));
            std::process::exit(1);
        }
    }

    match session.resume_ref() {
        Some(ResumeRef::Text(text)) => info!("Searching with {} chars of resume text", text.len()),
        Some(ResumeRef::Id(id)) => info!("Searching with resume id {id}"),
        None => {}
    }

    // First search; without results there is nothing to browse
    if session.run_search().await.is_err() {
        print!("{}", cards::render_modal(&session.modal));
        std::process::exit(1);
    }

    if session.panels.no_results {
        print!("{}", cards::render_no_results());
        return Ok(());
    }

    println!("{}", cards::render_summary(session.jobs().len()));
    render_window(&session, 0);

    interact(&mut session).await?;

    Ok(())
}

/// Reads commands until the user quits or stdin closes.
///
/// `Enter` reveals the next page while one is available, `a <n>` applies for
/// the n-th rendered card, `r` starts the search over, `q` quits.
async fn interact(session: &mut SearchSession) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    prompt(session)?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();

        if line == "q" {
            break;
        } else if line.is_empty() {
            let revealed = session.load_more();
            if !revealed.is_empty() {
                debug!("Revealed page {}", session.current_page());
                render_window(session, revealed.start);
            }
        } else if let Some(rest) = line.strip_prefix("a ") {
            apply_by_index(session, rest).await;
        } else if line == "r" {
            session.search_again();
            if session.run_search().await.is_err() {
                print!("{}", cards::render_modal(&session.modal));
                session.close_modal();
            } else if session.panels.no_results {
                print!("{}", cards::render_no_results());
            } else {
                println!("{}", cards::render_summary(session.jobs().len()));
                render_window(session, 0);
            }
        } else {
            println!("Commands: Enter = more jobs, a <n> = apply, r = search again, q = quit");
        }

        prompt(session)?;
    }

    Ok(())
}

/// Applies for the card at the given 1-based index among the rendered ones.
async fn apply_by_index(session: &mut SearchSession, raw: &str) {
    let visible = session.visible_jobs().len();
    let index = match raw.trim().parse::<usize>() {
        Ok(n) if (1..=visible).contains(&n) => n,
        _ => {
            println!("Pick a job number between 1 and {visible}");
            return;
        }
    };

    let job_id = session.visible_jobs()[index - 1].id.clone();
    let _ = session.apply(&job_id).await;
    print!("{}", cards::render_modal(&session.modal));
    session.close_modal();
}

/// Prints every rendered card from `from` (0-based) to the end of the
/// current window. Nothing is printed while the results container is hidden.
fn render_window(session: &SearchSession, from: usize) {
    if !session.panels.results {
        return;
    }
    for (i, job) in session.visible_jobs().iter().enumerate().skip(from) {
        print!("{}", cards::render_card(i + 1, job, &session.button(&job.id)));
    }
    if session.panels.load_more {
        let shown = session.visible_jobs().len();
        let total = session.jobs().len();
        println!("Showing {shown} of {total} jobs");
    }
}

fn prompt(session: &SearchSession) -> Result<()> {
    if session.panels.load_more {
        print!("[Enter = more, a <n> = apply, r = search again, q = quit] > ");
    } else {
        print!("[a <n> = apply, r = search again, q = quit] > ");
    }
    std::io::stdout().flush()?;
    Ok(())
}
