use clap::Parser;
use ground_page::Orchestrator;
use ground_page::crawlers::HttpFetcher;
use ground_page::generation::GeminiBackend;
use std::io::Write;
use std::sync::Arc;
use tokio::task::JoinError;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    // Run on its own task so a panic is reported instead of aborting main.
    let outcome = tokio::spawn(async move { run(&args).await }).await;
    report(outcome);
}

/// Logs a failed or panicked run; returns whether the run succeeded
fn report(outcome: Result<ground_page::Result<()>, JoinError>) -> bool {
    match outcome {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            ::log::error!("An error occurred while answering the query: {}", e);
            false
        }
        Err(e) if e.is_panic() => {
            ::log::error!("Answering the query panicked: {}", e);
            false
        }
        Err(e) => {
            ::log::error!("Answering the query was cancelled: {}", e);
            false
        }
    }
}

async fn run(args: &Args) -> ground_page::Result<()> {
    let config = args.grounding_config()?;

    let fetcher = HttpFetcher::from_config(&config)?;
    let mut backend = GeminiBackend::new(args.api_key.clone())?;
    if let Some(base) = &args.api_base {
        backend = backend.with_base_url(base.clone());
    }

    let orchestrator = Orchestrator::new(config, Arc::new(fetcher), Arc::new(backend));
    ::log::info!(
        "Answering {:?} from {} (up to {} links, {} identities)",
        args.query,
        args.seed_url,
        orchestrator.config().max_links,
        orchestrator.config().identities.len()
    );
    let answer = orchestrator.answer(&args.seed_url, &args.query).await;
    ::log::debug!("Answer path: {:?}, model: {}", answer.path, answer.model);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", answer.text)?;
    Ok(())
}
