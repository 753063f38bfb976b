use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glossa_config::Config;
use glossa_lexicon::LexiconLoader;
use glossa_protocol::{Aspect, Request};
use tokio::net::TcpListener;
use tokio::signal;

pub mod controller;
pub mod logging;
pub mod profile;
pub mod startup;
pub mod state;

#[cfg(test)]
mod tests {
    mod queue_tests;
    mod startup_tests;
}

use self::controller::AppController;

#[derive(Parser)]
#[command(name = "glossa", version, about = "Multilingual lexicon and example server")]
struct Cli {
    /// JSON profile; GLOSSA_* environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the index and answer requests over WebSocket
    Serve {
        /// Overrides GLOSSA_BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Answer one request and print the JSON response
    Query {
        query: String,
        #[arg(short, long)]
        source: String,
        #[arg(short, long)]
        target: String,
        #[arg(long, value_enum, value_delimiter = ',', default_value = "translate")]
        aspects: Vec<AspectArg>,
        #[arg(long, default_value_t = 1e-4)]
        min_frequency: f64,
        #[arg(long, default_value_t = 10)]
        max_count: usize,
    },
    /// Write the loaded lexicon as a JSON meaning array
    Export { output: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum AspectArg {
    Translate,
    Define,
    Example,
    Extend,
    Synonym,
}

impl From<AspectArg> for Aspect {
    fn from(arg: AspectArg) -> Self {
        match arg {
            AspectArg::Translate => Aspect::Translate,
            AspectArg::Define => Aspect::Define,
            AspectArg::Example => Aspect::Example,
            AspectArg::Extend => Aspect::Extend,
            AspectArg::Synonym => Aspect::Synonym,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = profile::load_config(cli.config.as_deref())?;
    logging::init_tracing(config.log_json);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded profile {}", path.display());
    }

    match cli.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Query {
            query,
            source,
            target,
            aspects,
            min_frequency,
            max_count,
        } => {
            let aspects: Vec<Aspect> = aspects.into_iter().map(Aspect::from).collect();
            let mut request = Request::new(query, source, target).with_aspects(&aspects);
            request.min_frequency = min_frequency;
            request.max_count = max_count;

            let state = startup::build_state(config)?;
            let response = state.protocol.respond(&request);
            println!("{}", serde_json::to_string_pretty(&response)?);
            if response.is_error() {
                anyhow::bail!("Request rejected");
            }
            Ok(())
        }
        Command::Export { output } => {
            let state = startup::build_state(config)?;
            let count = LexiconLoader::write_file(&state.lexicon, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Exported {} meanings to {}", count, output.display());
            Ok(())
        }
    }
}

async fn serve(mut config: Config, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.server.bind_addr = bind;
    }

    let state = Arc::new(startup::build_state(config)?);
    let listener = TcpListener::bind(&state.config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", state.config.server.bind_addr))?;

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(listener);

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("Task exited"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::error!("Task failed during shutdown: {e:#}");
        }
    }
    tracing::info!("Stopped");
    Ok(())
}
