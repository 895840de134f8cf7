use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    catalog, settings, HttpBackend, InvocationStatus, RecommendationBackend, Session,
};
use shared::{
    domain::{ModelId, PanelPosition},
    error::WorkflowError,
};
use storage::{LayoutStore, Storage};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "corerec", about = "Command-line client for the CoreRec recommendation service")]
struct Cli {
    /// Backend base url; overrides corerec.toml and COREREC_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Layout database; overrides corerec.toml and COREREC_DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the label catalog.
    Labels,
    /// Print the model catalog as `value<TAB>label`.
    Models,
    /// Request recommendations for a model and label.
    Recommend {
        /// Model value or display label.
        #[arg(long, default_value = "")]
        model: String,
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        top_k: i64,
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        threshold: f64,
    },
    /// Inspect or overwrite the persisted results panel position.
    Layout {
        #[command(subcommand)]
        action: LayoutCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LayoutCommand {
    Show,
    Set {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = settings::load_settings().with_overrides(cli.api_url, cli.database_url);

    match cli.command {
        Command::Labels => {
            let backend = backend_from(&settings)?;
            return Ok(print_listing(label_lines(&backend).await));
        }
        Command::Models => {
            let backend = backend_from(&settings)?;
            return Ok(print_listing(model_lines(&backend).await));
        }
        Command::Recommend {
            model,
            label,
            top_k,
            threshold,
        } => {
            let backend = backend_from(&settings)?;
            let mut session = Session::default();
            session.load_catalog(&backend).await;
            if let Some(message) = session.error_message() {
                eprintln!("{message}");
            }

            select_model(&mut session, &model);
            let request = session.request_mut();
            request.set_label(label);
            request.set_top_k(top_k);
            request.set_threshold(threshold);

            let status = session.run(&backend).await.clone();
            match status {
                InvocationStatus::Success => {
                    for item in session.results().unwrap_or_default() {
                        println!("{item}");
                    }
                }
                InvocationStatus::Failed(reason) => {
                    eprintln!("{reason}");
                    if reason.is_client_side() {
                        return Ok(ExitCode::from(2));
                    }
                    return Ok(ExitCode::FAILURE);
                }
                InvocationStatus::Idle | InvocationStatus::Loading => {}
            }
        }
        Command::Layout { action } => {
            let storage = Storage::new(&settings.database_url()).await?;
            let layout = LayoutStore::new(storage);
            match action {
                LayoutCommand::Show => {
                    let position = layout.load().await;
                    println!("x={} y={}", position.x, position.y);
                }
                LayoutCommand::Set { x, y } => {
                    layout.save(PanelPosition::new(x, y)).await?;
                    println!("saved x={x} y={y}");
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn backend_from(settings: &settings::ClientSettings) -> Result<HttpBackend> {
    let api_url = settings.validated_api_url()?;
    tracing::debug!(api_url = %api_url, "using backend");
    HttpBackend::with_timeout(api_url, settings.request_timeout())
}

async fn label_lines(backend: &dyn RecommendationBackend) -> Result<Vec<String>, WorkflowError> {
    catalog::fetch_labels(backend).await
}

async fn model_lines(backend: &dyn RecommendationBackend) -> Result<Vec<String>, WorkflowError> {
    let models = catalog::fetch_models(backend).await?;
    Ok(models
        .into_iter()
        .map(|model| format!("{}\t{}", model.value, model.label))
        .collect())
}

fn print_listing(listing: Result<Vec<String>, WorkflowError>) -> ExitCode {
    match listing {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(reason) => {
            eprintln!("{reason}");
            ExitCode::FAILURE
        }
    }
}

/// Accepts either a model value or its display label.
fn select_model(session: &mut Session, model: &str) {
    if session.has_model(&ModelId::new(model)) {
        session.request_mut().set_model(model);
    } else if session.select_model_by_label(model).is_none() {
        session.request_mut().set_model(model);
    }
}
