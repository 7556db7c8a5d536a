mod api;
mod cli;
mod config;
mod controller;
mod errors;
mod models;
mod render;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::{HttpResumeApi, ResumeApi};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::controller::UploadScoreController;
use crate::errors::AppError;
use crate::models::ResumeFile;
use crate::render::terminal::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let cli = Cli::parse();

    // Initialize structured logging (stderr, so rendered cards stay clean on stdout)
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.rust_log.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api_url = cli.api_url.as_deref().unwrap_or(&config.api_url);
    info!(
        "Vellum v{} targeting {api_url}",
        env!("CARGO_PKG_VERSION")
    );

    let api = Arc::new(HttpResumeApi::new(
        api_url,
        Duration::from_secs(config.timeout_secs),
    ));

    match cli.command {
        Commands::Parse {
            files,
            formatted,
            save,
        } => {
            let mut controller = build_controller(api);
            run_upload(&mut controller, &files, formatted).await?;
            if let Some(path) = save {
                save_results(&controller, &path)?;
            }
        }
        Commands::Score {
            files,
            jd,
            jd_file,
            formatted,
            save,
        } => {
            let jd_text = resolve_jd(jd, jd_file.as_deref())?;
            let mut controller = build_controller(api);
            run_upload(&mut controller, &files, formatted).await?;
            controller.score_all(&jd_text).await;
            if let Some(path) = save {
                save_results(&controller, &path)?;
            }
        }
        Commands::Health => {
            let health = api.health().await.map_err(AppError::from)?;
            println!("{}", health.message);
        }
    }

    Ok(())
}

fn build_controller(api: Arc<HttpResumeApi>) -> UploadScoreController {
    UploadScoreController::new(api, Box::new(TerminalRenderer::stdout()))
}

async fn run_upload(
    controller: &mut UploadScoreController,
    paths: &[PathBuf],
    formatted: bool,
) -> Result<(), AppError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(ResumeFile::from_path(path).await?);
    }

    controller.upload(files).await;

    if formatted {
        for index in 0..controller.last_results().len() {
            controller.show_formatted(index);
        }
    }
    Ok(())
}

/// Resolves the job description from `--jd` or `--jd-file`. An absent JD
/// resolves to the empty string, which the controller rejects with its
/// blocking alert before any request goes out.
fn resolve_jd(jd: Option<String>, jd_file: Option<&Path>) -> Result<String, AppError> {
    if let Some(text) = jd {
        return Ok(text);
    }
    match jd_file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| AppError::FileRead {
            path: path.display().to_string(),
            source,
        }),
        None => Ok(String::new()),
    }
}

fn save_results(controller: &UploadScoreController, path: &Path) -> Result<(), AppError> {
    let body = serde_json::to_string_pretty(controller.last_results())?;
    std::fs::write(path, body).map_err(|source| AppError::FileWrite {
        path: path.display().to_string(),
        source,
    })?;
    info!("wrote results to {}", path.display());
    Ok(())
}
