//! `fieldmap` -- command-line front end for the mapping workflow.
//!
//! Drives the same [`Workbench`] a graphical front end would, printing
//! status notices to the terminal.
//!
//! # Environment variables
//!
//! | Variable                        | Default                 | Description             |
//! |---------------------------------|-------------------------|-------------------------|
//! | `FIELDMAP_SERVER_URL`           | `http://127.0.0.1:5000` | Mapping server base URL |
//! | `FIELDMAP_NOTICE_MS`            | `3000`                  | Notice display time     |
//! | `FIELDMAP_REQUEST_TIMEOUT_SECS` | --                      | Per-request timeout     |
//! | `RUST_LOG`                      | `fieldmap=info,...`     | Log filter              |

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use fieldmap_core::error::CoreError;
use fieldmap_core::mapping::FieldMapping;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fieldmap_client::console::ConsolePresentation;
use fieldmap_client::{ClientConfig, HttpMappingApi, Notifier, Workbench};

/// Log filter used when `RUST_LOG` is unset. Covers the binary's own
/// target as well as the library's.
const DEFAULT_LOG_FILTER: &str = "fieldmap=info,fieldmap_client=info";

#[derive(Debug, Parser)]
#[command(name = "fieldmap", version, about = "Reconcile J1/J2 field mappings")]
struct Cli {
    #[command(subcommand)]
    command: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Print current mappings and open mismatches.
    Show,
    /// Add a new mapping.
    Add {
        #[arg(long)]
        j1: String,
        #[arg(long)]
        j2: String,
        #[arg(long = "type")]
        mapping_type: String,
    },
    /// Edit the mapping identified by its current J1 field.
    Edit {
        /// Current J1 field of the mapping.
        j1_field: String,
        /// New J1 field (renames the mapping).
        #[arg(long)]
        j1: Option<String>,
        #[arg(long)]
        j2: Option<String>,
        #[arg(long = "type")]
        mapping_type: Option<String>,
    },
    /// Resolve an open mismatch by pairing it with a J2 field.
    Resolve {
        j1_field: String,
        #[arg(long)]
        j2: String,
        #[arg(long = "type")]
        resolved_type: String,
    },
    /// Persist the current mappings on the server.
    Save,
    /// Generate the output artifact.
    Generate,
    /// Undo changes made since the mappings were loaded.
    Undo,
    /// Print the download address of the generated artifact.
    Download,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(server_url = %config.server_url, "Loaded client configuration");

    let api = match HttpMappingApi::new(&config) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let presentation = Arc::new(match cli.command {
        Action::Show => ConsolePresentation::printing_documents(),
        _ => ConsolePresentation::default(),
    });
    let notifier = Notifier::new(Arc::clone(&presentation), config.notice_duration());
    let bench = Workbench::new(api, Arc::clone(&presentation), notifier);

    if let Err(e) = run(&bench, cli.command).await {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    if presentation.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Api(#[from] fieldmap_client::ApiError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

async fn run(
    bench: &Workbench<HttpMappingApi, ConsolePresentation>,
    action: Action,
) -> Result<(), RunError> {
    match action {
        Action::Show => {
            bench.load().await?;
        }
        Action::Add {
            j1,
            j2,
            mapping_type,
        } => {
            bench.open_add().await;
            bench
                .submit_add(FieldMapping::new(j1, j2, mapping_type))
                .await;
        }
        Action::Edit {
            j1_field,
            j1,
            j2,
            mapping_type,
        } => {
            let document = bench.load().await?;
            let current = document
                .mapping(&j1_field)
                .map(|row| row.mapping.clone())
                .ok_or_else(|| CoreError::NotFound {
                    entity: "mapping",
                    key: j1_field.clone(),
                })?;

            bench.open_edit(current.clone()).await;
            bench
                .submit_edit(FieldMapping {
                    j1_field: j1.unwrap_or(current.j1_field),
                    j2_field: j2.unwrap_or(current.j2_field),
                    mapping_type: mapping_type.unwrap_or(current.mapping_type),
                })
                .await;
        }
        Action::Resolve {
            j1_field,
            j2,
            resolved_type,
        } => {
            let document = bench.load().await?;
            let mismatch = document
                .mismatch(&j1_field)
                .ok_or_else(|| CoreError::NotFound {
                    entity: "mismatch",
                    key: j1_field.clone(),
                })?;

            bench
                .open_resolve(mismatch.j1_field.clone(), mismatch.j1_type.clone())
                .await;
            bench.submit_resolve(j2, resolved_type).await;
        }
        Action::Save => bench.persist_mappings().await,
        Action::Generate => bench.generate_output().await,
        Action::Undo => bench.undo_last_change().await,
        Action::Download => bench.download_output().await,
    }
    Ok(())
}
