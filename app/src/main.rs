mod infrastructure;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use domain_concat::command::{AppendCommand, ConcatManyCommand};
use domain_concat::model::vo::ObjectUrl;
use domain_concat::service::{ObjectConcatService, ObjectStoreService, ProbeService};
use service_concat::{ObjectConcatServiceImpl, ProbeServiceImpl};
use tracing_subscriber::EnvFilter;

use infrastructure::config::S3ConcatConfig;
use infrastructure::service::S3ObjectStoreService;

#[derive(Parser)]
#[command(
    name = "s3concat",
    about = "Concatenate objects in S3-compatible storage, copying server-side wherever the store allows."
)]
struct Cli {
    /// Configuration file; `S3CONCAT_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append bytes to an object, creating it when absent.
    Append {
        /// Destination url, e.g. s3://bucket/key.
        url: String,
        /// File holding the bytes to append; stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Concatenate objects into the first listed url.
    Concat {
        /// Object urls; the first is the destination.
        urls: Vec<String>,
        /// Delete the consumed sources after a successful concatenation.
        #[arg(long)]
        remove_orig: bool,
    },
}

async fn build_service(config: &S3ConcatConfig) -> ObjectConcatServiceImpl {
    let store: Arc<dyn ObjectStoreService> =
        Arc::new(S3ObjectStoreService::from_config(config).await);
    let probe_service: Arc<dyn ProbeService> =
        Arc::new(ProbeServiceImpl::builder().store(store.clone()).build());
    ObjectConcatServiceImpl::builder()
        .store(store)
        .probe_service(probe_service)
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = S3ConcatConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded store configuration");

    // Addresses are validated before the store client is even built.
    match cli.command {
        Command::Append { url, file } => {
            let url: ObjectUrl = url.parse()?;
            let content = match file {
                Some(path) => std::fs::read(path)?,
                None => {
                    let mut buf = vec![];
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            build_service(&config)
                .await
                .append(AppendCommand { url, content })
                .await?;
        }
        Command::Concat { urls, remove_orig } => {
            let urls = urls
                .iter()
                .map(|url| url.parse())
                .collect::<Result<Vec<ObjectUrl>, _>>()?;
            build_service(&config)
                .await
                .concat_many(ConcatManyCommand {
                    urls,
                    remove_originals: remove_orig,
                })
                .await?;
        }
    }
    Ok(())
}
