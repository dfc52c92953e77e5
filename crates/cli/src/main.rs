use crate::{commands::Commands, env::load_settings, error::CliError};
use clap::Parser;
use engine_core::PostsService;
use model::wire;
use tracing::info;
use tracing_subscriber::EnvFilter;
use translator::{Translator, TranslatorConfig};

mod commands;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "access-filter",
    version = "0.1.0",
    about = "Policy-filtered document search"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            input,
            relation,
            strict,
            format,
        } => {
            let body = tokio::fs::read_to_string(&input).await?;
            let residuals = wire::decode_compile_response(&body)?;

            let mut config = TranslatorConfig::for_relation(relation);
            if strict {
                config = config.strict();
            }

            let decision = Translator::new(config).translate(&residuals)?;
            output::print_json(&output::render_decision(&decision, format)?)?;
        }
        Commands::Search { user, id, env_file } => {
            let settings = load_settings(env_file.as_deref())?;
            let service = PostsService::from_settings(
                settings.opa_client()?,
                settings.elastic_client()?,
                &settings,
            );

            let response = match id {
                Some(id) => service.get_post(&user, &id).await,
                None => service.list_posts(&user).await,
            };
            output::print_json(&response.body)?;

            if !response.is_success() {
                return Err(CliError::RequestFailed(response.status));
            }
        }
        Commands::InitIndex { env_file } => {
            let settings = load_settings(env_file.as_deref())?;
            let client = settings.elastic_client()?;
            if !client.ensure_index().await? {
                info!("Index '{}' already exists", client.index());
            }
        }
    }

    Ok(())
}
