use clap::Parser;
use tracing::info;

use sa_ai::providers::ProviderKeys;
use sa_core::types::{AnalyzeRequest, Provider};
use sa_core::{Error, Result};
use sa_parsers::AnalysisPipeline;
use sa_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP analysis service
    Serve {
        #[arg(long, default_value = "0.0.0.0:8787")]
        addr: String,
    },
    /// Analyze a single article URL and print the result as JSON
    Analyze {
        url: String,
        /// AI backend to use: openai or deepseek
        #[arg(long)]
        provider: String,
        /// Override the backend's default model
        #[arg(long)]
        model: Option<String>,
        #[arg(long, default_value_t = 12)]
        top_k: usize,
        #[arg(long, default_value = "zh")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let keys = ProviderKeys::from_env();
    let pipeline = AnalysisPipeline::new(keys);

    match cli.command {
        Commands::Serve { addr } => {
            let app = create_app(AppState { pipeline });
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .map_err(|e| Error::Internal(e.into()))?;
            info!("🚀 analysis service listening on {}", addr);
            axum::serve(listener, app)
                .await
                .map_err(|e| Error::Internal(e.into()))?;
        }
        Commands::Analyze {
            url,
            provider,
            model,
            top_k,
            language,
        } => {
            let provider = provider.parse::<Provider>()?;
            info!("📰 analyzing {} via {}", url, provider);
            let request = AnalyzeRequest {
                url,
                provider,
                model,
                top_k,
                language,
            };
            let response = pipeline.run(request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
