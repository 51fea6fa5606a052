use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shopterms::{api, Config, Console, Engine, EtsyClient, ShopAnalyzer};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Top listing terms for Etsy shops", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prompt for shop names (default)
    Interactive {
        /// Skip the analysis of the default shops at startup
        #[arg(long)]
        skip_default: bool,
    },
    /// Analyze the given shops and exit
    Analyze {
        #[arg(required = true)]
        shops: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the analysis over HTTP
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn interactive(
    engine: Engine<EtsyClient>,
    config: &Config,
    skip_default: bool,
) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut console = Console::new(&engine, stdin, tokio::io::stdout());
    let default_shops = (!skip_default).then_some(config.default_shops.as_slice());
    console.run(default_shops).await?;
    Ok(())
}

async fn analyze(engine: Engine<EtsyClient>, shops: &[String], json: bool) -> Result<()> {
    let analyses = engine.analyze_shops(shops).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analyses)?);
    } else {
        let top_n = engine.analyzer().top_n();
        for analysis in &analyses {
            print!("{}", shopterms::console::render_analysis(analysis, top_n));
        }
    }
    Ok(())
}

async fn serve(engine: Engine<EtsyClient>, addr: SocketAddr) -> Result<()> {
    let app = api::create_router(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::from_file(&args.config)?;
    let client = EtsyClient::from_config(&config)?;
    let stop_words = config.stop_words();
    tracing::debug!(
        stop_words = stop_words.len(),
        base_url = %config.api_base_url,
        "loaded configuration"
    );
    let engine = Engine::new(client, ShopAnalyzer::new(stop_words));

    match args.command.unwrap_or(Command::Interactive { skip_default: false }) {
        Command::Interactive { skip_default } => interactive(engine, &config, skip_default).await,
        Command::Analyze { shops, json } => analyze(engine, &shops, json).await,
        Command::Serve { addr } => serve(engine, addr).await,
    }
}
