mod client;
mod config;
mod live;
mod output;
#[cfg(test)]
mod test_helpers;

use clap::{Args, Parser, Subcommand};
use previews::panel::{PreviewPanel, REMOVE_NEW_LINES};
use tracing_subscriber::EnvFilter;

use crate::client::{ClientError, PreviewClient};
use crate::config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts,
};

#[derive(Parser, Debug)]
#[command(
    name = "templating-preview",
    about = "Preview document templates against the templating engine"
)]
struct Cli {
    /// API root, e.g. `http://localhost:8000/api/`.
    #[arg(long, env = "TEMPLATING_PREVIEW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "TEMPLATING_PREVIEW_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "TEMPLATING_PREVIEW_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, env = "TEMPLATING_PREVIEW_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List documents usable as preview context.
    Docs {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Render a template once.
    Render(RenderArgs),
    /// Read template edits from stdin and preview each change.
    Live(LiveArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long)]
    template: String,

    #[arg(long)]
    doc_id: Option<i64>,

    #[arg(long, default_value_t = false)]
    keep_new_lines: bool,

    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct LiveArgs {
    #[arg(long)]
    doc_id: Option<i64>,

    #[arg(long, default_value_t = false, help = "Start with live preview off; enable with `:on`")]
    paused: bool,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::new(
        &cli.base_url,
        cli.token,
        Timeouts {
            request_secs: cli.timeout_secs,
            connect_secs: cli.connect_timeout_secs,
        },
    );
    let client = PreviewClient::new(&config)?;

    match cli.command {
        Command::Docs { json } => run_docs(&client, json).await,
        Command::Render(args) => run_render(&client, args).await,
        Command::Live(args) => run_live(&client, args).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_docs(client: &PreviewClient, json: bool) -> Result<(), ClientError> {
    let docs = client.list_previewable_documents().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&docs).map_err(previews::PreviewError::from)?);
    } else {
        println!("{}", output::format_documents(&docs));
    }
    Ok(())
}

async fn run_render(client: &PreviewClient, args: RenderArgs) -> Result<(), ClientError> {
    let remove_new_lines = REMOVE_NEW_LINES && !args.keep_new_lines;
    let result = client
        .request_preview(&args.template, args.doc_id, remove_new_lines)
        .await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result).map_err(previews::PreviewError::from)?);
    } else {
        println!("{}", output::format_result(&result));
    }
    Ok(())
}

async fn run_live(client: &PreviewClient, args: LiveArgs) -> Result<(), ClientError> {
    let mut panel = PreviewPanel::new(!args.paused);
    panel.select_document(args.doc_id);
    tracing::info!(endpoint = client.endpoint(), doc_id = ?args.doc_id, "starting live preview");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let summary = live::run_live(client, panel, stdin, &mut stdout).await?;

    eprintln!(
        "live preview complete: issued={} applied={} stale={} failed={}",
        summary.issued, summary.applied, summary.stale, summary.failed
    );
    Ok(())
}
