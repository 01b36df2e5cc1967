mod demo;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rover_dom::ssr::{bootstrap_payload, embed_payload, render_to_string, RenderRequest};
use rover_dom::ActivePlatform;
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(name = "rover")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set ("nope" disables logging)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demo view to markup through the server-side path
    Render {
        /// View id
        #[arg(long)]
        id: String,
        /// Loader output as JSON
        #[arg(long, default_value = "null")]
        data: String,
        /// Route parameter, repeatable
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        /// Query parameter, repeatable
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
        /// Also print the bootstrap payload script
        #[arg(long)]
        payload: bool,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in `{}`", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

fn init_logging(level: &str) {
    if level == "nope" {
        return;
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Render {
            id,
            data,
            params,
            query,
            payload,
        } => {
            let data: serde_json::Value =
                serde_json::from_str(&data).context("--data is not valid JSON")?;
            let request = RenderRequest {
                id,
                data,
                params: params.into_iter().collect::<BTreeMap<_, _>>(),
                query: query.into_iter().collect::<BTreeMap<_, _>>(),
            };

            let mut active = ActivePlatform::default();
            let markup = render_to_string(&mut active, &request, demo::make_view)
                .with_context(|| format!("failed to render view `{}`", request.id))?;
            println!("{}", markup);

            if payload {
                let payload = bootstrap_payload(&request.data);
                println!(
                    "<script id=\"__ROVER_DATA__\" type=\"application/json\">{}</script>",
                    embed_payload(&payload)
                );
            }
            Ok(())
        }
    }
}
