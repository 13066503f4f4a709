pub mod client;
pub mod utils;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;

use crate::geometry::GeometryKind;
use client::FeatureClient;

#[derive(Parser)]
#[command(name = "geofeat")]
#[command(about = "geofeat - command-line client for the GeoFeature API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "GEOFEATURES_URL", default_value = "http://localhost:8000", help = "Server base URL")]
    pub url: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List all stored features")]
    List,

    #[command(about = "Store a geometry (from --geometry, --file or stdin)")]
    Create {
        #[arg(long = "type", help = "Feature kind: Point, LineString or Polygon")]
        kind: GeometryKind,
        #[arg(long, conflicts_with = "file", help = "GeoJSON geometry object")]
        geometry: Option<String>,
        #[arg(long, help = "File holding a GeoJSON geometry object")]
        file: Option<PathBuf>,
    },

    #[command(about = "Delete a feature by id")]
    Delete {
        #[arg(help = "Feature id")]
        id: i32,
    },

    #[command(about = "Show feature counts per kind")]
    Stats,

    #[command(about = "Check server and database health")]
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = FeatureClient::new(&cli.url)?;

    match cli.command {
        Commands::List => {
            let collection = client.list().await?;
            utils::output_features(&output_format, &collection)
        }
        Commands::Create { kind, geometry, file } => {
            let geometry = read_geometry(geometry, file).await?;
            let id = client.create(kind, geometry).await?;
            utils::output_success(&output_format, &format!("Created feature {}", id), Some(json!({ "id": id })))
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            utils::output_success(&output_format, &format!("Deleted feature {}", id), Some(json!({ "id": id })))
        }
        Commands::Stats => {
            let stats = client.stats().await?;
            utils::output_stats(&output_format, &stats)
        }
        Commands::Health => {
            let health = client.health().await?;
            utils::output_value(&output_format, &health)
        }
    }
}

async fn read_geometry(inline: Option<String>, file: Option<PathBuf>) -> anyhow::Result<Value> {
    let text = match (inline, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read geometry from stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("geometry is not valid JSON")
}
