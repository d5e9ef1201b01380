use anyhow::Result;
use axum::Router;
use clap::Parser;
use docsift_core::{DocFrequency, VectorizerConfig};
use docsift_server::{body_limit_bytes, build_app, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Number of fitted document sets kept in memory
    #[arg(long, default_value_t = 16)]
    cache_capacity: usize,
    /// Maximum vocabulary size
    #[arg(long, default_value_t = 1000)]
    max_features: usize,
    /// Drop terms found in fewer than this fraction of documents
    #[arg(long, default_value_t = 0.001)]
    min_df: f64,
    /// Maximum request body size in MiB
    #[arg(long, default_value_t = 32)]
    max_body_mb: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        vectorizer: VectorizerConfig {
            max_features: Some(args.max_features),
            min_df: DocFrequency::Fraction(args.min_df),
            ..Default::default()
        },
        cache_capacity: args.cache_capacity,
        max_body_bytes: body_limit_bytes(args.max_body_mb)?,
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
