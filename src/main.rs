use std::{net::Ipv4Addr, sync::Arc};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info, warn};

use crate::{
    chunk_key::Packing,
    dataset::DatasetParams,
    generate::Generator,
    routes::{AppState, Snapshot},
    sample::SampleLands,
};

mod chunk_key;
mod dataset;
mod generate;
mod logging;
mod routes;
mod sample;
mod validate;

/// Mock lands/regions API for exercising a map client by hand.
#[derive(Parser, Debug)]
struct Cli {
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
    /// Seed the generator for a reproducible dataset.
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    variant: Variant,
}

#[derive(Subcommand, Debug)]
enum Variant {
    /// Serve four hand-written lands on /lands.
    Sample,
    /// Serve generated regions whose chunks scatter around a random center.
    Jitter(GenerateArgs),
    /// Serve generated regions grown by a random walk, with holes carved out.
    Walk(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value_t = 20)]
    regions: usize,
    #[arg(long, default_value_t = 100)]
    chunks_per_region: usize,
    #[arg(long, default_value = "world")]
    world: String,
    /// Chunk key layout. Defaults to x-low for jitter and x-high for walk.
    #[arg(long, value_enum)]
    packing: Option<Packing>,
}

impl GenerateArgs {
    fn into_params(self, generator: Generator, default_packing: Packing) -> DatasetParams {
        DatasetParams {
            regions: self.regions,
            chunks_per_region: self.chunks_per_region,
            generator,
            packing: self.packing.unwrap_or(default_packing),
            world: self.world,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging()?;

    let snapshot = build_snapshot(cli.variant, cli.seed)?;
    let port = cli.port;

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    println!("{}", snapshot.banner(port));

    let app = axum::routing::any(routes::handler).with_state(AppState {
        snapshot: Arc::new(snapshot),
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

fn build_snapshot(variant: Variant, seed: Option<u64>) -> anyhow::Result<Snapshot> {
    let params = match variant {
        Variant::Sample => return Ok(Snapshot::Sample(SampleLands::new())),
        Variant::Jitter(args) => args.into_params(Generator::jitter(), Packing::XLow),
        Variant::Walk(args) => args.into_params(Generator::walk(), Packing::XHigh),
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let manifest = dataset::build_manifest(&mut rng, &params)?;
    for region in &manifest.regions {
        if let Err(errors) = validate::validate_region(region) {
            let errors = errors.iter().map(ToString::to_string).collect::<Vec<_>>();
            warn!(id = %region.id, ?errors, "region would be rejected by the client");
        }
    }
    info!(
        regions = manifest.regions.len(),
        chunks = manifest.regions.iter().map(|r| r.chunks.len()).sum::<usize>(),
        hash = %manifest.hash,
        "generated dataset"
    );

    Ok(Snapshot::Generated(manifest))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    println!("\nShutting down server...");
}
