mod generate;
mod upload;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopfeed")]
#[command(about = "Generate per-channel product feeds from Shopify catalogs")]
struct Cli {
    /// Upload the generated feeds to each store's Files after generation
    #[arg(long)]
    upload: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = shopfeed_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let stores = shopfeed_core::load_stores(&config.stores_path)?.stores;
    let channels = shopfeed_core::load_channels(&config.channels_path)?.channels;
    let mappings = generate::compile_mappings(&channels)?;

    let written = generate::generate_feeds(&config, &stores, &mappings).await?;
    println!("feed generation complete: {written} feeds written");

    let published = shopfeed_feed::copy_to_public(&config.feeds_dir, &config.public_dir)?;
    println!(
        "copied {} feeds to {}",
        published.len(),
        config.public_dir.display()
    );
    for name in &published {
        println!("  {name}");
    }

    if cli.upload {
        let uploaded = upload::upload_all(&config, &stores).await?;
        upload::print_summary(&uploaded);
    }

    Ok(())
}
