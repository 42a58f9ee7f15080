use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Args;
use jiff::Zoned;
use oshocks::api::{CatalogApi, CatalogClient, ProductPayload};
use tracing::info;

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product YAML file
    #[arg(short, long)]
    file: PathBuf,

    /// Existing product id; creates a new product when omitted
    #[arg(long)]
    id: Option<u64>,

    /// Catalog API base URL
    #[arg(long, env = "OSHOCKS_API_URL")]
    api_url: String,

    /// Seller bearer token
    #[arg(long, env = "OSHOCKS_API_TOKEN", hide_env_values = true)]
    token: String,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: ProductArgs) -> anyhow::Result<()> {
    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let payload: ProductPayload = serde_norway::from_str(&contents)?;

    payload.validate(Zoned::now().date())?;

    let client = CatalogClient::new(args.api_url);

    let product = match args.id {
        Some(id) => client.update_product(&args.token, id, &payload).await?,
        None => client.create_product(&args.token, &payload).await?,
    };

    info!(id = product.id, "Saved product");

    println!("{}: {} (KES {})", product.id, product.name, product.price);

    Ok(())
}
