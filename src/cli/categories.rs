use clap::Args;
use oshocks::api::{CatalogClient, load_categories};

#[derive(Debug, Args)]
pub(crate) struct CategoriesArgs {
    /// Catalog API base URL
    #[arg(long, env = "OSHOCKS_API_URL")]
    api_url: String,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: CategoriesArgs) -> anyhow::Result<()> {
    let client = CatalogClient::new(args.api_url);
    let categories = load_categories(&client).await;

    if categories.is_empty() {
        println!("No categories available");
    }

    for category in categories {
        println!("{:>4}  {}", category.id, category.name);
    }

    Ok(())
}
