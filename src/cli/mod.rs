use clap::{Parser, Subcommand};

mod categories;
pub(crate) mod logging;
mod product;
mod quote;
mod size;

#[derive(Debug, Parser)]
#[command(name = "oshocks", about = "Oshocks bike shop pricing tools", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: logging::LoggingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price a cart and print the receipt
    Quote(quote::QuoteArgs),

    /// Recommend a frame size
    Size(size::SizeArgs),

    /// List catalog categories
    Categories(categories::CategoriesArgs),

    /// Create or update a seller product
    Product(product::ProductArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Quote(args) => quote::run(args).await,
            Commands::Size(args) => size::run(&args),
            Commands::Categories(args) => categories::run(args).await,
            Commands::Product(args) => product::run(args).await,
        }
    }
}
