use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Args;
use oshocks::{
    config::PricingConfig,
    fixtures::Fixture,
    pricing::{Fulfilment, calculate_order_pricing},
    promotions::{PromoSession, PromoTable},
    receipt::write_receipt,
};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Cart fixture name, loaded from `<fixtures>/carts/<name>.yml`
    #[arg(short, long)]
    cart: String,

    /// Promo code to apply
    #[arg(short, long)]
    promo: Option<String>,

    /// Collect from the store instead of delivery
    #[arg(long)]
    pickup: bool,

    /// Promotions fixture name; the built-in codes are used when omitted
    #[arg(long)]
    promos: Option<String>,

    /// Pricing config YAML file
    #[arg(long, env = "OSHOCKS_PRICING_CONFIG")]
    config: Option<PathBuf>,

    /// Fixture directory
    #[arg(short, long, default_value = "./fixtures")]
    fixtures: PathBuf,
}

#[expect(clippy::print_stderr, reason = "CLI output")]
pub(crate) async fn run(args: QuoteArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => PricingConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load pricing config {}", path.display()))?,
        None => PricingConfig::default(),
    };

    let mut fixture = Fixture::with_base_path(&args.fixtures);

    fixture.load_cart(&args.cart)?;

    let promos = match &args.promos {
        Some(name) => {
            fixture.load_promotions(name)?;
            fixture.promotions()?.clone()
        }
        None => PromoTable::builtin(config.currency),
    };

    let cart = fixture.take_cart()?;
    let subtotal = cart.subtotal()?;
    let mut session = PromoSession::new();

    if let Some(code) = &args.promo
        && let Err(reason) = session.apply(&promos, code, subtotal).await
    {
        eprintln!("{reason}");
    }

    let fulfilment = if args.pickup {
        Fulfilment::StorePickup
    } else {
        Fulfilment::Delivery
    };

    let pricing = calculate_order_pricing(&cart, session.applied(), fulfilment, &config)?;

    write_receipt(io::stdout().lock(), &cart, &pricing)?;

    Ok(())
}
