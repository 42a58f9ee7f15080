//! Integration tests for the bundled fixture files

use rusty_money::{Money, iso::KES};
use testresult::TestResult;

use oshocks::{
    config::PricingConfig,
    fixtures::Fixture,
    pricing::{Fulfilment, calculate_order_pricing},
    promotions::PromoSession,
    receipt::write_receipt,
};

#[test]
fn bundled_pricing_config_matches_defaults() -> TestResult {
    let loaded = PricingConfig::from_yaml_file("fixtures/pricing.yml")?;
    let defaults = PricingConfig::default();

    assert_eq!(loaded.free_shipping_threshold, defaults.free_shipping_threshold);
    assert_eq!(loaded.base_shipping_cost, defaults.base_shipping_cost);
    assert_eq!(loaded.currency, defaults.currency);

    Ok(())
}

#[test]
fn bundled_promotions_hold_shop_codes() -> TestResult {
    let mut fixture = Fixture::new();

    fixture.load_promotions("default")?;

    let table = fixture.promotions()?;
    let codes: Vec<&str> = table.iter().map(|promo| promo.code()).collect();

    assert_eq!(codes, ["BIKE10", "BIKE2024", "FREESHIP", "WELCOME500"]);

    Ok(())
}

#[tokio::test]
async fn sample_cart_quote_with_bundled_promo() -> TestResult {
    let mut fixture = Fixture::new();

    fixture.load_promotions("default")?.load_cart("sample")?;

    let cart = fixture.take_cart()?;
    let mut session = PromoSession::new();

    session
        .apply(fixture.promotions()?, "bike2024", cart.subtotal()?)
        .await?;

    let pricing = calculate_order_pricing(
        &cart,
        session.applied(),
        Fulfilment::Delivery,
        &PricingConfig::default(),
    )?;

    assert_eq!(pricing.subtotal(), Money::from_major(50_000, KES));
    assert_eq!(pricing.discount(), Money::from_major(7_500, KES));
    assert_eq!(pricing.total(), Money::from_major(42_500, KES));

    let mut out = Vec::new();

    write_receipt(&mut out, &cart, &pricing)?;

    let text = String::from_utf8(out)?;

    assert!(text.contains("Discount (BIKE2024):"));
    assert!(text.contains("Hardtail 29er Mountain Bike"));

    Ok(())
}

#[test]
fn empty_cart_fixture_prices_to_zero() -> TestResult {
    let mut fixture = Fixture::new();

    fixture.load_cart("empty")?;

    let cart = fixture.take_cart()?;
    let pricing =
        calculate_order_pricing(&cart, None, Fulfilment::Delivery, &PricingConfig::default())?;

    assert!(cart.is_empty());
    assert_eq!(pricing.total(), Money::from_major(0, KES));

    Ok(())
}
