//! Integration tests for the order pricing calculator

use rusty_money::{Money, iso::KES};
use testresult::TestResult;

use oshocks::{
    basket::Cart,
    config::PricingConfig,
    items::CartLine,
    pricing::{Fulfilment, OrderPricing, calculate_order_pricing},
    promotions::PromoTable,
};

fn cart(lines: &[(&str, i64, u32)]) -> TestResult<Cart<'static>> {
    let lines = lines
        .iter()
        .map(|&(sku, price, quantity)| {
            CartLine::new(sku, sku, Money::from_major(price, KES), quantity)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Cart::with_lines(lines, KES)?)
}

fn price(cart: &Cart<'static>, code: Option<&str>) -> TestResult<OrderPricing<'static>> {
    let table = PromoTable::builtin(KES);
    let promo = code.and_then(|code| table.get(code));

    Ok(calculate_order_pricing(
        cart,
        promo,
        Fulfilment::Delivery,
        &PricingConfig::default(),
    )?)
}

#[test]
fn bike_and_helmets_ship_free() -> TestResult {
    let cart = cart(&[("MTB-001", 45_000, 1), ("HLM-010", 2_500, 2)])?;
    let pricing = price(&cart, None)?;

    assert_eq!(pricing.subtotal(), Money::from_major(50_000, KES));
    assert_eq!(pricing.shipping(), Money::from_major(0, KES));
    assert_eq!(pricing.discount(), Money::from_major(0, KES));
    assert_eq!(pricing.total(), Money::from_major(50_000, KES));

    // 5,000,000 × 16 / 116 = 689,655.17 minor units
    assert_eq!(pricing.vat(), Money::from_minor(689_655, KES));

    Ok(())
}

#[test]
fn savings_combine_markdown_and_promo() -> TestResult {
    let cart = Cart::with_lines(
        [CartLine::new("MTB-001", "Hardtail", Money::from_major(45_000, KES), 1)?
            .with_original_price(Money::from_major(52_000, KES))?],
        KES,
    )?;

    let pricing = price(&cart, Some("BIKE10"))?;

    assert_eq!(pricing.markdown(), Money::from_major(7_000, KES));
    assert_eq!(pricing.discount(), Money::from_major(4_500, KES));
    assert_eq!(pricing.savings()?, Money::from_major(11_500, KES));

    Ok(())
}

#[test]
fn subtotal_is_exact_sum_of_line_totals() -> TestResult {
    let lines = [
        ("BEL-002", 450, 3),
        ("LGT-105", 1_799, 7),
        ("LCK-020", 1_750, 1),
        ("TUB-700", 333, 11),
    ];

    let cart = cart(&lines)?;
    let expected: i64 = lines
        .iter()
        .map(|&(_, unit, qty)| unit * i64::from(qty))
        .sum();

    assert_eq!(price(&cart, None)?.subtotal(), Money::from_major(expected, KES));

    Ok(())
}

#[test]
fn bike10_takes_ten_percent() -> TestResult {
    let cart = cart(&[("RD-300", 10_000, 1)])?;
    let pricing = price(&cart, Some("BIKE10"))?;

    assert_eq!(pricing.discount(), Money::from_major(1_000, KES));
    assert_eq!(pricing.shipping(), Money::from_major(0, KES));
    assert_eq!(pricing.total(), Money::from_major(9_000, KES));
    assert_eq!(pricing.promo_code(), Some("BIKE10"));

    Ok(())
}

#[test]
fn below_threshold_keeps_base_shipping() -> TestResult {
    let cart = cart(&[("ACC-400", 4_000, 1)])?;
    let pricing = price(&cart, Some("BIKE10"))?;

    assert_eq!(pricing.discount(), Money::from_major(400, KES));
    assert_eq!(pricing.shipping(), Money::from_major(300, KES));
    assert_eq!(pricing.total(), Money::from_major(3_900, KES));
    assert_eq!(pricing.amount_to_free_shipping(), Money::from_major(1_000, KES));

    Ok(())
}

#[test]
fn threshold_is_inclusive() -> TestResult {
    let cart = cart(&[("ACC-500", 5_000, 1)])?;
    let pricing = price(&cart, None)?;

    assert!(pricing.shipping_waived());
    assert_eq!(pricing.total(), Money::from_major(5_000, KES));

    Ok(())
}

#[test]
fn fixed_discount_never_goes_below_shipping() -> TestResult {
    let cart = cart(&[("BEL-002", 300, 1)])?;
    let pricing = price(&cart, Some("WELCOME500"))?;

    assert_eq!(pricing.discount(), Money::from_major(300, KES));
    assert_eq!(pricing.shipping(), Money::from_major(300, KES));
    assert_eq!(pricing.total(), pricing.shipping());

    Ok(())
}

#[test]
fn free_shipping_code_waives_shipping() -> TestResult {
    let cart = cart(&[("BEL-002", 450, 1)])?;
    let pricing = price(&cart, Some("FREESHIP"))?;

    assert_eq!(pricing.discount(), Money::from_major(0, KES));
    assert_eq!(pricing.shipping(), Money::from_major(0, KES));
    assert_eq!(pricing.total(), Money::from_major(450, KES));

    Ok(())
}

#[test]
fn store_pickup_waives_shipping() -> TestResult {
    let cart = cart(&[("BEL-002", 450, 1)])?;

    let pricing = calculate_order_pricing(
        &cart,
        None,
        Fulfilment::StorePickup,
        &PricingConfig::default(),
    )?;

    assert!(pricing.shipping_waived());
    assert_eq!(pricing.total(), Money::from_major(450, KES));

    Ok(())
}

#[test]
fn empty_cart_is_all_zero() -> TestResult {
    let cart = Cart::new(KES);
    let pricing = price(&cart, Some("BIKE10"))?;

    assert_eq!(pricing, OrderPricing::zero(KES));
    assert_eq!(pricing.shipping(), Money::from_major(0, KES));
    assert_eq!(pricing.discount(), Money::from_major(0, KES));
    assert_eq!(pricing.total(), Money::from_major(0, KES));
    assert_eq!(pricing.promo_code(), None);

    Ok(())
}

#[test]
fn removing_last_line_returns_to_zero() -> TestResult {
    let mut cart = cart(&[("BEL-002", 450, 1)])?;

    cart.set_quantity("BEL-002", 0)?;

    assert_eq!(price(&cart, None)?, OrderPricing::zero(KES));

    Ok(())
}

#[test]
fn custom_config_changes_policy() -> TestResult {
    let config = PricingConfig::from_yaml_str(
        r#"
free_shipping_threshold: "10,000 KES"
base_shipping_cost: "500 KES"
vat_rate: "16%"
"#,
    )?;

    let cart = cart(&[("ACC-600", 6_000, 1)])?;
    let pricing = calculate_order_pricing(&cart, None, Fulfilment::Delivery, &config)?;

    assert_eq!(pricing.shipping(), Money::from_major(500, KES));
    assert_eq!(pricing.total(), Money::from_major(6_500, KES));

    Ok(())
}
