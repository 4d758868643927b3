//! Listing validator.
//!
//! A pure check run before a listing is persisted. Format-specific rules
//! switch exhaustively over [`ListingFormat`]; each violation is its own
//! error variant naming the offending field path, so callers can enumerate
//! every failure mode independently.

use thiserror::Error;

use crate::config::CurrencyRegistry;
use crate::models::listing::{Listing, ListingFormat};

/// Lowest accepted `priceModifier` percentage, inclusive.
pub const PRICE_MODIFIER_MIN: f64 = -99.99;

/// Highest accepted `priceModifier` percentage, inclusive.
pub const PRICE_MODIFIER_MAX: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingValidationError {
    #[error("listing slug is required")]
    SlugRequired,

    #[error("listing title is required")]
    TitleRequired,

    #[error("cryptocurrency listings require a coinType")]
    CoinTypeRequired,

    #[error("incorrect coinDivisibility")]
    CoinDivisibilityIncorrect,

    #[error("priceModifier out of range: [{min:.2}, {max:.2}]")]
    PriceModifierOutOfRange { min: f64, max: f64 },

    #[error("cryptocurrency listings may not use the field \"{0}\"")]
    CryptocurrencyIllegalField(String),

    #[error("market price listings may not use the field \"{0}\"")]
    MarketPriceIllegalField(String),

    #[error("cryptocurrency listings require a quantity greater than zero")]
    CryptocurrencySkuQuantityInvalid,
}

/// Check a candidate listing against the domain rules for its format.
///
/// Pure: no side effects, no locking. The registry supplies each coin's
/// canonical divisibility.
pub fn validate_listing(
    listing: &Listing,
    currencies: &CurrencyRegistry,
) -> Result<(), ListingValidationError> {
    if listing.slug.trim().is_empty() {
        return Err(ListingValidationError::SlugRequired);
    }
    if listing.item.title.trim().is_empty() {
        return Err(ListingValidationError::TitleRequired);
    }

    match listing.metadata.format {
        ListingFormat::PhysicalGood => Ok(()),
        ListingFormat::MarketPrice => validate_market_price(listing),
        ListingFormat::Cryptocurrency => validate_cryptocurrency(listing, currencies),
    }
}

fn validate_market_price(listing: &Listing) -> Result<(), ListingValidationError> {
    if listing.item.price != 0 {
        return Err(ListingValidationError::MarketPriceIllegalField(
            "item.price".into(),
        ));
    }
    Ok(())
}

fn validate_cryptocurrency(
    listing: &Listing,
    currencies: &CurrencyRegistry,
) -> Result<(), ListingValidationError> {
    let metadata = &listing.metadata;

    if metadata.coin_type.trim().is_empty() {
        return Err(ListingValidationError::CoinTypeRequired);
    }

    // Zero never matches a canonical divisibility, so it always fails here.
    if metadata.coin_divisibility != currencies.divisibility(&metadata.coin_type) {
        return Err(ListingValidationError::CoinDivisibilityIncorrect);
    }

    // The modifier is quoted to two decimal places on the wire; round before
    // the bounds check so e.g. 1000.001 still lands on the boundary.
    let modifier = (metadata.price_modifier * 100.0).round() / 100.0;
    if !(PRICE_MODIFIER_MIN..=PRICE_MODIFIER_MAX).contains(&modifier) {
        return Err(ListingValidationError::PriceModifierOutOfRange {
            min: PRICE_MODIFIER_MIN,
            max: PRICE_MODIFIER_MAX,
        });
    }

    if !metadata.pricing_currency.is_empty() {
        return Err(ListingValidationError::CryptocurrencyIllegalField(
            "metadata.pricingCurrency".into(),
        ));
    }
    if !listing.item.condition.is_empty() {
        return Err(ListingValidationError::CryptocurrencyIllegalField(
            "item.condition".into(),
        ));
    }
    if !listing.item.options.is_empty() {
        return Err(ListingValidationError::CryptocurrencyIllegalField(
            "item.options".into(),
        ));
    }
    if !listing.shipping_options.is_empty() {
        return Err(ListingValidationError::CryptocurrencyIllegalField(
            "shippingOptions".into(),
        ));
    }
    if !listing.coupons.is_empty() {
        return Err(ListingValidationError::CryptocurrencyIllegalField(
            "coupons".into(),
        ));
    }

    // A crypto listing's quantity is a concrete trackable balance, never the
    // "untracked inventory" sentinel physical listings get.
    if listing.item.skus.iter().any(|sku| sku.quantity <= 0) {
        return Err(ListingValidationError::CryptocurrencySkuQuantityInvalid);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::{
        Coupon, Item, ItemOption, ListingMetadata, ShippingOption, Sku,
    };

    fn physical_listing(slug: &str) -> Listing {
        Listing {
            slug: slug.into(),
            metadata: ListingMetadata {
                format: ListingFormat::PhysicalGood,
                pricing_currency: "USD".into(),
                accepted_currencies: vec!["BTC".into()],
                ..Default::default()
            },
            item: Item {
                title: "Ron Swanson Tshirt".into(),
                price: 100,
                condition: "new".into(),
                options: vec![ItemOption {
                    name: "Size".into(),
                    variants: vec!["M".into(), "L".into()],
                }],
                skus: vec![Sku {
                    product_id: "1".into(),
                    quantity: 12,
                }],
                ..Default::default()
            },
            shipping_options: vec![ShippingOption {
                name: "usps".into(),
                regions: vec!["ALL".into()],
                service: "standard".into(),
            }],
            coupons: vec![Coupon {
                title: "Insider's Discount".into(),
                discount_code: "insider".into(),
                percent_discount: 5.0,
            }],
            ..Default::default()
        }
    }

    fn crypto_listing(slug: &str) -> Listing {
        Listing {
            slug: slug.into(),
            metadata: ListingMetadata {
                format: ListingFormat::Cryptocurrency,
                coin_type: "ZEC".into(),
                coin_divisibility: 100_000_000,
                accepted_currencies: vec!["BTC".into()],
                ..Default::default()
            },
            item: Item {
                title: "T-shirt".into(),
                skus: vec![Sku {
                    product_id: "1".into(),
                    quantity: 100_000,
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn registry() -> CurrencyRegistry {
        CurrencyRegistry::with_defaults()
    }

    #[test]
    fn test_physical_listing_is_valid() {
        assert_eq!(validate_listing(&physical_listing("tshirt"), &registry()), Ok(()));
    }

    #[test]
    fn test_crypto_listing_is_valid() {
        assert_eq!(validate_listing(&crypto_listing("crypto"), &registry()), Ok(()));
    }

    #[test]
    fn test_price_modifier_bounds_are_inclusive_after_rounding() {
        let registry = registry();
        let mut listing = crypto_listing("crypto");

        listing.metadata.price_modifier = PRICE_MODIFIER_MAX;
        assert_eq!(validate_listing(&listing, &registry), Ok(()));

        listing.metadata.price_modifier = PRICE_MODIFIER_MIN;
        assert_eq!(validate_listing(&listing, &registry), Ok(()));

        // Rounds back onto the boundary.
        listing.metadata.price_modifier = PRICE_MODIFIER_MAX + 0.001;
        assert_eq!(validate_listing(&listing, &registry), Ok(()));
        listing.metadata.price_modifier = PRICE_MODIFIER_MIN - 0.001;
        assert_eq!(validate_listing(&listing, &registry), Ok(()));

        // Past the boundary once rounded.
        listing.metadata.price_modifier = PRICE_MODIFIER_MAX + 0.01;
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::PriceModifierOutOfRange {
                min: PRICE_MODIFIER_MIN,
                max: PRICE_MODIFIER_MAX,
            })
        );
        listing.metadata.price_modifier = PRICE_MODIFIER_MIN - 1.0;
        assert!(matches!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::PriceModifierOutOfRange { .. })
        ));
    }

    #[test]
    fn test_crypto_listing_requires_coin_type() {
        let mut listing = crypto_listing("crypto");
        listing.metadata.coin_type = String::new();
        assert_eq!(
            validate_listing(&listing, &registry()),
            Err(ListingValidationError::CoinTypeRequired)
        );
    }

    #[test]
    fn test_coin_divisibility_must_match_canonical() {
        let registry = registry();
        let mut listing = crypto_listing("crypto");

        listing.metadata.coin_divisibility = 10_000_000;
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::CoinDivisibilityIncorrect)
        );

        listing.metadata.coin_divisibility = 0;
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::CoinDivisibilityIncorrect)
        );
    }

    #[test]
    fn test_each_illegal_crypto_field_is_reported_by_path() {
        let registry = registry();
        let physical = physical_listing("physical");

        let mut listing = crypto_listing("crypto");
        listing.metadata.pricing_currency = "btc".into();
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::CryptocurrencyIllegalField(
                "metadata.pricingCurrency".into()
            ))
        );

        let mut listing = crypto_listing("crypto");
        listing.item.condition = "new".into();
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::CryptocurrencyIllegalField(
                "item.condition".into()
            ))
        );

        let mut listing = crypto_listing("crypto");
        listing.item.options = physical.item.options.clone();
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::CryptocurrencyIllegalField(
                "item.options".into()
            ))
        );

        let mut listing = crypto_listing("crypto");
        listing.shipping_options = physical.shipping_options.clone();
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::CryptocurrencyIllegalField(
                "shippingOptions".into()
            ))
        );

        let mut listing = crypto_listing("crypto");
        listing.coupons = physical.coupons.clone();
        assert_eq!(
            validate_listing(&listing, &registry),
            Err(ListingValidationError::CryptocurrencyIllegalField(
                "coupons".into()
            ))
        );
    }

    #[test]
    fn test_market_price_listing_rejects_nonzero_price() {
        let mut listing = physical_listing("listing");
        listing.metadata.format = ListingFormat::MarketPrice;
        listing.item.price = 1;
        assert_eq!(
            validate_listing(&listing, &registry()),
            Err(ListingValidationError::MarketPriceIllegalField(
                "item.price".into()
            ))
        );

        listing.item.price = 0;
        assert_eq!(validate_listing(&listing, &registry()), Ok(()));
    }

    #[test]
    fn test_untracked_quantity_is_fine_for_physical_but_not_crypto() {
        let registry = registry();

        for quantity in [0, -1] {
            let mut physical = physical_listing("physical");
            physical.item.skus[0].quantity = quantity;
            assert_eq!(validate_listing(&physical, &registry), Ok(()));

            let mut crypto = crypto_listing("crypto");
            crypto.item.skus[0].quantity = quantity;
            assert_eq!(
                validate_listing(&crypto, &registry),
                Err(ListingValidationError::CryptocurrencySkuQuantityInvalid)
            );
        }
    }
}
