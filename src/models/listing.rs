//! Listing document model.
//!
//! A listing is a signed document describing an item for sale. Field names
//! follow the JSON wire surface (camelCase); structural rules live in
//! [`crate::validation`], not here.

use serde::{Deserialize, Serialize};

/// Pricing format of a listing. Closed set: validation switches exhaustively
/// over this tag, so a new format is a compile error until handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingFormat {
    /// A physical item with fixed pricing.
    PhysicalGood,
    /// A quantity of a cryptocurrency sold at market rate plus a modifier.
    Cryptocurrency,
    /// Priced at market rate at purchase time; the listing carries no price.
    MarketPrice,
}

impl Default for ListingFormat {
    fn default() -> Self {
        ListingFormat::PhysicalGood
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingMetadata {
    pub format: ListingFormat,
    /// Currency the item price is denominated in. Illegal for
    /// CRYPTOCURRENCY listings.
    pub pricing_currency: String,
    /// Percentage offset from market rate. Only meaningful for
    /// CRYPTOCURRENCY listings.
    pub price_modifier: f64,
    /// Coin being sold by a CRYPTOCURRENCY listing.
    pub coin_type: String,
    /// Base-unit divisibility of `coin_type`; must match the coin's
    /// canonical divisibility.
    pub coin_divisibility: u64,
    /// Coins the vendor accepts as payment.
    pub accepted_currencies: Vec<String>,
}

/// Stock-keeping unit. A zero or negative quantity means "untracked
/// inventory" for physical and market-priced listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sku {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemOption {
    pub name: String,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub title: String,
    pub description: String,
    /// Price in the smallest unit of `pricingCurrency`. Must be zero for
    /// MARKET_PRICE listings.
    pub price: u64,
    pub condition: String,
    pub options: Vec<ItemOption>,
    pub skus: Vec<Sku>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingOption {
    pub name: String,
    pub regions: Vec<String>,
    pub service: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coupon {
    pub title: String,
    pub discount_code: String,
    pub percent_discount: f64,
}

/// A listing document. The `slug` is unique among the node's active listings
/// and immutable once created; deleting the listing frees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    pub slug: String,
    pub metadata: ListingMetadata,
    pub item: Item,
    pub shipping_options: Vec<ShippingOption>,
    pub coupons: Vec<Coupon>,
    pub terms_and_conditions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wire_names_are_screaming_snake() {
        let json = serde_json::to_string(&ListingFormat::Cryptocurrency).unwrap();
        assert_eq!(json, "\"CRYPTOCURRENCY\"");
        let parsed: ListingFormat = serde_json::from_str("\"MARKET_PRICE\"").unwrap();
        assert_eq!(parsed, ListingFormat::MarketPrice);
    }

    #[test]
    fn test_listing_round_trips_through_json() {
        let listing = Listing {
            slug: "ron-swanson-tshirt".into(),
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
                skus: vec![Sku {
                    product_id: "1".into(),
                    quantity: 12,
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.contains("\"pricingCurrency\":\"USD\""));
        let back: Listing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, listing);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let listing: Listing = serde_json::from_str(r#"{"slug":"bare"}"#).unwrap();
        assert_eq!(listing.slug, "bare");
        assert_eq!(listing.metadata.format, ListingFormat::PhysicalGood);
        assert!(listing.coupons.is_empty());
    }
}
