//! Listing lifecycle: validate-then-persist, slug uniqueness, free-on-delete.

use std::sync::Arc;

use tracing::info;

use crate::config::CurrencyRegistry;
use crate::error::Error;
use crate::models::listing::Listing;
use crate::store::ListingStore;
use crate::validation::validate_listing;

pub struct ListingService {
    store: Arc<dyn ListingStore>,
    currencies: CurrencyRegistry,
}

impl ListingService {
    pub fn new(store: Arc<dyn ListingStore>, currencies: CurrencyRegistry) -> Self {
        Self { store, currencies }
    }

    /// Validate and persist a new listing. Returns the slug the gateway
    /// echoes back; fails with already-exists while the slug is live.
    pub fn create(&self, listing: Listing) -> Result<String, Error> {
        validate_listing(&listing, &self.currencies)?;
        let slug = listing.slug.clone();
        self.store.insert(listing)?;
        info!(slug = %slug, "listing created");
        Ok(slug)
    }

    /// Validate and replace an existing listing.
    pub fn update(&self, listing: Listing) -> Result<(), Error> {
        validate_listing(&listing, &self.currencies)?;
        let slug = listing.slug.clone();
        self.store.update(listing)?;
        info!(slug = %slug, "listing updated");
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Result<Listing, Error> {
        self.store.get(slug)
    }

    /// Delete the listing; its slug becomes available again.
    pub fn delete(&self, slug: &str) -> Result<(), Error> {
        self.store.delete(slug)?;
        info!(slug = %slug, "listing deleted");
        Ok(())
    }

    pub fn list(&self) -> Vec<Listing> {
        self.store.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::{Item, ListingMetadata, Sku};
    use crate::store::MemoryStore;

    fn service() -> ListingService {
        ListingService::new(
            Arc::new(MemoryStore::new()),
            CurrencyRegistry::with_defaults(),
        )
    }

    fn listing(slug: &str) -> Listing {
        Listing {
            slug: slug.into(),
            metadata: ListingMetadata {
                pricing_currency: "USD".into(),
                accepted_currencies: vec!["BTC".into()],
                ..Default::default()
            },
            item: Item {
                title: "Ron Swanson Tshirt".into(),
                price: 100,
                skus: vec![Sku {
                    product_id: "1".into(),
                    quantity: 12,
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_created_listing_round_trips() {
        let service = service();
        let input = listing("ron-swanson-tshirt");
        let slug = service.create(input.clone()).unwrap();
        assert_eq!(slug, "ron-swanson-tshirt");
        assert_eq!(service.get(&slug).unwrap(), input);
    }

    #[test]
    fn test_duplicate_slug_is_conflict_not_success() {
        let service = service();
        service.create(listing("tshirt")).unwrap();
        assert!(matches!(
            service.create(listing("tshirt")),
            Err(Error::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_delete_frees_the_slug() {
        let service = service();
        service.create(listing("tshirt")).unwrap();
        service.delete("tshirt").unwrap();
        assert!(matches!(service.get("tshirt"), Err(Error::NotFound { .. })));
        assert!(matches!(service.delete("tshirt"), Err(Error::NotFound { .. })));
        // Re-creating a deleted slug succeeds.
        service.create(listing("tshirt")).unwrap();
    }

    #[test]
    fn test_invalid_listing_is_never_persisted() {
        let service = service();
        let mut bad = listing("untitled");
        bad.item.title = String::new();
        assert!(matches!(service.create(bad), Err(Error::Validation(_))));
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_update_unknown_slug_is_not_found() {
        let service = service();
        assert!(matches!(
            service.update(listing("ghost")),
            Err(Error::NotFound { .. })
        ));
    }
}
