//! Shop - rotating daily stock drawn from the item catalog
//!
//! The stock is a random selection that rotates on a fixed interval of
//! game time. Refresh checks run lazily whenever time advances.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::{SHOP_REFRESH_SECS, SHOP_STOCK_SIZE};
use crate::core::types::ItemId;
use crate::item::{Item, ItemCatalog};

#[derive(Debug, Clone)]
pub struct Shop {
    catalog: ItemCatalog,
    stock: Vec<ItemId>,
    last_refresh: Option<u64>,
}

impl Shop {
    pub fn new(catalog: ItemCatalog) -> Self {
        Self {
            catalog,
            stock: Vec::new(),
            last_refresh: None,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Items currently on offer
    pub fn stock(&self) -> impl Iterator<Item = &Item> {
        self.stock.iter().filter_map(|id| self.catalog.get(id.as_str()))
    }

    /// Whether an item is currently purchasable
    pub fn offers(&self, item_id: &str) -> bool {
        self.stock.iter().any(|id| id.as_str() == item_id)
    }

    pub fn get(&self, item_id: &str) -> Option<&Item> {
        if self.offers(item_id) {
            self.catalog.get(item_id)
        } else {
            None
        }
    }

    /// Refresh the stock when the rotation interval has elapsed
    ///
    /// Returns true when a refresh happened.
    pub fn maybe_refresh(&mut self, now_secs: u64, rng: &mut impl Rng) -> bool {
        let due = match self.last_refresh {
            None => true,
            Some(last) => now_secs.saturating_sub(last) >= SHOP_REFRESH_SECS,
        };
        if due {
            self.refresh(now_secs, rng);
        }
        due
    }

    /// Draw a fresh stock selection without replacement
    pub fn refresh(&mut self, now_secs: u64, rng: &mut impl Rng) {
        self.stock = self
            .catalog
            .all()
            .choose_multiple(rng, SHOP_STOCK_SIZE)
            .map(|item| item.id.clone())
            .collect();
        self.last_refresh = Some(now_secs);
        tracing::debug!(count = self.stock.len(), "shop restocked");
    }

    /// Restore rotation state from a save
    pub fn restore(&mut self, stock: Vec<ItemId>, last_refresh: Option<u64>) {
        // Ids that no longer exist in the catalog drop out of the listing
        self.stock = stock
            .into_iter()
            .filter(|id| self.catalog.get(id.as_str()).is_some())
            .collect();
        self.last_refresh = last_refresh;
    }

    pub fn last_refresh(&self) -> Option<u64> {
        self.last_refresh
    }

    pub fn stock_ids(&self) -> &[ItemId] {
        &self.stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shop() -> Shop {
        Shop::new(ItemCatalog::with_defaults())
    }

    #[test]
    fn test_first_refresh_is_immediate() {
        let mut shop = shop();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(shop.maybe_refresh(0, &mut rng));
        assert_eq!(shop.stock().count(), SHOP_STOCK_SIZE);
    }

    #[test]
    fn test_stock_has_no_duplicates() {
        let mut shop = shop();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        shop.refresh(0, &mut rng);
        let ids: Vec<_> = shop.stock_ids().to_vec();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id));
        }
    }

    #[test]
    fn test_refresh_honors_interval() {
        let mut shop = shop();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(shop.maybe_refresh(0, &mut rng));
        assert!(!shop.maybe_refresh(SHOP_REFRESH_SECS - 1, &mut rng));
        assert!(shop.maybe_refresh(SHOP_REFRESH_SECS, &mut rng));
        assert_eq!(shop.last_refresh(), Some(SHOP_REFRESH_SECS));
    }

    #[test]
    fn test_seeded_refresh_is_deterministic() {
        let mut a = shop();
        let mut b = shop();
        a.refresh(0, &mut ChaCha8Rng::seed_from_u64(42));
        b.refresh(0, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a.stock_ids(), b.stock_ids());
    }

    #[test]
    fn test_get_rejects_items_off_rotation() {
        let mut shop = shop();
        shop.refresh(0, &mut ChaCha8Rng::seed_from_u64(5));
        let off_rotation = shop
            .catalog()
            .all()
            .iter()
            .find(|item| !shop.offers(item.id.as_str()));
        if let Some(item) = off_rotation {
            assert!(shop.get(item.id.as_str()).is_none());
        }
    }

    #[test]
    fn test_restore_drops_unknown_ids() {
        let mut shop = shop();
        shop.restore(
            vec![ItemId::new("weapon_sword_1"), ItemId::new("gone_item")],
            Some(10),
        );
        assert_eq!(shop.stock().count(), 1);
        assert_eq!(shop.last_refresh(), Some(10));
    }
}
