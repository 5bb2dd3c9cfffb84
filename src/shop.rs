//! Coin shop.

use strum::{EnumIter, IntoEnumIterator};
use tracing::{info, instrument};

use crate::profile::{ProfileError, ProfileStore};
use crate::storage::KeyValueStore;

/// Item that can be bought with coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ShopItem {
    /// Cosmetic badge.
    EliteBadge,
}

impl ShopItem {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::EliteBadge => "Elite Badge",
        }
    }

    /// Price in coins.
    pub fn cost(self) -> u64 {
        match self {
            Self::EliteBadge => 100,
        }
    }
}

impl std::fmt::Display for ShopItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} coins)", self.name(), self.cost())
    }
}

/// Spends profile coins on [`ShopItem`]s.
#[derive(Debug, Clone)]
pub struct Shop<S> {
    profile: ProfileStore<S>,
}

impl<S: KeyValueStore> Shop<S> {
    /// Creates a shop charging `profile`.
    pub fn new(profile: ProfileStore<S>) -> Self {
        Self { profile }
    }

    /// Every item on sale.
    pub fn catalog(&self) -> Vec<ShopItem> {
        ShopItem::iter().collect()
    }

    /// True if the current balance covers `item`.
    #[instrument(skip(self))]
    pub fn can_afford(&self, item: ShopItem) -> bool {
        self.profile.coin_balance() >= item.cost()
    }

    /// Buys `item`, returning the remaining balance.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InsufficientFunds`] when the balance does not
    /// cover the price.
    #[instrument(skip(self))]
    pub fn buy(&self, item: ShopItem) -> Result<u64, ProfileError> {
        let remaining = self.profile.spend_coins(item.cost())?;
        info!(item = item.name(), remaining, "Item purchased");
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_buy_requires_full_price() {
        let profile = ProfileStore::new(MemoryStore::new());
        let shop = Shop::new(profile.clone());

        profile.add_coins(99).unwrap();
        assert!(!shop.can_afford(ShopItem::EliteBadge));
        assert!(matches!(
            shop.buy(ShopItem::EliteBadge),
            Err(ProfileError::InsufficientFunds { .. })
        ));

        profile.add_coins(26).unwrap();
        assert!(shop.can_afford(ShopItem::EliteBadge));
        assert_eq!(shop.buy(ShopItem::EliteBadge).unwrap(), 25);
        assert_eq!(profile.coin_balance(), 25);
    }

    #[test]
    fn test_catalog_lists_badge() {
        let shop = Shop::new(ProfileStore::new(MemoryStore::new()));
        assert_eq!(shop.catalog(), vec![ShopItem::EliteBadge]);
    }
}
