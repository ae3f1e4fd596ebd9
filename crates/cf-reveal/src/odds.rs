//! Per-item odds and unique-item views of a pool

use serde::Serialize;

use cf_core::{CfError, CfResult, Item, Rarity};

/// Displayed probability of a single item within one pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOdds {
    pub name: String,
    pub rarity: Rarity,
    /// Probability in `[0, 1]`, normalized over the pool's total weight
    pub probability: f64,
}

/// Compute per-item odds for a pool.
///
/// The probability shown to the user is `item_weight / pool_total_weight` —
/// if a case contains N items of one tier, each individually carries
/// `tier_weight / N` of the total mass. Never the raw tier ratio.
pub fn pool_odds(pool: &[Item]) -> CfResult<Vec<ItemOdds>> {
    if pool.is_empty() {
        return Err(CfError::InvalidPool("cannot compute odds of an empty pool".into()));
    }
    let total: u64 = pool.iter().map(|i| i.rarity.weight() as u64).sum();
    if total == 0 {
        return Err(CfError::InvalidPool("pool has zero total weight".into()));
    }

    Ok(pool
        .iter()
        .map(|item| ItemOdds {
            name: item.name.clone(),
            rarity: item.rarity,
            probability: item.rarity.weight() as f64 / total as f64,
        })
        .collect())
}

/// Distinct items of a pool for the available-items panel.
///
/// Deduplicates by name keeping the first occurrence, then sorts rarest
/// first (ascending weight).
pub fn unique_items(pool: &[Item]) -> Vec<&Item> {
    let mut seen: Vec<&str> = Vec::new();
    let mut unique: Vec<&Item> = Vec::new();
    for item in pool {
        if !seen.contains(&item.name.as_str()) {
            seen.push(&item.name);
            unique.push(item);
        }
    }
    unique.sort_by_key(|item| item.rarity.weight());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_tier_odds_split() {
        let pool = vec![
            Item::new("Rare A", Rarity::Rare),
            Item::new("Rare B", Rarity::Rare),
            Item::new("Common", Rarity::Common),
        ];
        let odds = pool_odds(&pool).unwrap();

        // 150 / 750 = 20% each, not the raw 15%.
        assert!((odds[0].probability - 0.20).abs() < 1e-9);
        assert!((odds[1].probability - 0.20).abs() < 1e-9);
        assert!((odds[2].probability - 0.60).abs() < 1e-9);

        let sum: f64 = odds.iter().map(|o| o.probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_pool_odds_is_invalid() {
        assert!(pool_odds(&[]).is_err());
    }

    #[test]
    fn test_unique_items_dedup_and_order() {
        let pool = vec![
            Item::new("Common Thing", Rarity::Common),
            Item::new("Jackpot", Rarity::Legendary),
            Item::new("Common Thing", Rarity::Common),
            Item::new("Mid", Rarity::Rare),
        ];
        let unique = unique_items(&pool);
        let names: Vec<&str> = unique.iter().map(|i| i.name.as_str()).collect();

        // Rarest first, duplicate dropped.
        assert_eq!(names, ["Jackpot", "Mid", "Common Thing"]);
    }
}
