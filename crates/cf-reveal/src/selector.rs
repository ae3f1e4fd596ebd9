//! Weighted random selection

use rand::Rng;

use cf_core::{CfError, CfResult, Item};

/// Draw one item from the pool with probability proportional to its rarity
/// weight.
///
/// Computes the pool's total weight, draws uniformly in `[0, total)`, then
/// walks the pool in order subtracting each item's weight; the first item
/// that sends the remainder to or below zero wins. Every item therefore
/// carries `weight / total` of the probability mass — a case holding N items
/// of the same tier gives each of them `tier_weight / N` of that tier's
/// share, normalized over the pool, not the global table.
///
/// An empty pool or a pool with zero total weight is a precondition
/// violation and fails with [`CfError::InvalidPool`]; catalog loading
/// rejects such cases so callers normally never see this.
pub fn select_weighted<'a, R: Rng>(pool: &'a [Item], rng: &mut R) -> CfResult<&'a Item> {
    if pool.is_empty() {
        return Err(CfError::InvalidPool("cannot select from an empty pool".into()));
    }

    let total: u64 = pool.iter().map(|item| item.rarity.weight() as u64).sum();
    if total == 0 {
        return Err(CfError::InvalidPool("pool has zero total weight".into()));
    }

    let mut remainder = rng.gen_range(0..total) as i64;
    for item in pool {
        remainder -= item.rarity.weight() as i64;
        if remainder < 0 {
            return Ok(item);
        }
    }

    // Unreachable: the draw is strictly below the total weight.
    Ok(&pool[pool.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Rarity;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_empty_pool_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_weighted(&[], &mut rng),
            Err(CfError::InvalidPool(_))
        ));
    }

    #[test]
    fn test_single_item_always_wins() {
        let pool = vec![Item::new("Only", Rarity::Legendary)];
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(select_weighted(&pool, &mut rng).unwrap().name, "Only");
        }
    }

    #[test]
    fn test_legendary_share_converges() {
        // One Common (450) vs one Legendary (50): expect ~10% legendary.
        let pool = vec![
            Item::new("Common", Rarity::Common),
            Item::new("Legendary", Rarity::Legendary),
        ];
        let mut rng = StdRng::seed_from_u64(42);

        let draws = 10_000;
        let mut legendary = 0u32;
        for _ in 0..draws {
            if select_weighted(&pool, &mut rng).unwrap().name == "Legendary" {
                legendary += 1;
            }
        }

        let share = legendary as f64 / draws as f64;
        assert!(
            (share - 0.10).abs() < 0.02,
            "legendary share {share} outside 0.10 ± 0.02"
        );
    }

    #[test]
    fn test_same_tier_items_split_the_mass() {
        // Two Rares (150 each) + one Common (450): each Rare is 20% of the
        // pool, not the raw 15% the global table would suggest.
        let pool = vec![
            Item::new("Rare A", Rarity::Rare),
            Item::new("Rare B", Rarity::Rare),
            Item::new("Common", Rarity::Common),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        let draws = 20_000;
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..draws {
            let winner = select_weighted(&pool, &mut rng).unwrap();
            *counts.entry(winner.name.clone()).or_default() += 1;
        }

        for name in ["Rare A", "Rare B"] {
            let share = counts[name] as f64 / draws as f64;
            assert!(
                (share - 0.20).abs() < 0.02,
                "{name} share {share} outside 0.20 ± 0.02"
            );
        }
    }

    #[test]
    fn test_every_item_reachable() {
        let pool = vec![
            Item::new("A", Rarity::Common),
            Item::new("B", Rarity::Uncommon),
            Item::new("C", Rarity::Rare),
            Item::new("D", Rarity::Legendary),
        ];
        let mut rng = StdRng::seed_from_u64(99);

        let mut seen: HashMap<String, u32> = HashMap::new();
        for _ in 0..5_000 {
            let winner = select_weighted(&pool, &mut rng).unwrap();
            *seen.entry(winner.name.clone()).or_default() += 1;
        }
        assert_eq!(seen.len(), 4, "all items should be drawn eventually");
    }
}
