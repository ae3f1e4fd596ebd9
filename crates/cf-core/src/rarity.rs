//! Rarity tiers and their selection weights

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rarity tier of an item.
///
/// Weights are fixed per tier across the whole system. Only the ratio between
/// weights carries meaning — the reference table sums to 1000 so the raw
/// weights read as permille, but nothing depends on that sum. The effective
/// per-item probability inside a pool is always the tier weight divided by
/// the pool's total weight (see cf-reveal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// All tiers, common first
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    /// Selection weight for this tier (450/350/150/50)
    pub fn weight(self) -> u32 {
        match self {
            Rarity::Common => 450,
            Rarity::Uncommon => 350,
            Rarity::Rare => 150,
            Rarity::Legendary => 50,
        }
    }

    /// Human-readable tier name
    pub fn display_name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Wire name used in stored documents
    pub fn wire_name(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Legendary => "LEGENDARY",
        }
    }

    /// Parse a wire name. Unknown names fall back to Common — stored
    /// documents are authored externally and an unrecognized tier must not
    /// make a whole catalog unreadable.
    pub fn from_wire_name(name: &str) -> Self {
        match name {
            "COMMON" => Rarity::Common,
            "UNCOMMON" => Rarity::Uncommon,
            "RARE" => Rarity::Rare,
            "LEGENDARY" => Rarity::Legendary,
            other => {
                log::warn!("unknown rarity tier {other:?}, treating as Common");
                Rarity::Common
            }
        }
    }
}

impl Serialize for Rarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for Rarity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Rarity::from_wire_name(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights() {
        let total: u32 = Rarity::ALL.iter().map(|r| r.weight()).sum();
        assert_eq!(total, 1000);
        assert!(Rarity::Common.weight() > Rarity::Legendary.weight());
    }

    #[test]
    fn test_wire_round_trip() {
        for tier in Rarity::ALL {
            assert_eq!(Rarity::from_wire_name(tier.wire_name()), tier);
        }
    }

    #[test]
    fn test_unknown_tier_falls_back_to_common() {
        assert_eq!(Rarity::from_wire_name("MYTHIC"), Rarity::Common);
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&Rarity::Legendary).unwrap();
        assert_eq!(json, "\"LEGENDARY\"");

        let tier: Rarity = serde_json::from_str("\"RARE\"").unwrap();
        assert_eq!(tier, Rarity::Rare);
    }
}
