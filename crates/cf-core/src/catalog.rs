//! Canonical in-memory case catalog

use std::collections::HashMap;

use crate::item::Case;

/// Case identifier (the document key, e.g. "weapon-case")
pub type CaseId = String;

/// The set of available cases plus their explicit display order.
///
/// Produced once by the catalog store at load time; the reveal flow never
/// mutates it. The two backward-compatible document shapes are resolved
/// before this type is constructed — nothing downstream sees them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseCatalog {
    cases: HashMap<CaseId, Case>,
    order: Vec<CaseId>,
}

impl CaseCatalog {
    /// Build a catalog from resolved parts. Order entries without a backing
    /// case are dropped; cases missing from the order are unreachable and
    /// dropped as well.
    pub fn from_parts(cases: HashMap<CaseId, Case>, order: Vec<CaseId>) -> Self {
        let order: Vec<CaseId> = order.into_iter().filter(|id| cases.contains_key(id)).collect();
        let cases = cases
            .into_iter()
            .filter(|(id, _)| order.contains(id))
            .collect();
        Self { cases, order }
    }

    pub fn get(&self, id: &str) -> Option<&Case> {
        self.cases.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cases.contains_key(id)
    }

    /// Display order of case ids
    pub fn order(&self) -> &[CaseId] {
        &self.order
    }

    /// First case in display order, if any
    pub fn first_id(&self) -> Option<&CaseId> {
        self.order.first()
    }

    /// Cases in display order
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&CaseId, &Case)> {
        self.order.iter().filter_map(|id| Some((id, self.cases.get(id)?)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::rarity::Rarity;

    fn case(name: &str) -> Case {
        Case {
            name: name.into(),
            description: String::new(),
            image: String::new(),
            items: vec![Item::new("x", Rarity::Common)],
        }
    }

    #[test]
    fn test_from_parts_drops_orphans() {
        let mut cases = HashMap::new();
        cases.insert("a".to_string(), case("A"));
        cases.insert("b".to_string(), case("B"));

        // "ghost" has no backing case, "b" is missing from the order
        let catalog = CaseCatalog::from_parts(cases, vec!["a".into(), "ghost".into()]);

        assert_eq!(catalog.order(), &["a".to_string()]);
        assert!(catalog.get("b").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_iter_ordered() {
        let mut cases = HashMap::new();
        cases.insert("a".to_string(), case("A"));
        cases.insert("b".to_string(), case("B"));

        let catalog = CaseCatalog::from_parts(cases, vec!["b".into(), "a".into()]);
        let names: Vec<&str> = catalog.iter_ordered().map(|(_, c)| c.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }
}
