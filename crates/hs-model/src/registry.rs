//! Registry of shared plant loops keyed by role and canonical name.

use std::collections::HashMap;

use hs_core::LoopId;

use crate::plant_loop::LoopRole;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoopKey {
    pub role: LoopRole,
    pub canonical_name: String,
}

impl LoopKey {
    pub fn new(role: LoopRole, canonical_name: impl Into<String>) -> Self {
        Self {
            role,
            canonical_name: canonical_name.into(),
        }
    }
}

/// Loops registered under a key, in creation order. A key may hold several
/// loops when an existing one was incompatible with a later request.
#[derive(Debug, Default, Clone)]
pub struct LoopRegistry {
    entries: HashMap<LoopKey, Vec<LoopId>>,
}

impl LoopRegistry {
    pub fn register(&mut self, key: LoopKey, id: LoopId) {
        let ids = self.entries.entry(key).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    pub fn lookup(&self, role: LoopRole, canonical_name: &str) -> &[LoopId] {
        self.entries
            .get(&LoopKey::new(role, canonical_name))
            .map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::Id;

    #[test]
    fn lookup_is_keyed_by_role_and_name() {
        let mut reg = LoopRegistry::default();
        reg.register(LoopKey::new(LoopRole::HotWater, "Hot Water Loop"), Id::from_index(0));
        reg.register(LoopKey::new(LoopRole::HotWater, "Hot Water Loop"), Id::from_index(0));
        reg.register(LoopKey::new(LoopRole::HotWater, "Hot Water Loop"), Id::from_index(2));

        assert_eq!(reg.lookup(LoopRole::HotWater, "Hot Water Loop").len(), 2);
        assert!(reg.lookup(LoopRole::ChilledWater, "Hot Water Loop").is_empty());
        assert_eq!(reg.len(), 2);
    }
}
