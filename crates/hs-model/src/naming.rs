//! Model-wide unique object names.

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Claim `base`, or `base 1`, `base 2`, ... if it is already taken.
    pub fn claim(&mut self, base: &str) -> String {
        let name = if self.taken.contains(base) {
            (1..)
                .map(|n| format!("{base} {n}"))
                .find(|candidate| !self.taken.contains(candidate))
                .unwrap_or_else(|| base.to_string())
        } else {
            base.to_string()
        };
        self.taken.insert(name.clone());
        name
    }
}
