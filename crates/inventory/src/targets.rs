use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemName};

/// Desired stock level per item, supplied independently of the ledger.
///
/// An item may be targeted without being held (zero on hand).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetLevels {
    levels: BTreeMap<ItemName, u64>,
}

impl TargetLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates overwrite earlier ones.
    pub fn from_pairs<I, S>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut targets = Self::new();
        for (name, level) in pairs {
            targets.set(name.as_ref(), level)?;
        }
        Ok(targets)
    }

    /// Set the target for one item. A target of zero is kept; it simply never
    /// reports a shortage.
    pub fn set(&mut self, name: &str, level: i64) -> DomainResult<()> {
        let name = ItemName::parse(name)?;
        if level < 0 {
            return Err(DomainError::invalid_input(format!(
                "target for {name} cannot be negative (got {level})"
            )));
        }
        self.levels.insert(name, level.unsigned_abs());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.levels.get(name.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Targets in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, u64)> + '_ {
        self.levels.iter().map(|(name, level)| (name, *level))
    }
}
