use ahash::{AHashMap, AHashSet};
use std::fmt;
use tracing::{debug, warn};

use crate::domain::{SetSelection, Strategy};
use crate::rules::{RuleError, RuleSet, SetKey};

/// Registry of rule sets keyed by name.
///
/// Sets are kept in registration order, which is also the order used
/// when every set is applied. Registering a different set under a name
/// that is already taken replaces the old set in place. A set that was
/// ever registered, including one since replaced, cannot be registered
/// again.
///
/// Mutation takes `&mut self`; a ruler shared across threads must be
/// wrapped in a lock by the caller.
pub struct Ruler<T: ?Sized> {
    sets: Vec<RuleSet<T>>,
    index: AHashMap<String, usize>,
    registered: AHashSet<SetKey>,
}

impl<T: ?Sized> Ruler<T> {
    /// Create an empty ruler.
    pub fn new() -> Self {
        Ruler {
            sets: Vec::new(),
            index: AHashMap::new(),
            registered: AHashSet::new(),
        }
    }

    /// Register a rule set.
    pub fn add_set(&mut self, rule_set: RuleSet<T>) -> Result<(), RuleError> {
        if self.is_registered(&rule_set) {
            return Err(RuleError::DuplicateSet {
                set: rule_set.name().to_string(),
            });
        }

        self.insert(rule_set);
        Ok(())
    }

    /// Register a batch of rule sets.
    ///
    /// The batch is checked against the registered sets and against
    /// itself before anything is registered.
    pub fn add_many(&mut self, rule_sets: impl IntoIterator<Item = RuleSet<T>>) -> Result<(), RuleError> {
        let rule_sets: Vec<RuleSet<T>> = rule_sets.into_iter().collect();
        let mut batch = AHashSet::with_capacity(rule_sets.len());

        for rule_set in &rule_sets {
            if self.is_registered(rule_set) {
                return Err(RuleError::DuplicateSet {
                    set: rule_set.name().to_string(),
                });
            }

            if !batch.insert(rule_set.key()) {
                return Err(RuleError::DuplicateSetInBatch {
                    set: rule_set.name().to_string(),
                });
            }
        }

        for rule_set in rule_sets {
            self.insert(rule_set);
        }

        Ok(())
    }

    /// Number of registered sets.
    pub fn count_sets(&self) -> usize {
        self.sets.len()
    }

    /// Registered set names in registration order.
    pub fn rule_set_names(&self) -> Vec<&str> {
        self.sets.iter().map(RuleSet::name).collect()
    }

    /// Look up a set by name.
    pub fn get(&self, name: &str) -> Option<&RuleSet<T>> {
        self.index.get(name).map(|&i| &self.sets[i])
    }

    /// Returns true if a set with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over the registered sets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleSet<T>> {
        self.sets.iter()
    }

    /// Resolve a selection to rule sets.
    ///
    /// Every name is resolved before anything is returned, so an
    /// unknown name is reported even if other names are valid.
    pub fn select(&self, selection: &SetSelection) -> Result<Vec<&RuleSet<T>>, RuleError> {
        let Some(names) = selection.names() else {
            return Ok(self.sets.iter().collect());
        };

        names
            .into_iter()
            .map(|name| {
                self.get(name).ok_or_else(|| RuleError::SetNotFound {
                    set: name.to_string(),
                })
            })
            .collect()
    }

    /// Apply the selected rule sets to the data, one after another.
    ///
    /// Each set is applied with `strategy`. The first set that rejects
    /// the data stops the run and its error is returned.
    pub fn apply(
        &self,
        data: &T,
        selection: impl Into<SetSelection>,
        strategy: Strategy,
    ) -> Result<(), RuleError> {
        let selection = selection.into();
        let targets = self.select(&selection)?;

        debug!(sets = targets.len(), %strategy, "Applying rule sets");

        for rule_set in targets {
            rule_set.apply(data, strategy)?;
        }

        Ok(())
    }

    fn is_registered(&self, rule_set: &RuleSet<T>) -> bool {
        self.registered.contains(&rule_set.key())
    }

    fn insert(&mut self, rule_set: RuleSet<T>) {
        self.registered.insert(rule_set.key());

        match self.index.get(rule_set.name()) {
            Some(&i) => {
                warn!(set = %rule_set.name(), "Replacing rule set registered under the same name");
                self.sets[i] = rule_set;
            }
            None => {
                debug!(set = %rule_set.name(), rules = rule_set.count_rules(), "Rule set registered");
                self.index.insert(rule_set.name().to_string(), self.sets.len());
                self.sets.push(rule_set);
            }
        }
    }
}

impl<T: ?Sized> Default for Ruler<T> {
    fn default() -> Self {
        Ruler::new()
    }
}

impl<T: ?Sized> fmt::Debug for Ruler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ruler").field("sets", &self.sets).finish()
    }
}
