use std::collections::BTreeMap;

use salary_core::TaxConfig;

use crate::loader::TaxConfigLoaderError;

/// Validated tax configurations keyed by year.
///
/// Typical lifetime:
/// 1. Start from `TaxConfigSet::with_canonical()` or `TaxConfigSet::new()`.
/// 2. Merge in configurations loaded from a file with [`TaxConfigSet::insert`].
/// 3. Call `get` for the years a comparison needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxConfigSet {
    configs: BTreeMap<i32, TaxConfig>,
}

impl TaxConfigSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding the built-in 2025 and 2026 rules.
    pub fn with_canonical() -> Self {
        let mut set = Self::new();
        set.insert(TaxConfig::bulgaria_2025());
        set.insert(TaxConfig::bulgaria_2026());
        set
    }

    /// Adds `config`, replacing any configuration already held for its year.
    /// Returns the replaced configuration.
    pub fn insert(
        &mut self,
        config: TaxConfig,
    ) -> Option<TaxConfig> {
        self.configs.insert(config.year, config)
    }

    /// Adds every configuration in `other`, replacing same-year entries.
    pub fn merge(
        &mut self,
        other: TaxConfigSet,
    ) {
        self.configs.extend(other.configs);
    }

    /// # Errors
    /// * [`TaxConfigLoaderError::YearNotFound`] if there is no configuration for `year`.
    pub fn get(
        &self,
        year: i32,
    ) -> Result<&TaxConfig, TaxConfigLoaderError> {
        self.configs
            .get(&year)
            .ok_or(TaxConfigLoaderError::YearNotFound(year))
    }

    /// Years held, in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.configs.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
