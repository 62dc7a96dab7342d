use std::collections::HashSet;

use quiz_core::model::{BankConfig, BankId};

use crate::error::CatalogError;

/// The set of banks a user can pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankCatalog {
    banks: Vec<BankConfig>,
}

impl BankCatalog {
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, a bank is invalid, or an id repeats.
    pub fn new(banks: Vec<BankConfig>) -> Result<Self, CatalogError> {
        if banks.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(banks.len());
        for bank in &banks {
            bank.validate()?;
            if !seen.insert(bank.id.clone()) {
                return Err(CatalogError::DuplicateBank(bank.id.clone()));
            }
        }
        Ok(Self { banks })
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self {
            banks: BankConfig::builtin(),
        }
    }

    #[must_use]
    pub fn banks(&self) -> &[BankConfig] {
        &self.banks
    }

    #[must_use]
    pub fn get(&self, id: &BankId) -> Option<&BankConfig> {
        self.banks.iter().find(|bank| bank.id == *id)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::UnknownBank` when no bank has this id.
    pub fn require(&self, id: &BankId) -> Result<&BankConfig, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownBank(id.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.banks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}

impl Default for BankCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_ids() {
        let err = BankCatalog::new(vec![
            BankConfig::new("a", "A", "a.json"),
            BankConfig::new("a", "A again", "a2.json"),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateBank(BankId::new("a")));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(BankCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn looks_up_banks_by_id() {
        let catalog = BankCatalog::builtin();
        assert_eq!(catalog.require(&BankId::new("oops")).unwrap().name, "OOP with Java");
        assert!(matches!(
            catalog.require(&BankId::new("nope")),
            Err(CatalogError::UnknownBank(_))
        ));
    }
}
