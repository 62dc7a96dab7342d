use quiz_core::model::{BankConfig, BankIcon, BankId};
use services::BankCatalog;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub id: BankId,
    pub name: String,
    pub description: String,
    pub icon: BankIcon,
}

impl From<&BankConfig> for SubjectCardVm {
    fn from(bank: &BankConfig) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            description: bank.description.clone(),
            icon: bank.icon,
        }
    }
}

#[must_use]
pub fn map_subject_cards(catalog: &BankCatalog) -> Vec<SubjectCardVm> {
    catalog.banks().iter().map(SubjectCardVm::from).collect()
}
