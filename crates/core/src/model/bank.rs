use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::BankId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("bank id cannot be empty")]
    EmptyId,

    #[error("bank {id} has no name")]
    EmptyName { id: BankId },

    #[error("bank {id} has no source location")]
    EmptySource { id: BankId },
}

/// Icon shown next to a bank on the subject screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankIcon {
    #[default]
    Globe,
    Coffee,
    Cpu,
}

/// A named question bank and where to fetch it from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    pub id: BankId,
    pub name: String,
    /// Location handed to the question source (URL path or file path).
    pub source: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: BankIcon,
}

impl BankConfig {
    #[must_use]
    pub fn new(
        id: impl Into<BankId>,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source: source.into(),
            description: String::new(),
            icon: BankIcon::default(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: BankIcon) -> Self {
        self.icon = icon;
        self
    }

    /// # Errors
    ///
    /// Returns `BankError` when the id, name, or source is blank.
    pub fn validate(&self) -> Result<(), BankError> {
        if self.id.as_str().trim().is_empty() {
            return Err(BankError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(BankError::EmptyName {
                id: self.id.clone(),
            });
        }
        if self.source.trim().is_empty() {
            return Err(BankError::EmptySource {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// The banks shipped with the application.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new("wbt", "Web Technology", "extracted_questions-wbt.json")
                .with_description("HTTP, HTML5, Web Security, and modern web concepts.")
                .with_icon(BankIcon::Globe),
            Self::new("oops", "OOP with Java", "extracted_questions-oops.json")
                .with_description(
                    "Object-Oriented Programming concepts, Java syntax, and patterns.",
                )
                .with_icon(BankIcon::Coffee),
            Self::new(
                "dsa",
                "Data Structures & Algorithms",
                "extracted_questions-4DSA-MCQ-BANK.json",
            )
            .with_description("Algorithms, data structures, and problem-solving in Java.")
            .with_icon(BankIcon::Cpu),
        ]
    }
}
