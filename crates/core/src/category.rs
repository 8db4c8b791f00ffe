use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::money::Money;

/// Name of the income category, matched case-insensitively.
pub const INCOME_CATEGORY: &str = "income";

/// Category that collects descriptions no pattern matched.
pub const FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse template: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to write template: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Category name must not be blank")]
    BlankName,
    #[error("Category listed more than once: {0}")]
    DuplicateCategory(String),
    #[error("More than one income category: {0} and {1}")]
    MultipleIncomeCategories(String, String),
    #[error("Target for {0} must not be negative")]
    NegativeTarget(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// How positive amounts are treated during classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeRule {
    /// Any credit goes straight to the income category.
    #[default]
    AmountSign,
    /// The income category competes on its patterns like any other category.
    PatternOnly,
}

/// Shape of the target-progress line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLineShape {
    /// One point per month, `target * (i + 1) / 12`.
    #[default]
    Monthly,
    /// From zero at the first transaction to the full target at the last one.
    Endpoints,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub income_rule: IncomeRule,
    #[serde(default)]
    pub target_line: TargetLineShape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    /// Substring patterns, tried in order.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Yearly target. Zero means no target.
    #[serde(default)]
    pub target: Money,
    #[serde(default)]
    pub remark: String,
}

impl CategoryEntry {
    pub fn new(name: &str, patterns: &[&str]) -> Self {
        CategoryEntry {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            target: Money::zero(),
            remark: String::new(),
        }
    }

    pub fn with_target(mut self, target: Money) -> Self {
        self.target = target;
        self
    }

    pub fn with_remark(mut self, remark: &str) -> Self {
        self.remark = remark.to_string();
        self
    }

    pub fn is_income(&self) -> bool {
        self.name.eq_ignore_ascii_case(INCOME_CATEGORY)
    }

    pub fn has_target(&self) -> bool {
        self.target.is_credit()
    }
}

/// Categories in rule-evaluation order, as loaded from a template.
///
/// A template is TOML:
///
/// ```toml
/// [options]
/// income_rule = "amount_sign"
/// target_line = "monthly"
///
/// [[category]]
/// name = "Groceries"
/// patterns = ["rewe", "aldi"]
/// target = "1200"
/// remark = "food only"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default)]
    pub options: EngineOptions,
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryEntry>,
}

impl CategoryConfig {
    pub fn new(categories: Vec<CategoryEntry>) -> Result<Self, ConfigError> {
        Self::with_options(categories, EngineOptions::default())
    }

    pub fn with_options(
        categories: Vec<CategoryEntry>,
        options: EngineOptions,
    ) -> Result<Self, ConfigError> {
        let config = CategoryConfig { options, categories };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: CategoryConfig = toml::from_str(toml_content)?;
        config.validate()?;
        tracing::debug!(categories = config.categories.len(), "Loaded category template");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Replaces the whole configuration with a freshly imported template.
    /// On error the current configuration is left untouched. Transactions
    /// classified against the old configuration must be reclassified.
    pub fn import_template(&mut self, toml_content: &str) -> Result<(), ConfigError> {
        let imported = Self::from_toml(toml_content)?;
        *self = imported;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        let mut income: Option<&str> = None;

        for entry in &self.categories {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::BlankName);
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateCategory(entry.name.clone()));
            }
            if entry.target.is_negative() {
                return Err(ConfigError::NegativeTarget(entry.name.clone()));
            }
            if entry.is_income() {
                if let Some(first) = income {
                    return Err(ConfigError::MultipleIncomeCategories(
                        first.to_string(),
                        entry.name.clone(),
                    ));
                }
                income = Some(entry.name.as_str());
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn income_category(&self) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.is_income())
    }

    pub fn is_income(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(INCOME_CATEGORY)
    }

    pub fn expense_categories(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.categories.iter().filter(|c| !c.is_income())
    }

    /// Categories whose target the user may edit; the income category is excluded.
    pub fn target_editable(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.expense_categories()
    }

    pub fn target(&self, name: &str) -> Money {
        self.get(name).map(|c| c.target).unwrap_or_default()
    }

    pub fn remark(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(|c| c.remark.as_str())
            .filter(|r| !r.is_empty())
    }

    pub fn expense_target_total(&self) -> Money {
        self.expense_categories().map(|c| c.target).sum()
    }

    pub fn set_target(&mut self, name: &str, target: Money) -> Result<(), ConfigError> {
        if target.is_negative() {
            return Err(ConfigError::NegativeTarget(name.to_string()));
        }
        let entry = self.entry_mut(name)?;
        entry.target = target;
        Ok(())
    }

    pub fn set_remark(&mut self, name: &str, remark: &str) -> Result<(), ConfigError> {
        let entry = self.entry_mut(name)?;
        entry.remark = remark.to_string();
        Ok(())
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut CategoryEntry, ConfigError> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::UnknownCategory(name.to_string()))
    }
}
