use tally_core::{
    BankRecord, CategoryConfig, IncomeRule, Money, Transaction, FALLBACK_CATEGORY,
};

/// Internal pairing of a category with its normalized patterns.
struct CompiledCategory {
    name: String,
    is_income: bool,
    patterns: Vec<String>,
}

impl CompiledCategory {
    fn matches(&self, description: &str) -> bool {
        self.patterns.iter().any(|p| description.contains(p.as_str()))
    }
}

/// Assigns every transaction to exactly one configured category.
///
/// Categories are tried in configured order and patterns within a category in
/// configured order; the first hit wins. Build a new classifier whenever the
/// configuration changes.
pub struct Classifier {
    categories: Vec<CompiledCategory>,
    income: Option<String>,
    fallback: String,
    income_rule: IncomeRule,
}

impl Classifier {
    pub fn new(config: &CategoryConfig) -> Self {
        let categories: Vec<CompiledCategory> = config
            .categories
            .iter()
            .map(|entry| {
                let patterns = entry
                    .patterns
                    .iter()
                    .filter_map(|p| {
                        let normalized = p.trim().to_lowercase();
                        if normalized.is_empty() {
                            tracing::warn!(category = %entry.name, "Ignoring blank pattern");
                            None
                        } else {
                            Some(normalized)
                        }
                    })
                    .collect();
                CompiledCategory {
                    name: entry.name.clone(),
                    is_income: entry.is_income(),
                    patterns,
                }
            })
            .collect();

        let income = config.income_category().map(|c| c.name.clone());
        let fallback = config
            .get(FALLBACK_CATEGORY)
            .or_else(|| config.categories.first())
            .map(|c| c.name.clone())
            .unwrap_or_default();
        if fallback.is_empty() {
            tracing::warn!("No categories configured; every transaction stays unclassified");
        }

        tracing::debug!(
            categories = categories.len(),
            income = income.as_deref().unwrap_or(""),
            fallback = %fallback,
            "Compiled classifier"
        );

        Self {
            categories,
            income,
            fallback,
            income_rule: config.options.income_rule,
        }
    }

    /// Returns the category for a description and signed amount. The empty
    /// string means the configuration has no categories at all.
    pub fn classify(&self, description: &str, amount: Money) -> &str {
        if self.income_rule == IncomeRule::AmountSign && amount.is_credit() {
            if let Some(income) = &self.income {
                return income;
            }
        }

        let text = description.to_lowercase();
        self.categories
            .iter()
            .filter(|c| self.income_rule == IncomeRule::PatternOnly || !c.is_income)
            .find(|c| c.matches(&text))
            .map(|c| c.name.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    pub fn classify_record(&self, record: BankRecord) -> Transaction {
        let category = self.classify(&record.description, record.amount).to_string();
        record.into_classified(&category)
    }

    pub fn classify_all(&self, records: Vec<BankRecord>) -> Vec<Transaction> {
        let transactions: Vec<Transaction> =
            records.into_iter().map(|r| self.classify_record(r)).collect();
        tracing::debug!(count = transactions.len(), "Classified transactions");
        transactions
    }

    /// Reassigns categories after the configuration was replaced.
    pub fn reclassify(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let reclassified: Vec<Transaction> = transactions
            .iter()
            .map(|tx| self.classify_record(tx.to_record()))
            .collect();
        let changed = reclassified
            .iter()
            .zip(transactions)
            .filter(|(new, old)| new.category != old.category)
            .count();
        tracing::debug!(count = reclassified.len(), changed, "Reclassified transactions");
        reclassified
    }
}

/// One-off classification without keeping a compiled classifier around.
pub fn classify(description: &str, amount: Money, config: &CategoryConfig) -> String {
    Classifier::new(config).classify(description, amount).to_string()
}
