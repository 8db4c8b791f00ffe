use serde::{Deserialize, Serialize};

use tally_core::{CategoryConfig, Money, Transaction, Window};

use crate::series::SeriesSelector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub is_income: bool,
    /// Sign-normalized total over the window.
    pub total: Money,
    pub transactions: usize,
    pub target: Money,
    /// `target - total`; `None` when the category has no target.
    pub remaining: Option<Money>,
    pub remark: Option<String>,
}

/// One row per configured category, in configured order.
pub fn summarize(
    transactions: &[Transaction],
    window: Window,
    config: &CategoryConfig,
) -> Vec<CategorySummary> {
    config
        .categories
        .iter()
        .map(|entry| {
            let selector = SeriesSelector::category(&entry.name);
            let (total, count) = transactions
                .iter()
                .filter(|tx| selector.matches(tx) && window.contains(tx.date))
                .fold((Money::zero(), 0), |(sum, n), tx| {
                    (sum + selector.delta(tx.amount), n + 1)
                });
            CategorySummary {
                name: entry.name.clone(),
                is_income: entry.is_income(),
                total,
                transactions: count,
                target: entry.target,
                remaining: entry.has_target().then(|| entry.target - total),
                remark: config.remark(&entry.name).map(str::to_string),
            }
        })
        .collect()
}
