use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use tally_core::{CategoryConfig, Money, Month, Transaction};

/// This month may exceed the monthly average by 20% before it is flagged.
pub const OVERSPEND_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// `abs(ytd_total) / max(months_active, 1)`, rounded to cents.
pub fn average_per_month(ytd_total: Money, months_active: u32) -> Money {
    ytd_total.abs().prorate(1, months_active.max(1))
}

/// Flags categories whose spend this month exceeds 1.2x their monthly average.
///
/// `months_active` is shared across every category: it counts the months of
/// the year that had any transaction at all, not the months a category was used.
pub fn flag(
    ytd_totals: &BTreeMap<String, Money>,
    months_active: u32,
    this_month_totals: &BTreeMap<String, Money>,
) -> BTreeSet<String> {
    let months = Decimal::from(months_active.max(1));
    let categories: BTreeSet<&String> =
        ytd_totals.keys().chain(this_month_totals.keys()).collect();

    categories
        .into_iter()
        .filter(|name| {
            let ytd = ytd_totals.get(*name).copied().unwrap_or_default();
            let this_month = this_month_totals.get(*name).copied().unwrap_or_default();
            // this_month > (ytd / months) * 1.2, kept exact by multiplying through.
            this_month.abs().as_decimal() * months > ytd.abs().as_decimal() * OVERSPEND_FACTOR
        })
        .cloned()
        .collect()
}

/// Totals the overspend check runs on, derived from classified transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverspendInputs {
    pub ytd_totals: BTreeMap<String, Money>,
    pub this_month_totals: BTreeMap<String, Money>,
    pub months_active: u32,
}

impl OverspendInputs {
    /// Year-to-date is January 1 through `reference` inclusive. Only expense
    /// categories get totals; every transaction counts towards active months.
    pub fn from_transactions(
        transactions: &[Transaction],
        reference: NaiveDate,
        config: &CategoryConfig,
    ) -> Self {
        let current = Month::of(reference);
        let mut inputs = OverspendInputs::default();
        let mut active_months = BTreeSet::new();

        for tx in transactions
            .iter()
            .filter(|tx| tx.date.year() == reference.year() && tx.date <= reference)
        {
            active_months.insert(tx.date.month());

            if tx.is_unclassified() || config.is_income(&tx.category) {
                continue;
            }
            *inputs.ytd_totals.entry(tx.category.clone()).or_default() += tx.amount;
            if current.contains(tx.date) {
                *inputs.this_month_totals.entry(tx.category.clone()).or_default() += tx.amount;
            }
        }

        inputs.months_active = active_months.len() as u32;
        inputs
    }

    pub fn flagged(&self) -> BTreeSet<String> {
        let flagged = flag(&self.ytd_totals, self.months_active, &self.this_month_totals);
        tracing::debug!(
            months_active = self.months_active,
            flagged = flagged.len(),
            "Evaluated overspending"
        );
        flagged
    }
}
