use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tally_core::{CategoryConfig, Money, Transaction, Window};

use crate::series::{SeriesSelector, TargetLine};

/// One point per transaction, carrying what a tooltip needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPoint {
    pub index: usize,
    pub date: NaiveDate,
    pub description: String,
    /// Raw signed amount as booked.
    pub amount: Money,
    /// Sign-normalized contribution to the running total.
    pub delta: Money,
    pub cumulative: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSeries {
    pub points: Vec<TransactionPoint>,
    pub target_line: Option<TargetLine>,
}

impl TransactionSeries {
    pub fn total(&self) -> Money {
        self.points.last().map(|p| p.cumulative).unwrap_or_default()
    }
}

/// Running total over individual transactions in date order. Same-day
/// transactions keep their input order.
pub fn aggregate_per_transaction(
    transactions: &[Transaction],
    selector: &SeriesSelector,
    window: Window,
    config: &CategoryConfig,
) -> TransactionSeries {
    let mut qualifying: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| selector.matches(tx) && window.contains(tx.date))
        .collect();
    qualifying.sort_by_key(|tx| tx.date);

    let mut cumulative = Money::zero();
    let points: Vec<TransactionPoint> = qualifying
        .iter()
        .enumerate()
        .map(|(index, tx)| {
            let delta = selector.delta(tx.amount);
            cumulative += delta;
            TransactionPoint {
                index,
                date: tx.date,
                description: tx.description.clone(),
                amount: tx.amount,
                delta,
                cumulative,
            }
        })
        .collect();

    let target_line = match (points.first(), points.last()) {
        (Some(first), Some(last)) => TargetLine::build(
            config.options.target_line,
            selector.target(config),
            window.months().len(),
            first.date,
            last.date,
        ),
        _ => None,
    };

    tracing::debug!(
        selector = %selector,
        window = %window,
        points = points.len(),
        total = %cumulative,
        "Built per-transaction series"
    );

    TransactionSeries { points, target_line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{CategoryEntry, EngineOptions, TargetLineShape};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn euros(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn config(target_line: TargetLineShape) -> CategoryConfig {
        CategoryConfig::with_options(
            vec![
                CategoryEntry::new("income", &[]),
                CategoryEntry::new("Groceries", &["rewe"]).with_target(euros(120_000)),
                CategoryEntry::new("Other", &[]),
            ],
            EngineOptions { target_line, ..EngineOptions::default() },
        )
        .unwrap()
    }

    #[test]
    fn sorted_by_date_with_running_total() {
        let txs = vec![
            Transaction::new(date(2024, 3, 1), "REWE City", euros(-3000), "Groceries"),
            Transaction::new(date(2024, 1, 5), "REWE Markt", euros(-4250), "Groceries"),
            Transaction::new(date(2024, 2, 10), "Salary", euros(250_000), "income"),
        ];
        let series = aggregate_per_transaction(
            &txs,
            &SeriesSelector::category("Groceries"),
            Window::year(2024),
            &config(TargetLineShape::Monthly),
        );
        assert_eq!(series.points.len(), 2);
        let first = &series.points[0];
        assert_eq!(first.date, date(2024, 1, 5));
        assert_eq!(first.description, "REWE Markt");
        assert_eq!(first.amount, euros(-4250));
        assert_eq!(first.delta, euros(4250));
        assert_eq!(first.cumulative, euros(4250));
        assert_eq!(series.points[1].index, 1);
        assert_eq!(series.total(), euros(7250));
    }

    #[test]
    fn same_day_keeps_input_order() {
        let txs = vec![
            Transaction::new(date(2024, 1, 5), "first", euros(-100), "Other"),
            Transaction::new(date(2024, 1, 5), "second", euros(-200), "Other"),
        ];
        let series = aggregate_per_transaction(
            &txs,
            &SeriesSelector::AllExpense,
            Window::year(2024),
            &config(TargetLineShape::Monthly),
        );
        let names: Vec<_> = series.points.iter().map(|p| p.description.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn income_deltas_keep_sign() {
        let txs = vec![
            Transaction::new(date(2024, 2, 10), "Salary", euros(250_000), "income"),
            Transaction::new(date(2024, 2, 12), "Chargeback", euros(-5_000), "income"),
        ];
        let series = aggregate_per_transaction(
            &txs,
            &SeriesSelector::AllIncome,
            Window::year(2024),
            &config(TargetLineShape::Monthly),
        );
        assert_eq!(series.points[1].delta, euros(-5_000));
        assert_eq!(series.total(), euros(245_000));
        assert_eq!(series.target_line, None);
    }

    #[test]
    fn endpoint_target_follows_points() {
        let txs = vec![
            Transaction::new(date(2024, 4, 2), "REWE", euros(-100), "Groceries"),
            Transaction::new(date(2024, 8, 30), "REWE", euros(-100), "Groceries"),
        ];
        let series = aggregate_per_transaction(
            &txs,
            &SeriesSelector::category("Groceries"),
            Window::year(2024),
            &config(TargetLineShape::Endpoints),
        );
        match series.target_line {
            Some(TargetLine::Endpoints { start, end }) => {
                assert_eq!(start.date, date(2024, 4, 2));
                assert_eq!(end.date, date(2024, 8, 30));
                assert_eq!(end.value, euros(120_000));
            }
            other => panic!("unexpected target line: {other:?}"),
        }
    }

    #[test]
    fn empty_selection_has_no_points() {
        let series = aggregate_per_transaction(
            &[],
            &SeriesSelector::category("Groceries"),
            Window::year(2024),
            &config(TargetLineShape::Monthly),
        );
        assert!(series.points.is_empty());
        assert_eq!(series.target_line, None);
        assert_eq!(series.total(), Money::zero());
    }
}
