use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use tally_core::{
    CategoryConfig, Money, Month, TargetLineShape, Transaction, Window, INCOME_CATEGORY,
};

/// Which transactions a series is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSelector {
    Category(String),
    /// Every transaction outside the income category.
    AllExpense,
    AllIncome,
}

impl fmt::Display for SeriesSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesSelector::Category(name) => write!(f, "{name}"),
            SeriesSelector::AllExpense => write!(f, "ALL_EXPENSE"),
            SeriesSelector::AllIncome => write!(f, "ALL_INCOME"),
        }
    }
}

impl SeriesSelector {
    pub fn category(name: &str) -> Self {
        SeriesSelector::Category(name.to_string())
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            SeriesSelector::Category(name) => tx.category == *name,
            SeriesSelector::AllExpense => !is_income(&tx.category),
            SeriesSelector::AllIncome => is_income(&tx.category),
        }
    }

    /// Income counts with its sign, expenses always as positive magnitudes.
    pub fn delta(&self, amount: Money) -> Money {
        if self.is_income() {
            amount
        } else {
            amount.abs()
        }
    }

    pub fn is_income(&self) -> bool {
        match self {
            SeriesSelector::Category(name) => is_income(name),
            SeriesSelector::AllExpense => false,
            SeriesSelector::AllIncome => true,
        }
    }

    /// Yearly target the series is compared against. Combined expense series
    /// use the sum of every expense target.
    pub fn target(&self, config: &CategoryConfig) -> Money {
        match self {
            SeriesSelector::Category(name) => config.target(name),
            SeriesSelector::AllExpense => config.expense_target_total(),
            SeriesSelector::AllIncome => config
                .income_category()
                .map(|c| c.target)
                .unwrap_or_default(),
        }
    }
}

fn is_income(category: &str) -> bool {
    category.eq_ignore_ascii_case(INCOME_CATEGORY)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Position in the window, 0 for the first month.
    pub index: usize,
    pub month: Month,
    pub cumulative: Money,
    /// At least one transaction landed in this month.
    pub has_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub date: NaiveDate,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TargetLine {
    /// One value per window month.
    Monthly { values: Vec<Money> },
    /// Zero at the first transaction, the full target at the last one.
    Endpoints { start: TargetPoint, end: TargetPoint },
}

impl TargetLine {
    pub fn build(
        shape: TargetLineShape,
        target: Money,
        months: usize,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Option<Self> {
        if !target.is_credit() {
            return None;
        }
        match shape {
            TargetLineShape::Monthly => Some(TargetLine::Monthly {
                values: monthly_target_line(target, months),
            }),
            TargetLineShape::Endpoints => Some(TargetLine::Endpoints {
                start: TargetPoint { date: first, value: Money::zero() },
                end: TargetPoint { date: last, value: target },
            }),
        }
    }

    pub fn values(&self) -> Vec<Money> {
        match self {
            TargetLine::Monthly { values } => values.clone(),
            TargetLine::Endpoints { start, end } => vec![start.value, end.value],
        }
    }
}

/// Linear accrual of a yearly target: month `i` expects `target * (i + 1) / 12`.
/// Empty when there is no target.
pub fn monthly_target_line(target: Money, months: usize) -> Vec<Money> {
    if !target.is_credit() {
        return Vec::new();
    }
    (1..=months as u32).map(|n| target.prorate(n, 12)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub series: Vec<SeriesPoint>,
    pub target_line: Option<TargetLine>,
}

impl Aggregation {
    /// Cumulative value at the end of the window.
    pub fn total(&self) -> Money {
        self.series.last().map(|p| p.cumulative).unwrap_or_default()
    }

    /// First month that contributed a nonzero amount.
    pub fn started_at(&self) -> Option<usize> {
        self.series
            .iter()
            .find(|p| !p.cumulative.is_zero() || p.has_data)
            .map(|p| p.index)
    }
}

/// Builds the month-by-month cumulative series for `selector` over `window`.
///
/// Months before the first nonzero month report zero without data. From that
/// month on every month adds its sum, including zero months, and `has_data`
/// reflects whether the month had any transaction at all.
pub fn aggregate(
    transactions: &[Transaction],
    selector: &SeriesSelector,
    window: Window,
    config: &CategoryConfig,
) -> Aggregation {
    let qualifying: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| selector.matches(tx) && window.contains(tx.date))
        .collect();
    let months = window.months();

    let mut series = Vec::with_capacity(months.len());
    let mut cumulative = Money::zero();
    let mut started = false;

    for (index, month) in months.iter().enumerate() {
        let in_month: Vec<&&Transaction> =
            qualifying.iter().filter(|tx| month.contains(tx.date)).collect();
        let month_sum: Money = in_month.iter().map(|tx| selector.delta(tx.amount)).sum();

        if !started && !month_sum.is_zero() {
            started = true;
        }

        if started {
            cumulative += month_sum;
            series.push(SeriesPoint {
                index,
                month: *month,
                cumulative,
                has_data: !in_month.is_empty(),
            });
        } else {
            series.push(SeriesPoint {
                index,
                month: *month,
                cumulative: Money::zero(),
                has_data: false,
            });
        }
    }

    let target_line = match (
        qualifying.iter().map(|tx| tx.date).min(),
        qualifying.iter().map(|tx| tx.date).max(),
    ) {
        (Some(first), Some(last)) => TargetLine::build(
            config.options.target_line,
            selector.target(config),
            months.len(),
            first,
            last,
        ),
        _ => None,
    };

    tracing::debug!(
        selector = %selector,
        window = %window,
        transactions = qualifying.len(),
        total = %cumulative,
        "Built monthly series"
    );

    Aggregation { series, target_line }
}

/// Per-month deltas recovered from a cumulative series.
pub fn month_deltas(series: &[SeriesPoint]) -> Vec<Money> {
    let mut previous = Money::zero();
    series
        .iter()
        .map(|p| {
            let delta = p.cumulative - previous;
            previous = p.cumulative;
            delta
        })
        .collect()
}
