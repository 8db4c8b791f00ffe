use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A bank row as handed over by the ingestion layer, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
}

impl BankRecord {
    pub fn new(date: NaiveDate, description: &str, amount: Money) -> Self {
        BankRecord {
            date,
            description: description.to_string(),
            amount,
        }
    }

    pub fn into_classified(self, category: &str) -> Transaction {
        Transaction {
            date: self.date,
            description: self.description,
            amount: self.amount,
            category: category.to_string(),
        }
    }
}

/// A classified bank row. The empty category means nothing could be assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: String,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: &str, amount: Money, category: &str) -> Self {
        Transaction {
            date,
            description: description.to_string(),
            amount,
            category: category.to_string(),
        }
    }

    /// Drops the category, e.g. before reclassifying against a new template.
    pub fn to_record(&self) -> BankRecord {
        BankRecord {
            date: self.date,
            description: self.description.clone(),
            amount: self.amount,
        }
    }

    pub fn is_unclassified(&self) -> bool {
        self.category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classify_record_keeps_fields() {
        let record = BankRecord::new(date(2024, 1, 5), "REWE Markt", Money::from_cents(-4250));
        let tx = record.clone().into_classified("Groceries");
        assert_eq!(tx.category, "Groceries");
        assert_eq!(tx.to_record(), record);
        assert!(!tx.is_unclassified());
    }

    #[test]
    fn empty_category_is_unclassified() {
        let tx = Transaction::new(date(2024, 1, 5), "???", Money::from_cents(-100), "");
        assert!(tx.is_unclassified());
    }

    #[test]
    fn serializes_date_as_iso() {
        let tx = Transaction::new(date(2024, 2, 10), "Salary", Money::from_cents(250_000), "income");
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2024-02-10");
        assert_eq!(json["category"], "income");
    }
}
