pub mod category;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{
    CategoryConfig, CategoryEntry, ConfigError, EngineOptions, IncomeRule, TargetLineShape,
    FALLBACK_CATEGORY, INCOME_CATEGORY,
};
pub use money::Money;
pub use period::{CalendarYear, DateRange, Month, Window};
pub use transaction::{BankRecord, Transaction};
