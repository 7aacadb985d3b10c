//! Budget model
//!
//! A spending ceiling for one category over a period. Budgets are created and
//! deleted, never edited. Several budgets may point at the same category; the
//! earliest one is the one overrun checks use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::money::Money;

/// Period a budget applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!(
                "Unknown budget period '{}' (expected weekly, monthly or yearly)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: CategoryId,
    pub amount: Money,
    pub period: BudgetPeriod,
}

impl Budget {
    pub fn new(category: CategoryId, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            category,
            amount,
            period,
        }
    }
}

/// First budget defined for a category, if any
pub fn active_budget(budgets: &[Budget], category: CategoryId) -> Option<&Budget> {
    budgets.iter().find(|b| b.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parsing() {
        assert_eq!("monthly".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Monthly));
        assert_eq!("Weekly".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Weekly));
        assert!("daily".parse::<BudgetPeriod>().is_err());
        assert_eq!(BudgetPeriod::default(), BudgetPeriod::Monthly);
    }

    #[test]
    fn test_active_budget_is_first_match() {
        let food = CategoryId::new(1);
        let budgets = vec![
            Budget::new(CategoryId::new(2), Money::from_units(50), BudgetPeriod::Weekly),
            Budget::new(food, Money::from_units(200), BudgetPeriod::Monthly),
            Budget::new(food, Money::from_units(999), BudgetPeriod::Monthly),
        ];

        let active = active_budget(&budgets, food).unwrap();
        assert_eq!(active.amount, Money::from_units(200));
        assert!(active_budget(&budgets, CategoryId::new(3)).is_none());
    }

    #[test]
    fn test_reads_legacy_string_category() {
        let json = r#"{"category": "1", "amount": 200, "period": "monthly"}"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.category, CategoryId::new(1));
        assert_eq!(budget.amount, Money::from_units(200));

        let written = serde_json::to_string(&budget).unwrap();
        assert_eq!(written, r#"{"category":1,"amount":200,"period":"monthly"}"#);
    }
}
