//! Budget breakdown model

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Cost categories of a trip budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Transport,
    Accommodation,
    Food,
    Activities,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 4] = [
        BudgetCategory::Transport,
        BudgetCategory::Accommodation,
        BudgetCategory::Food,
        BudgetCategory::Activities,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Transport => "Transport",
            BudgetCategory::Accommodation => "Accommodation",
            BudgetCategory::Food => "Food",
            BudgetCategory::Activities => "Activities",
        }
    }
}

impl Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category costs in whole currency units.
///
/// The total is never stored; [`BudgetBreakdown::total`] sums the
/// categories on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetBreakdown {
    currency: String,
    rooms: u32,
    amounts: BTreeMap<BudgetCategory, u64>,
}

impl BudgetBreakdown {
    /// Start an all-zero breakdown
    #[must_use]
    pub fn new(currency: impl Into<String>, rooms: u32) -> Self {
        Self {
            currency: currency.into(),
            rooms,
            amounts: BudgetCategory::ALL.iter().map(|c| (*c, 0)).collect(),
        }
    }

    /// Set one category, rounding to the nearest whole unit
    #[must_use]
    pub fn with(mut self, category: BudgetCategory, amount: f64) -> Self {
        let rounded = if amount.is_finite() && amount > 0.0 {
            amount.round() as u64
        } else {
            0
        };
        self.amounts.insert(category, rounded);
        self
    }

    #[must_use]
    pub fn amount(&self, category: BudgetCategory) -> u64 {
        self.amounts.get(&category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.amounts.values().sum()
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Rooms booked for the accommodation line
    #[must_use]
    pub fn rooms(&self) -> u32 {
        self.rooms
    }

    /// Categories in display order with their amounts
    pub fn iter(&self) -> impl Iterator<Item = (BudgetCategory, u64)> + '_ {
        self.amounts.iter().map(|(c, a)| (*c, *a))
    }

    /// Format an amount with the currency code, e.g. "PKR 54,086"
    #[must_use]
    pub fn format_amount(&self, amount: u64) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{} {}", self.currency, grouped)
    }
}

impl Serialize for BudgetBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BudgetBreakdown", 7)?;
        state.serialize_field("currency", &self.currency)?;
        state.serialize_field("rooms", &self.rooms)?;
        state.serialize_field("transport", &self.amount(BudgetCategory::Transport))?;
        state.serialize_field("accommodation", &self.amount(BudgetCategory::Accommodation))?;
        state.serialize_field("food", &self.amount(BudgetCategory::Food))?;
        state.serialize_field("activities", &self.amount(BudgetCategory::Activities))?;
        state.serialize_field("total", &self.total())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_categories() {
        let budget = BudgetBreakdown::new("PKR", 1)
            .with(BudgetCategory::Transport, 12_086.4)
            .with(BudgetCategory::Accommodation, 21_000.0)
            .with(BudgetCategory::Food, 12_000.0)
            .with(BudgetCategory::Activities, 9_000.0);
        assert_eq!(budget.amount(BudgetCategory::Transport), 12_086);
        assert_eq!(budget.total(), 54_086);
        assert_eq!(budget.total(), budget.iter().map(|(_, a)| a).sum::<u64>());
    }

    #[test]
    fn test_negative_and_nan_amounts_clamp_to_zero() {
        let budget = BudgetBreakdown::new("PKR", 1)
            .with(BudgetCategory::Food, -5.0)
            .with(BudgetCategory::Activities, f64::NAN);
        assert_eq!(budget.total(), 0);
    }

    #[test]
    fn test_iter_order_and_completeness() {
        let budget = BudgetBreakdown::new("PKR", 1);
        let categories: Vec<_> = budget.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, BudgetCategory::ALL.to_vec());
    }

    #[test]
    fn test_format_amount() {
        let budget = BudgetBreakdown::new("PKR", 1);
        assert_eq!(budget.format_amount(54_086), "PKR 54,086");
        assert_eq!(budget.format_amount(999), "PKR 999");
        assert_eq!(budget.format_amount(1_000_000), "PKR 1,000,000");
    }

    #[test]
    fn test_serialized_total_matches() {
        let budget = BudgetBreakdown::new("PKR", 2)
            .with(BudgetCategory::Transport, 100.0)
            .with(BudgetCategory::Food, 50.0);
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["total"], 150);
        assert_eq!(json["rooms"], 2);
        assert_eq!(json["accommodation"], 0);
    }
}
