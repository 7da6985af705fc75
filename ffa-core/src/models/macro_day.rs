use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calories and macronutrients for one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MacroInfo {
    pub calories: i64,
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
}

impl MacroInfo {
    pub fn new(calories: i64, protein: i64, fat: i64, carbs: i64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
        }
    }
}

impl fmt::Display for MacroInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal, {}g protein, {}g fat, {}g carbs",
            self.calories, self.protein, self.fat, self.carbs
        )
    }
}

/// One row of the macro tracking export: measured intake and the goal for that date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MacroDay {
    pub date: NaiveDate,
    pub expenditure: i64,
    pub trend_weight: f64,
    pub weight: f64,
    pub actual: MacroInfo,
    pub target: MacroInfo,
}

impl fmt::Display for MacroDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        writeln!(f, "  Expenditure: {} kcal", self.expenditure)?;
        writeln!(
            f,
            "  Weight: {} kg (trend {} kg)",
            self.weight, self.trend_weight
        )?;
        writeln!(f, "  Actual: {}", self.actual)?;
        write!(f, "  Target: {}", self.target)
    }
}
