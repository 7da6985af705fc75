mod food;
mod macro_day;

pub use food::Food;
pub use macro_day::{MacroDay, MacroInfo};
