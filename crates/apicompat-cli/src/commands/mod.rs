pub mod check;
pub mod list_rules;
