mod business_category;
mod filing_year_config;
mod period_inputs;

pub use business_category::BusinessCategory;
pub use filing_year_config::FilingYearConfig;
pub use period_inputs::{InvalidInput, PeriodInputs};
