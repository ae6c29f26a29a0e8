// Valuation engine: replacement levels and VORP-adjusted candidate scores.

pub mod replacement;
pub mod scoring;
