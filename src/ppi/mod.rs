pub mod calculator;
pub mod factors;
pub mod history;

pub use calculator::{
    categorize, compute_ppi, confidence, determine_trend, PpiCalculator, PpiCategory,
    PpiComponents, PpiResult, Trend,
};
pub use factors::PpiFactors;
pub use history::{historical_series, recent_series};
