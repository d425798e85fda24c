pub mod formatter;

pub use formatter::{
    bar, format_case, format_cases, format_coalition_options, format_count, format_flows,
    format_history, format_json, format_metrics, format_ppi, format_scenarios, format_sector_risk,
    format_sentiment, format_simulation, format_trends, should_use_colors, truncate,
};
