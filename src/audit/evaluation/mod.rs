mod filter;
mod progress;
mod rules;

pub use progress::{rule_progress, ProgressDetail, ProgressStatus, RuleProgress};
pub use rules::{evaluate_rule, RuleMatch};

pub(crate) use filter::filter_matches;
