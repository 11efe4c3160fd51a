// Significance reporting for the one-sample t-test
//
// The statistics engine computes t and an approximate p-value against the
// 50% random-guessing baseline. This module decides how that result is
// labelled for teachers: significant above or below the baseline, not
// significant, or not enough submissions to say.

mod config;
mod verdict;

pub use config::SignificanceConfig;
pub use verdict::{
    assess_significance, format_p_value, Direction, SignificanceAssessment, SignificanceVerdict,
};
