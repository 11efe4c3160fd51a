#![no_main]

use libfuzzer_sys::fuzz_target;
use quizstats::stats::{compute_stats, Submission};

fuzz_target!(|data: &[u8]| {
    let Some((&total, scores)) = data.split_first() else {
        return;
    };
    let total = u32::from(total.max(1));
    let submissions: Vec<Submission> = scores
        .iter()
        .map(|&s| Submission::new(u32::from(s) % (total + 1), total))
        .collect();

    if let Ok(stats) = compute_stats(&submissions, total) {
        assert!(stats.t_value.is_finite());
        assert!(stats.std_dev >= 0.0);
        assert!(stats.min <= stats.median && stats.median <= stats.max);
    }
});
