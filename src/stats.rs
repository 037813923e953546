use std::time::Instant;

/// Metrics derived from session state, recomputed on every keystroke.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedStats {
    pub wpm: f64,
    pub accuracy: f64,
}

/// Pure derivation of WPM and accuracy.
///
/// The `word_index + 1` numerator counts the in-progress word as attempted.
/// Elapsed time comes from a monotonic clock read once per keystroke by the
/// caller.
pub fn recompute(
    word_index: usize,
    wrong_words: usize,
    started_at: Option<Instant>,
    now: Instant,
) -> DerivedStats {
    let wpm = match started_at {
        Some(start) => {
            let elapsed_minutes = now.duration_since(start).as_secs_f64() / 60.0;
            if elapsed_minutes > 0.0 {
                (word_index + 1) as f64 / elapsed_minutes
            } else {
                0.0
            }
        }
        None => 0.0,
    };

    let accuracy = if word_index > 0 {
        (1.0 - wrong_words as f64 / (word_index + 1) as f64) * 100.0
    } else {
        0.0
    };

    DerivedStats { wpm, accuracy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_wpm_zero_when_not_started() {
        let now = Instant::now();
        let stats = recompute(3, 0, None, now);
        assert_eq!(stats.wpm, 0.0);
    }

    #[test]
    fn test_wpm_zero_at_zero_elapsed() {
        let now = Instant::now();
        let stats = recompute(0, 0, Some(now), now);
        assert_eq!(stats.wpm, 0.0);
        assert!(stats.wpm.is_finite());
    }

    #[test]
    fn test_wpm_counts_in_progress_word() {
        let start = Instant::now();
        let now = start + Duration::from_secs(60);

        // On word index 4 after one minute: (4 + 1) / 1.0
        let stats = recompute(4, 0, Some(start), now);
        assert_eq!(stats.wpm, 5.0);
    }

    #[test]
    fn test_wpm_scales_with_elapsed_time() {
        let start = Instant::now();

        let at_30s = recompute(9, 0, Some(start), start + Duration::from_secs(30));
        let at_60s = recompute(9, 0, Some(start), start + Duration::from_secs(60));
        assert_eq!(at_30s.wpm, 20.0);
        assert_eq!(at_60s.wpm, 10.0);
    }

    #[test]
    fn test_wpm_nondecreasing_in_word_index_for_fixed_time() {
        let start = Instant::now();
        let now = start + Duration::from_secs(45);

        let mut last = 0.0;
        for idx in 0..20 {
            let stats = recompute(idx, 0, Some(start), now);
            assert!(stats.wpm >= last);
            assert!(stats.wpm.is_finite());
            last = stats.wpm;
        }
    }

    #[test]
    fn test_accuracy_zero_at_first_word() {
        let now = Instant::now();

        assert_eq!(recompute(0, 0, None, now).accuracy, 0.0);
        // Even with recorded mistakes.
        assert_eq!(recompute(0, 1, None, now).accuracy, 0.0);
    }

    #[test]
    fn test_accuracy_clean_run_is_hundred() {
        let now = Instant::now();
        let stats = recompute(4, 0, Some(now), now);
        assert_eq!(stats.accuracy, 100.0);
    }

    #[test]
    fn test_accuracy_wrong_word_ratio() {
        let now = Instant::now();

        // One wrong word out of four attempted.
        let stats = recompute(3, 1, Some(now), now);
        assert_eq!(stats.accuracy, 75.0);
    }

    #[test]
    fn test_accuracy_stays_in_range() {
        let now = Instant::now();
        for idx in 1..10 {
            // Dedup guarantees wrong_words <= attempted words.
            for wrong in 0..=(idx + 1) {
                let stats = recompute(idx, wrong, Some(now), now);
                assert!(stats.accuracy >= 0.0);
                assert!(stats.accuracy <= 100.0);
            }
        }
    }
}
