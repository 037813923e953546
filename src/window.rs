use unicode_width::UnicodeWidthStr;

/// Contiguous slice of the word stream visible on screen, `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Select the words to render this frame.
///
/// The current word is always the leftmost visible word; the window never
/// scrolls back over typed history. Words are accumulated greedily by
/// display width until the budget would be exceeded. Inter-word gaps are
/// not counted; the presentation layer owns wrapping. The scan starts at
/// `current`, so cost is O(window), not O(stream).
pub fn select(words: &[String], current: usize, budget: usize) -> Window {
    let start = current.min(words.len());
    let mut end = start;
    let mut total = 0;

    while end < words.len() {
        let width = words[end].width();
        // The current word is shown even when it alone exceeds the budget.
        if end > start && total + width > budget {
            break;
        }
        total += width;
        end += 1;
    }

    Window { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn slice_width(words: &[String], window: Window) -> usize {
        words[window.start..window.end]
            .iter()
            .map(|w| w.width())
            .sum()
    }

    #[test]
    fn test_window_starts_at_current_word() {
        let ws = words(&["alpha", "beta", "gamma", "delta"]);

        for current in 0..ws.len() {
            let window = select(&ws, current, 80);
            assert_eq!(window.start, current);
        }
    }

    #[test]
    fn test_window_always_contains_current_word() {
        let ws = words(&["abcdefghij", "k"]);

        let window = select(&ws, 0, 3);
        assert_eq!(window, Window { start: 0, end: 1 });
    }

    #[test]
    fn test_window_fits_budget() {
        let ws = words(&["one", "two", "three", "four", "five"]);

        // "one" (3) + "two" (3) + "three" (5) = 11; "four" would overflow.
        let window = select(&ws, 0, 12);
        assert_eq!(window, Window { start: 0, end: 3 });
        assert!(slice_width(&ws, window) <= 12);
    }

    #[test]
    fn test_window_takes_whole_stream_under_large_budget() {
        let ws = words(&["cat", "dog", "fish"]);

        let window = select(&ws, 0, 80);
        assert_eq!(window, Window { start: 0, end: 3 });
    }

    #[test]
    fn test_window_clamped_to_stream_end() {
        let ws = words(&["cat", "dog"]);

        let window = select(&ws, 1, 80);
        assert_eq!(window, Window { start: 1, end: 2 });
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_window_exact_budget_boundary() {
        let ws = words(&["ab", "cd", "ef"]);

        // 2 + 2 + 2 == 6 fits exactly.
        let window = select(&ws, 0, 6);
        assert_eq!(window.end, 3);

        // One short: third word would push past the budget.
        let window = select(&ws, 0, 5);
        assert_eq!(window.end, 2);
    }

    #[test]
    fn test_window_never_exceeds_budget_unless_single_word() {
        let ws = words(&["aaaa", "bbbb", "cccc", "dd"]);

        for current in 0..ws.len() {
            for budget in 1..20 {
                let window = select(&ws, current, budget);
                assert!(window.end > window.start);
                if window.len() > 1 {
                    assert!(slice_width(&ws, window) <= budget);
                }
            }
        }
    }

    #[test]
    fn test_window_mid_stream_scroll() {
        let ws = words(&["first", "second", "third", "fourth", "fifth"]);

        // "third" (5) + "fourth" (6) = 11; "fifth" would make 16.
        let window = select(&ws, 2, 12);
        assert_eq!(window, Window { start: 2, end: 4 });
    }

    #[test]
    fn test_window_wide_characters_measured_by_display_width() {
        // CJK characters are two columns each.
        let ws = words(&["日本", "語", "cat"]);

        let window = select(&ws, 0, 6);
        assert_eq!(window, Window { start: 0, end: 2 });
    }
}
