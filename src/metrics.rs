/// Number of whitespace-delimited, non-empty tokens in `input`.
pub fn words_typed(input: &str) -> usize {
    input.split_whitespace().count()
}

/// Words per minute for `input` after `elapsed_secs` whole seconds.
///
/// Zero elapsed time yields 0 rather than dividing by zero.
pub fn words_per_minute(input: &str, elapsed_secs: u64) -> u32 {
    match elapsed_secs {
        0 => 0,
        secs => ((words_typed(input) as f64 / secs as f64) * 60.0).round() as u32,
    }
}

/// Count of positions where the typed char equals the reference char.
///
/// Comparison is position-wise; typed chars past the end of the reference never match.
pub fn correct_chars(reference: &str, input: &str) -> usize {
    input
        .chars()
        .zip(reference.chars())
        .filter(|(typed, expected)| typed == expected)
        .count()
}

/// Percentage of typed chars that match the reference, rounded. Empty input is 100.
pub fn accuracy_percent(reference: &str, input: &str) -> u8 {
    let typed = input.chars().count();
    match typed {
        0 => 100,
        len => ((correct_chars(reference, input) as f64 / len as f64) * 100.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_typed() {
        assert_eq!(words_typed(""), 0);
        assert_eq!(words_typed("   "), 0);
        assert_eq!(words_typed("hello"), 1);
        assert_eq!(words_typed("  hello   big\tworld \n"), 3);
    }

    #[test]
    fn test_wpm_zero_elapsed() {
        assert_eq!(words_per_minute("one two three", 0), 0);
        assert_eq!(words_per_minute("", 0), 0);
    }

    #[test]
    fn test_wpm_rounding() {
        // 3 words in 7 seconds -> 25.71 -> 26
        assert_eq!(words_per_minute("one two three", 7), 26);
        // 1 word in 120 seconds -> 0.5 -> 1
        assert_eq!(words_per_minute("one", 120), 1);
        assert_eq!(words_per_minute("a b c d e f", 60), 6);
    }

    #[test]
    fn test_correct_chars_position_wise() {
        assert_eq!(correct_chars("cat", "cas"), 2);
        assert_eq!(correct_chars("cat", "cat"), 3);
        // an inserted char shifts everything after it
        assert_eq!(correct_chars("cat", "ccat"), 1);
        assert_eq!(correct_chars("cat", ""), 0);
    }

    #[test]
    fn test_correct_chars_beyond_reference() {
        assert_eq!(correct_chars("hi", "hi there"), 2);
    }

    #[test]
    fn test_accuracy_empty_input() {
        assert_eq!(accuracy_percent("anything", ""), 100);
        assert_eq!(accuracy_percent("", ""), 100);
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy_percent("cat", "cas"), 67);
        assert_eq!(accuracy_percent("cat", "cat"), 100);
        assert_eq!(accuracy_percent("cat", "xyz"), 0);
    }

    #[test]
    fn test_accuracy_overflowing_input() {
        // 2 of 4 typed chars match
        assert_eq!(accuracy_percent("hi", "hiya"), 50);
    }

    #[test]
    fn test_accuracy_counts_chars_not_bytes() {
        assert_eq!(accuracy_percent("café", "café"), 100);
        assert_eq!(accuracy_percent("café", "cafe"), 75);
    }
}
