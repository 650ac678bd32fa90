//! Pluralization helpers for log lines.

/// `"s"` unless `n == 1`.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `3 sections`, `1 section`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "section"), "0 sections");
        assert_eq!(plural_count(1, "section"), "1 section");
        assert_eq!(plural_count(2, "problem"), "2 problems");
    }
}
