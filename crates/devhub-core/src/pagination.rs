//! Offset pagination for list endpoints.

/// A `start`/`count` window over a result set.
///
/// Values that fail the floor checks (`start >= 0`, `count > 0`) or do not
/// parse as integers fall back to the defaults. `count` has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: u64,
    pub count: u64,
}

impl Page {
    pub const DEFAULT_START: u64 = 0;
    pub const DEFAULT_COUNT: u64 = 10;

    pub fn new(start: u64, count: u64) -> Self {
        Self { start, count }
    }

    /// Build a page from raw query-string values.
    pub fn from_params(start: Option<&str>, count: Option<&str>) -> Self {
        let start = start
            .and_then(parse_int)
            .filter(|v| *v >= 0)
            .map(|v| v as u64)
            .unwrap_or(Self::DEFAULT_START);
        let count = count
            .and_then(parse_int)
            .filter(|v| *v > 0)
            .map(|v| v as u64)
            .unwrap_or(Self::DEFAULT_COUNT);

        Self { start, count }
    }

    /// Apply this window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.start).unwrap_or(usize::MAX))
            .take(usize::try_from(self.count).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START, Self::DEFAULT_COUNT)
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(Page::from_params(None, None), Page::new(0, 10));
    }

    #[test]
    fn accepts_values_above_the_floor() {
        assert_eq!(Page::from_params(Some("20"), Some("5")), Page::new(20, 5));
        assert_eq!(Page::from_params(Some("0"), Some("1")), Page::new(0, 1));
    }

    #[test]
    fn rejects_values_below_the_floor() {
        assert_eq!(Page::from_params(Some("-1"), Some("0")), Page::new(0, 10));
        assert_eq!(Page::from_params(Some("3"), Some("-7")), Page::new(3, 10));
    }

    #[test]
    fn ignores_garbage() {
        assert_eq!(Page::from_params(Some("abc"), Some("ten")), Page::new(0, 10));
    }

    #[test]
    fn count_is_not_capped() {
        assert_eq!(Page::from_params(None, Some("100000")).count, 100_000);
    }

    #[test]
    fn slice_skips_then_takes() {
        let page = Page::new(2, 3);
        assert_eq!(page.slice(0..10), vec![2, 3, 4]);
        assert!(Page::new(50, 3).slice(0..10).is_empty());
    }
}
