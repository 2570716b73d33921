//! Pagination policy for list queries.

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on the number of records a single list query may return.
pub const MAX_LIMIT: i64 = 100;

/// An effective, already-clamped page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    /// Apply the pagination policy to caller-supplied values.
    ///
    /// Missing values take the defaults, `limit` is capped at [`MAX_LIMIT`],
    /// and negative inputs clamp to zero.
    pub fn clamp(skip: Option<i64>, limit: Option<i64>) -> Self {
        let skip = skip.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT);

        Self {
            skip: skip as u64,
            limit: limit as u64,
        }
    }

    /// A zero-sized window; list queries return nothing without touching the store.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::clamp(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Page::default(), Page { skip: 0, limit: 10 });
    }

    #[test]
    fn test_limit_capped() {
        for requested in [101, 500, i64::MAX] {
            assert_eq!(Page::clamp(None, Some(requested)).limit, 100);
        }
        assert_eq!(Page::clamp(None, Some(100)).limit, 100);
        assert_eq!(Page::clamp(None, Some(37)).limit, 37);
    }

    #[test]
    fn test_negative_inputs_clamp_to_zero() {
        let page = Page::clamp(Some(-5), Some(-1));
        assert_eq!(page, Page { skip: 0, limit: 0 });
        assert!(page.is_empty());
    }

    #[test]
    fn test_skip_passes_through() {
        assert_eq!(Page::clamp(Some(140), None).skip, 140);
    }
}
