//! Page window resolution shared by all list endpoints

use crate::config::Config;
use crate::contract::{FieldViolation, HistoryError};

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number
    pub page: u64,
    pub size: u64,
}

impl PageWindow {
    /// Resolve raw query values against configured defaults and bounds
    pub fn resolve(
        page: Option<i64>,
        size: Option<i64>,
        config: &Config,
    ) -> Result<Self, HistoryError> {
        let page = page.unwrap_or(1);
        let size = size.unwrap_or_else(|| i64::try_from(config.default_page_size).unwrap_or(i64::MAX));
        let max = config.max_page_size;

        let mut violations = Vec::new();
        if page < 1 {
            violations.push(FieldViolation::new(
                "page",
                "page must be greater than or equal to 1",
            ));
        }
        if size < 1 || u64::try_from(size).map_or(true, |s| s > max) {
            violations.push(FieldViolation::new(
                "pageSize",
                format!("pageSize must be between 1 and {max}"),
            ));
        }
        if violations.is_empty() && !offset_fits(page, size) {
            violations.push(FieldViolation::new(
                "page",
                format!("page is too large for pageSize {size}"),
            ));
        }
        if !violations.is_empty() {
            return Err(HistoryError::Validation { violations });
        }

        Ok(Self {
            page: page.unsigned_abs(),
            size: size.unsigned_abs(),
        })
    }

    pub fn limit(&self) -> u64 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

/// Storage drivers bind offsets as signed 64-bit integers
fn offset_fits(page: i64, size: i64) -> bool {
    (page - 1).checked_mul(size).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let window = PageWindow::resolve(None, None, &Config::default()).unwrap();
        assert_eq!(window, PageWindow { page: 1, size: 10 });
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_offset_of_third_page() {
        let window = PageWindow::resolve(Some(3), Some(25), &Config::default()).unwrap();
        assert_eq!(window.limit(), 25);
        assert_eq!(window.offset(), 50);
    }

    #[test]
    fn test_rejects_zero_page_and_oversized_page() {
        let err = PageWindow::resolve(Some(0), Some(101), &Config::default()).unwrap_err();
        match err {
            HistoryError::Validation { violations } => {
                let names: Vec<_> = violations.iter().map(|v| v.name.as_str()).collect();
                assert_eq!(names, vec!["page", "pageSize"]);
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_page_whose_offset_overflows() {
        let err = PageWindow::resolve(Some(i64::MAX), Some(2), &Config::default()).unwrap_err();
        match err {
            HistoryError::Validation { violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].name, "page");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_last_addressable_page() {
        let window = PageWindow::resolve(Some(i64::MAX), Some(1), &Config::default()).unwrap();
        assert_eq!(window.offset(), (i64::MAX - 1) as u64);
    }

    #[test]
    fn test_rejects_negative_page_size() {
        assert!(PageWindow::resolve(Some(1), Some(-4), &Config::default()).is_err());
    }
}
