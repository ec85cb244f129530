use chrono::{NaiveDate, Utc};

use crate::SpApiError;

/// The creation-date window for an orders query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub created_after: NaiveDate,
    pub created_before: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(created_after: NaiveDate, created_before: Option<NaiveDate>) -> Self {
        Self { created_after, created_before }
    }

    /// Resolves the window to concrete bounds. A missing `created_before` becomes the current UTC
    /// date (not host-local time), so the default is evaluated at call time; callers wanting
    /// reproducible windows must pass both bounds explicitly. The window must satisfy
    /// `created_after <= created_before`.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), SpApiError> {
        let before = self.created_before.unwrap_or_else(|| Utc::now().date_naive());
        if self.created_after > before {
            return Err(SpApiError::RestRequestError(format!(
                "CreatedAfter ({}) is later than CreatedBefore ({before})",
                self.created_after
            )));
        }
        Ok((self.created_after, before))
    }
}
