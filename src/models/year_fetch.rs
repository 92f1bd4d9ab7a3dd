use crate::models::ObservationRow;

/// Result of downloading one calendar year
#[derive(Debug, Clone, PartialEq)]
pub struct YearFetch {
    pub year: i32,
    pub outcome: FetchOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(Vec<ObservationRow>),
    Skipped { reason: String },
}

impl YearFetch {
    pub fn fetched(year: i32, rows: Vec<ObservationRow>) -> Self {
        Self {
            year,
            outcome: FetchOutcome::Fetched(rows),
        }
    }

    pub fn skipped(year: i32, reason: impl Into<String>) -> Self {
        Self {
            year,
            outcome: FetchOutcome::Skipped {
                reason: reason.into(),
            },
        }
    }

    /// Rows for a fetched year, empty for a skipped one
    pub fn rows(&self) -> &[ObservationRow] {
        match &self.outcome {
            FetchOutcome::Fetched(rows) => rows,
            FetchOutcome::Skipped { .. } => &[],
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Skipped { .. })
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Skipped { reason } => Some(reason),
            FetchOutcome::Fetched(_) => None,
        }
    }
}
