use crate::utils::constants::DATE_FORMAT;
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Calendar date that decides where a row lives in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey(NaiveDate);

impl PartitionKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Path segments `YYYY`, `MM`, `DD`
    pub fn segments(&self) -> [String; 3] {
        [
            format!("{:04}", self.0.year()),
            format!("{:02}", self.0.month()),
            format!("{:02}", self.0.day()),
        ]
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
