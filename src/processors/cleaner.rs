use crate::models::{CleanObservation, PartitionKey, YearFetch};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub missing_temperature: usize,
    pub out_of_range: usize,
    pub malformed_rows: usize,
    pub kept_rows: usize,
    pub skipped_years: Vec<(i32, String)>,
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cleaning Summary:\n\
            - Input rows: {}\n\
            - Missing temperature: {}\n\
            - After window end: {}\n\
            - Malformed rows: {}\n\
            - Kept rows: {}",
            self.input_rows,
            self.missing_temperature,
            self.out_of_range,
            self.malformed_rows,
            self.kept_rows
        )?;
        for (year, reason) in &self.skipped_years {
            write!(f, "\n- Skipped {}: {}", year, reason)?;
        }
        Ok(())
    }
}

/// Concatenates per-year downloads and keeps complete rows dated before the
/// end of the target year
pub struct Cleaner {
    cutoff: Option<NaiveDateTime>,
}

impl Cleaner {
    pub fn new(target_year: i32) -> Self {
        Self {
            cutoff: target_year
                .checked_add(1)
                .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
                .map(|date| date.and_time(NaiveTime::MIN)),
        }
    }

    pub fn clean(&self, fetches: &[YearFetch]) -> (Vec<CleanObservation>, CleaningReport) {
        let mut report = CleaningReport::default();
        let mut rows = Vec::new();

        for fetch in fetches {
            if let Some(reason) = fetch.skip_reason() {
                report.skipped_years.push((fetch.year, reason.to_string()));
                continue;
            }

            for row in fetch.rows() {
                report.input_rows += 1;

                if !row.has_all_temperatures() {
                    report.missing_temperature += 1;
                    continue;
                }

                let observation = match CleanObservation::from_row(row) {
                    Ok(observation) => observation,
                    Err(e) => {
                        debug!(date_time = %row.date_time, error = %e, "Dropping row");
                        report.malformed_rows += 1;
                        continue;
                    }
                };

                if self.is_past_cutoff(&observation) {
                    report.out_of_range += 1;
                    continue;
                }

                rows.push(observation);
            }
        }

        report.kept_rows = rows.len();
        if report.malformed_rows > 0 {
            warn!(
                count = report.malformed_rows,
                "Dropped rows with unparseable timestamps or out-of-range fields"
            );
        }
        info!(
            input = report.input_rows,
            kept = report.kept_rows,
            "Cleaned climate data"
        );

        (rows, report)
    }

    fn is_past_cutoff(&self, observation: &CleanObservation) -> bool {
        match self.cutoff {
            Some(cutoff) => observation.timestamp >= cutoff,
            None => false,
        }
    }
}

/// Group rows by partition key, preserving arrival order inside each group
pub fn group_by_partition(rows: &[CleanObservation]) -> BTreeMap<PartitionKey, Vec<&CleanObservation>> {
    let mut groups: BTreeMap<PartitionKey, Vec<&CleanObservation>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.partition_key()).or_default().push(row);
    }
    groups
}
