use crate::models::CleanObservation;
use crate::utils::constants::month_name;
use chrono::Datelike;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureExtremes {
    pub max_temp: f64,
    pub min_temp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyDelta {
    pub month: u32,
    pub delta: f64,
}

/// The three statistics reported for a target year
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    pub year: i32,
    pub extremes: Option<TemperatureExtremes>,
    pub percentage_difference: Option<f64>,
    pub monthly_deltas: Vec<MonthlyDelta>,
}

pub struct WeatherAnalyzer;

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[CleanObservation], year: i32) -> WeatherSummary {
        WeatherSummary {
            year,
            extremes: self.temperature_extremes(records),
            percentage_difference: self.percentage_difference(records, year),
            monthly_deltas: self.monthly_mean_deltas(records, year),
        }
    }

    /// Highest max temperature and lowest min temperature across all rows
    pub fn temperature_extremes(&self, records: &[CleanObservation]) -> Option<TemperatureExtremes> {
        let first = records.first()?;
        let mut extremes = TemperatureExtremes {
            max_temp: first.max_temp,
            min_temp: first.min_temp,
        };

        for record in &records[1..] {
            extremes.max_temp = extremes.max_temp.max(record.max_temp);
            extremes.min_temp = extremes.min_temp.min(record.min_temp);
        }

        Some(extremes)
    }

    /// Change of the target year's mean temperature against the pooled mean
    /// of the two years before it, in percent rounded to two places.
    /// `None` when either side has no rows or the earlier mean is zero.
    pub fn percentage_difference(&self, records: &[CleanObservation], year: i32) -> Option<f64> {
        let current = mean(
            records
                .iter()
                .filter(|r| r.timestamp.year() == year)
                .map(|r| r.mean_temp),
        )?;
        let previous = mean(
            records
                .iter()
                .filter(|r| {
                    let y = r.timestamp.year();
                    y == year - 1 || y == year - 2
                })
                .map(|r| r.mean_temp),
        )?;

        if previous == 0.0 {
            return None;
        }

        let change = (current - previous) / previous * 100.0;
        Some(round2(change))
    }

    /// Mean temperature per calendar month of the target year
    pub fn monthly_means(&self, records: &[CleanObservation], year: i32) -> BTreeMap<u32, f64> {
        let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for record in records.iter().filter(|r| r.timestamp.year() == year) {
            let entry = sums.entry(record.timestamp.month()).or_insert((0.0, 0));
            entry.0 += record.mean_temp;
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|(month, (sum, count))| (month, sum / count as f64))
            .collect()
    }

    /// Difference between each present month's mean and the previous
    /// present month's. The first present month has no entry.
    pub fn monthly_mean_deltas(&self, records: &[CleanObservation], year: i32) -> Vec<MonthlyDelta> {
        let means: Vec<(u32, f64)> = self.monthly_means(records, year).into_iter().collect();

        means
            .windows(2)
            .map(|pair| MonthlyDelta {
                month: pair[1].0,
                delta: pair[1].1 - pair[0].1,
            })
            .collect()
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

const UNDEFINED: &str = "undefined (insufficient data)";

impl WeatherSummary {
    pub fn report(&self) -> String {
        let year = self.year;
        let (max_temp, min_temp) = match self.extremes {
            Some(e) => (format!("{:.2}", e.max_temp), format!("{:.2}", e.min_temp)),
            None => (UNDEFINED.to_string(), UNDEFINED.to_string()),
        };
        let percentage = match self.percentage_difference {
            Some(p) => format!("{:.2}", p),
            None => UNDEFINED.to_string(),
        };

        let mut report = format!(
            "\n--> Max Temperature for {}: {} °C \n\n\
            --> Min Temperature for {}: {} °C \n\n\
            --> Percentage Difference between avg temp of {} and avg temp of {} and {} is {} % \n\n\
            --> Difference in average temperature between months for {}:",
            year,
            max_temp,
            year,
            min_temp,
            year,
            year - 1,
            year - 2,
            percentage,
            year
        );

        for delta in &self.monthly_deltas {
            if let Some(name) = month_name(delta.month) {
                report.push_str(&format!("\n    Difference in {}: {:.2} °C", name, delta.delta));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn obs(y: i32, m: u32, d: u32, max: f64, min: f64, mean: f64) -> CleanObservation {
        let timestamp = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
        CleanObservation::new("TEST".to_string(), timestamp, y, m, d, max, min, mean)
    }

    fn mean_only(y: i32, m: u32, mean: f64) -> CleanObservation {
        obs(y, m, 1, mean, mean, mean)
    }

    #[test]
    fn test_extremes() {
        let records = vec![
            obs(2023, 1, 1, 10.2, 1.0, 5.0),
            obs(2023, 1, 2, 15.5, -5.0, 5.0),
            obs(2023, 1, 3, -3.0, -12.0, -7.0),
        ];

        let extremes = WeatherAnalyzer::new().temperature_extremes(&records).unwrap();
        assert_eq!(extremes.max_temp, 15.5);
        assert_eq!(extremes.min_temp, -12.0);
    }

    #[test]
    fn test_extremes_empty() {
        assert_eq!(WeatherAnalyzer::new().temperature_extremes(&[]), None);
    }

    #[test]
    fn test_percentage_difference() {
        let records = vec![
            mean_only(2023, 1, 5.0),
            mean_only(2023, 2, 5.0),
            mean_only(2022, 1, 3.0),
            mean_only(2021, 1, 5.0),
            mean_only(2020, 1, 100.0), // outside the comparison window
        ];

        let analyzer = WeatherAnalyzer::new();
        assert_eq!(analyzer.percentage_difference(&records, 2023), Some(25.0));
        // Same input, same answer
        assert_eq!(analyzer.percentage_difference(&records, 2023), Some(25.0));
    }

    #[test]
    fn test_percentage_difference_is_rounded() {
        let records = vec![mean_only(2023, 1, 4.0), mean_only(2022, 1, 3.0)];
        assert_eq!(
            WeatherAnalyzer::new().percentage_difference(&records, 2023),
            Some(33.33)
        );
    }

    #[test]
    fn test_percentage_difference_undefined() {
        let analyzer = WeatherAnalyzer::new();

        let no_history = vec![mean_only(2023, 1, 4.0)];
        assert_eq!(analyzer.percentage_difference(&no_history, 2023), None);

        let no_current = vec![mean_only(2022, 1, 4.0)];
        assert_eq!(analyzer.percentage_difference(&no_current, 2023), None);

        let zero_history = vec![mean_only(2023, 1, 4.0), mean_only(2022, 1, 0.0)];
        assert_eq!(analyzer.percentage_difference(&zero_history, 2023), None);
    }

    #[test]
    fn test_monthly_deltas() {
        let records = vec![
            mean_only(2023, 1, 1.0),
            mean_only(2023, 1, 3.0),
            mean_only(2023, 2, 5.0),
            mean_only(2023, 3, 4.0),
            mean_only(2022, 4, 30.0),
        ];

        let deltas = WeatherAnalyzer::new().monthly_mean_deltas(&records, 2023);
        assert_eq!(
            deltas,
            vec![
                MonthlyDelta { month: 2, delta: 3.0 },
                MonthlyDelta { month: 3, delta: -1.0 },
            ]
        );
    }

    #[test]
    fn test_monthly_deltas_skip_absent_months() {
        let records = vec![mean_only(2023, 2, 1.0), mean_only(2023, 6, 7.0), mean_only(2023, 7, 6.5)];

        let deltas = WeatherAnalyzer::new().monthly_mean_deltas(&records, 2023);
        let months: Vec<u32> = deltas.iter().map(|d| d.month).collect();
        assert_eq!(months, vec![6, 7]);
        assert_eq!(deltas[0].delta, 6.0);
    }

    #[test]
    fn test_monthly_deltas_full_year() {
        let records: Vec<CleanObservation> =
            (1..=12).map(|m| mean_only(2023, m, m as f64)).collect();
        let deltas = WeatherAnalyzer::new().monthly_mean_deltas(&records, 2023);
        assert_eq!(deltas.len(), 11);
        assert!(deltas.iter().all(|d| d.month >= 2));
    }

    #[test]
    fn test_report() {
        let summary = WeatherSummary {
            year: 2023,
            extremes: Some(TemperatureExtremes {
                max_temp: 15.5,
                min_temp: -12.0,
            }),
            percentage_difference: Some(25.0),
            monthly_deltas: vec![
                MonthlyDelta { month: 2, delta: 3.0 },
                MonthlyDelta { month: 3, delta: -1.0 },
            ],
        };

        let report = summary.report();
        assert!(report.contains("--> Max Temperature for 2023: 15.50 °C"));
        assert!(report.contains("--> Min Temperature for 2023: -12.00 °C"));
        assert!(report.contains("avg temp of 2023 and avg temp of 2022 and 2021 is 25.00 %"));
        assert!(report.contains("    Difference in February: 3.00 °C"));
        assert!(report.contains("    Difference in March: -1.00 °C"));
        assert!(!report.contains("January"));
    }

    #[test]
    fn test_report_undefined() {
        let summary = WeatherAnalyzer::new().analyze(&[], 2023);
        let report = summary.report();
        assert!(report.contains("Max Temperature for 2023: undefined"));
        assert!(report.contains("is undefined (insufficient data) %"));
    }
}
