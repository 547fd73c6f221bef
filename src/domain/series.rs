// Hourly series domain models
use super::aqi::{calculate_aqi_with, AqiResult, Category};
use super::breakpoint::OutOfRangePolicy;
use super::pollutant::Pollutant;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyEntry {
    #[serde(default)]
    pub time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub readings: HashMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct HourlyAssessment {
    pub label: String,
    pub time: Option<DateTime<FixedOffset>>,
    pub result: AqiResult,
}

impl HourlyAssessment {
    pub fn assess(hour: usize, entry: &HourlyEntry, policy: OutOfRangePolicy) -> Self {
        Self {
            label: hour_label(hour, entry.time),
            time: entry.time,
            result: calculate_aqi_with(&entry.readings, policy),
        }
    }
}

/// "HH:00" in the entry's own offset for timestamped entries, "+Nh"
/// offsets otherwise.
pub fn hour_label(hour: usize, time: Option<DateTime<FixedOffset>>) -> String {
    match time {
        Some(t) => t.format("%H:00").to_string(),
        None => format!("+{}h", hour),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollutantStats {
    pub pollutant: Pollutant,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub hours: usize,
    pub max_aqi: f64,
    pub max_category: Category,
    pub pollutants: Vec<PollutantStats>,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    min: f64,
    max: f64,
    sum: f64,
    samples: usize,
}

/// Folds hourly assessments into a [`SeriesSummary`] one at a time, so the
/// streaming path never holds the whole series.
#[derive(Debug, Default)]
pub struct SummaryAccumulator {
    hours: usize,
    max_aqi: f64,
    per_pollutant: BTreeMap<Pollutant, Running>,
}

impl SummaryAccumulator {
    pub fn push(&mut self, assessment: &HourlyAssessment) {
        self.hours += 1;
        self.max_aqi = self.max_aqi.max(assessment.result.aqi);

        for sub in &assessment.result.sub_indices {
            let value = sub.concentration;
            self.per_pollutant
                .entry(sub.pollutant)
                .and_modify(|r| {
                    r.min = r.min.min(value);
                    r.max = r.max.max(value);
                    r.sum += value;
                    r.samples += 1;
                })
                .or_insert(Running {
                    min: value,
                    max: value,
                    sum: value,
                    samples: 1,
                });
        }
    }

    pub fn finish(self) -> SeriesSummary {
        let pollutants = self
            .per_pollutant
            .into_iter()
            .map(|(pollutant, r)| PollutantStats {
                pollutant,
                min: r.min,
                max: r.max,
                mean: r.sum / r.samples as f64,
                samples: r.samples,
            })
            .collect();

        SeriesSummary {
            hours: self.hours,
            max_aqi: self.max_aqi,
            max_category: Category::from_aqi(self.max_aqi),
            pollutants,
        }
    }
}

pub fn assess_series(
    entries: &[HourlyEntry],
    policy: OutOfRangePolicy,
) -> (Vec<HourlyAssessment>, SeriesSummary) {
    let mut acc = SummaryAccumulator::default();
    let hourly: Vec<HourlyAssessment> = entries
        .iter()
        .enumerate()
        .map(|(hour, entry)| {
            let assessment = HourlyAssessment::assess(hour, entry, policy);
            acc.push(&assessment);
            assessment
        })
        .collect();

    (hourly, acc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn co_entry(value: f64) -> HourlyEntry {
        HourlyEntry {
            time: None,
            readings: HashMap::from([("CO(GT)".to_string(), value)]),
        }
    }

    #[test]
    fn test_hour_label() {
        let t = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 7, 42, 0)
            .unwrap();
        assert_eq!(hour_label(3, Some(t)), "07:00");
        assert_eq!(hour_label(3, None), "+3h");
    }

    #[test]
    fn test_hour_label_keeps_caller_offset() {
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let t = jakarta.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        assert_eq!(hour_label(0, Some(t)), "13:00");

        let entry: HourlyEntry =
            serde_json::from_str(r#"{"time": "2024-05-01T13:00:00+07:00", "readings": {}}"#)
                .unwrap();
        assert_eq!(hour_label(0, entry.time), "13:00");
        assert_eq!(entry.time.unwrap().offset().local_minus_utc(), 7 * 3600);

        let assessment = HourlyAssessment::assess(0, &entry, OutOfRangePolicy::Saturate);
        assert_eq!(assessment.label, "13:00");
    }

    #[test]
    fn test_summary_statistics() {
        let entries = vec![co_entry(1.0), co_entry(4.0), co_entry(2.5)];
        let (hourly, summary) = assess_series(&entries, OutOfRangePolicy::Saturate);

        assert_eq!(hourly.len(), 3);
        assert_eq!(hourly[1].label, "+1h");
        assert_eq!(summary.hours, 3);
        assert_eq!(summary.pollutants.len(), 1);

        let co = &summary.pollutants[0];
        assert_eq!(co.pollutant, Pollutant::Co);
        assert_eq!(co.min, 1.0);
        assert_eq!(co.max, 4.0);
        assert!((co.mean - 2.5).abs() < 1e-12);
        assert_eq!(co.samples, 3);

        assert!((summary.max_aqi - 4.0 * 50.0 / 4.4).abs() < 1e-9);
        assert_eq!(summary.max_category, Category::Good);
    }

    #[test]
    fn test_mixed_pollutants_counted_separately() {
        let entries = vec![
            co_entry(2.0),
            HourlyEntry {
                time: None,
                readings: HashMap::from([
                    ("NO2".to_string(), 120.0),
                    ("noise".to_string(), 1.0),
                ]),
            },
        ];
        let (_, summary) = assess_series(&entries, OutOfRangePolicy::Saturate);

        assert_eq!(summary.pollutants.len(), 2);
        assert_eq!(summary.pollutants[1].pollutant, Pollutant::No2);
        assert_eq!(summary.pollutants[1].samples, 1);
        assert_eq!(summary.max_category, Category::UnhealthyForSensitiveGroups);
    }

    #[test]
    fn test_entry_deserialize() {
        let entry: HourlyEntry = serde_json::from_str(
            r#"{"time": "2024-05-01T13:00:00Z", "readings": {"CO(GT)": 2.5}}"#,
        )
        .unwrap();
        assert_eq!(entry.readings["CO(GT)"], 2.5);
        assert_eq!(hour_label(0, entry.time), "13:00");

        let bare: HourlyEntry = serde_json::from_str("{}").unwrap();
        assert!(bare.time.is_none());
        assert!(bare.readings.is_empty());
    }
}
