// AQI service - Use cases for single and series assessments
use crate::application::error::AqiError;
use crate::domain::advisory::{Advisory, Audience};
use crate::domain::aqi::{calculate_aqi_with, AqiResult, Locale};
use crate::domain::breakpoint::OutOfRangePolicy;
use crate::domain::series::{assess_series, HourlyAssessment, HourlyEntry, SeriesSummary, SummaryAccumulator};
use crate::infrastructure::config::AqiSettings;
use crate::infrastructure::json_mapper::{hourly_to_json, summary_to_json, SeriesChunk};
use std::collections::HashMap;
use tokio::sync::mpsc;

const STREAM_BUFFER: usize = 32;

#[derive(Clone)]
pub struct AqiService {
    locale: Locale,
    policy: OutOfRangePolicy,
    max_series_len: usize,
}

impl AqiService {
    pub fn new(settings: &AqiSettings) -> Self {
        Self {
            locale: settings.locale,
            policy: settings.out_of_range,
            max_series_len: settings.max_series_len,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn assess(&self, readings: &HashMap<String, f64>, audience: Audience) -> (AqiResult, Advisory) {
        let result = calculate_aqi_with(readings, self.policy);
        let advisory = Advisory::for_result(&result, audience, self.locale);

        tracing::debug!(
            "Assessed {} readings: aqi={:.2} category={:?}",
            readings.len(),
            result.aqi,
            result.category
        );

        (result, advisory)
    }

    fn validate_series(&self, entries: &[HourlyEntry]) -> Result<(), AqiError> {
        if entries.is_empty() {
            return Err(AqiError::EmptySeries);
        }
        if entries.len() > self.max_series_len {
            return Err(AqiError::SeriesTooLong {
                len: entries.len(),
                max: self.max_series_len,
            });
        }
        Ok(())
    }

    pub fn assess_series(
        &self,
        entries: &[HourlyEntry],
    ) -> Result<(Vec<HourlyAssessment>, SeriesSummary), AqiError> {
        self.validate_series(entries)?;
        let (hourly, summary) = assess_series(entries, self.policy);

        tracing::debug!(
            "Assessed series of {} hours: max_aqi={:.2}",
            summary.hours,
            summary.max_aqi
        );

        Ok((hourly, summary))
    }

    /// Validate up front, then emit one chunk per hour from a spawned task
    /// followed by the summary chunk.
    pub fn stream_series(
        &self,
        entries: Vec<HourlyEntry>,
    ) -> Result<mpsc::Receiver<SeriesChunk>, AqiError> {
        self.validate_series(&entries)?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let policy = self.policy;
        let locale = self.locale;

        tokio::spawn(async move {
            let mut acc = SummaryAccumulator::default();

            for (hour, entry) in entries.iter().enumerate() {
                let assessment = HourlyAssessment::assess(hour, entry, policy);
                acc.push(&assessment);

                if tx
                    .send(SeriesChunk::Hour(hourly_to_json(assessment, locale)))
                    .await
                    .is_err()
                {
                    tracing::debug!("Series stream receiver dropped at hour {}", hour);
                    return;
                }
            }

            let summary = summary_to_json(acc.finish(), locale);
            let _ = tx.send(SeriesChunk::Summary(summary)).await;
        });

        Ok(rx)
    }
}
