// Mapper to convert domain models to JSON response bodies
use crate::domain::advisory::Advisory;
use crate::domain::aqi::{AqiResult, Locale, SubIndex};
use crate::domain::breakpoint::{table_for, Breakpoint};
use crate::domain::pollutant::Pollutant;
use crate::domain::series::{HourlyAssessment, PollutantStats, SeriesSummary};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AqiBody {
    pub aqi: f64,
    pub category: &'static str,
    pub color: &'static str,
    pub dominant: Option<Pollutant>,
    pub sub_indices: Vec<SubIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Advisory>,
}

#[derive(Debug, Serialize)]
pub struct HourlyBody {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub result: AqiBody,
}

#[derive(Debug, Serialize)]
pub struct StatsBody {
    pub pollutant: Pollutant,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub samples: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryBody {
    pub hours: usize,
    pub max_aqi: f64,
    pub max_category: &'static str,
    pub max_color: &'static str,
    pub pollutants: Vec<StatsBody>,
}

#[derive(Debug, Serialize)]
pub struct SeriesBody {
    pub hourly: Vec<HourlyBody>,
    pub summary: SummaryBody,
}

/// One line of the streamed series: hours first, the summary last.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesChunk {
    Hour(HourlyBody),
    Summary(SummaryBody),
}

#[derive(Debug, Serialize)]
pub struct PollutantBody {
    pub pollutant: Pollutant,
    pub unit: &'static str,
    pub breakpoints: &'static [Breakpoint],
}

pub fn result_to_json(result: AqiResult, advisory: Option<Advisory>, locale: Locale) -> AqiBody {
    AqiBody {
        aqi: result.aqi,
        category: result.category.label(locale),
        color: result.color(),
        dominant: result.dominant(),
        sub_indices: result.sub_indices,
        advisory,
    }
}

pub fn hourly_to_json(assessment: HourlyAssessment, locale: Locale) -> HourlyBody {
    HourlyBody {
        label: assessment.label,
        time: assessment.time,
        result: result_to_json(assessment.result, None, locale),
    }
}

fn stats_to_json(stats: PollutantStats) -> StatsBody {
    StatsBody {
        pollutant: stats.pollutant,
        unit: stats.pollutant.unit(),
        min: stats.min,
        max: stats.max,
        mean: stats.mean,
        samples: stats.samples,
    }
}

pub fn summary_to_json(summary: SeriesSummary, locale: Locale) -> SummaryBody {
    SummaryBody {
        hours: summary.hours,
        max_aqi: summary.max_aqi,
        max_category: summary.max_category.label(locale),
        max_color: summary.max_category.color(),
        pollutants: summary.pollutants.into_iter().map(stats_to_json).collect(),
    }
}

pub fn pollutants_to_json() -> Vec<PollutantBody> {
    Pollutant::ALL
        .into_iter()
        .map(|pollutant| PollutantBody {
            pollutant,
            unit: pollutant.unit(),
            breakpoints: table_for(pollutant),
        })
        .collect()
}
