// Health advisory domain model
use super::aqi::{AqiResult, Locale};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Public,
    Agency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryLevel {
    Ok,
    Caution,
    Alert,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub audience: Audience,
    pub level: AdvisoryLevel,
    pub message: String,
}

/// Public-facing text per level.
fn public_message(level: AdvisoryLevel, locale: Locale) -> &'static str {
    match (locale, level) {
        (Locale::En, AdvisoryLevel::Ok) => "Air quality is good. Safe for outdoor activity.",
        (Locale::En, AdvisoryLevel::Caution) => {
            "Air quality is moderate. Sensitive groups should reduce intense outdoor activity."
        }
        (Locale::En, _) => "Air quality is unhealthy. Reduce outdoor activity and wear a mask.",
        (Locale::Id, AdvisoryLevel::Ok) => "Kualitas udara baik. Aman untuk aktivitas outdoor.",
        (Locale::Id, AdvisoryLevel::Caution) => {
            "Kualitas udara sedang. Kelompok sensitif sebaiknya mengurangi aktivitas outdoor yang intens."
        }
        (Locale::Id, _) => {
            "Kualitas udara tidak sehat. Kurangi aktivitas outdoor dan gunakan masker."
        }
    }
}

fn agency_message(result: &AqiResult, locale: Locale) -> String {
    let escalate = result.aqi > 100.0;
    let dominant = result.dominant_sub_index().map(|s| {
        format!(
            "{} {:.2} {}",
            s.pollutant.symbol(),
            s.concentration,
            s.pollutant.unit()
        )
    });
    let category = result.category.label(locale);

    match locale {
        Locale::En => format!(
            "AQI {:.0} ({}), dominant pollutant: {}. Action: {}.",
            result.aqi,
            category,
            dominant.as_deref().unwrap_or("none"),
            if escalate { "Early warning required" } else { "Routine monitoring" }
        ),
        Locale::Id => format!(
            "AQI {:.0} ({}), polutan dominan: {}. Rekomendasi: {}.",
            result.aqi,
            category,
            dominant.as_deref().unwrap_or("tidak ada"),
            if escalate { "Peringatan dini diperlukan" } else { "Monitoring rutin" }
        ),
    }
}

impl Advisory {
    pub fn for_result(result: &AqiResult, audience: Audience, locale: Locale) -> Self {
        let aqi = result.aqi;
        let (level, message) = match audience {
            Audience::Public => {
                let level = if aqi <= 50.0 {
                    AdvisoryLevel::Ok
                } else if aqi <= 100.0 {
                    AdvisoryLevel::Caution
                } else {
                    AdvisoryLevel::Alert
                };
                (level, public_message(level, locale).to_string())
            }
            Audience::Agency => (AdvisoryLevel::Info, agency_message(result, locale)),
        };

        Self {
            audience,
            level,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aqi::calculate_aqi;
    use std::collections::HashMap;

    fn result_for_co(value: f64) -> AqiResult {
        calculate_aqi(&HashMap::from([("CO(GT)".to_string(), value)]))
    }

    #[test]
    fn test_public_levels() {
        let good = Advisory::for_result(&result_for_co(2.0), Audience::Public, Locale::En);
        assert_eq!(good.level, AdvisoryLevel::Ok);

        let moderate = Advisory::for_result(&result_for_co(6.0), Audience::Public, Locale::En);
        assert_eq!(moderate.level, AdvisoryLevel::Caution);

        let unhealthy = Advisory::for_result(&result_for_co(10.0), Audience::Public, Locale::En);
        assert_eq!(unhealthy.level, AdvisoryLevel::Alert);
        assert!(unhealthy.message.contains("mask"));
    }

    #[test]
    fn test_agency_actions() {
        let routine = Advisory::for_result(&result_for_co(2.2), Audience::Agency, Locale::En);
        assert_eq!(routine.level, AdvisoryLevel::Info);
        assert_eq!(
            routine.message,
            "AQI 25 (Good), dominant pollutant: CO 2.20 mg/m³. Action: Routine monitoring."
        );

        let warning = Advisory::for_result(&result_for_co(20.0), Audience::Agency, Locale::En);
        assert!(warning.message.ends_with("Early warning required."));
    }

    #[test]
    fn test_agency_without_readings() {
        let empty = calculate_aqi(&HashMap::new());
        let advisory = Advisory::for_result(&empty, Audience::Agency, Locale::En);
        assert!(advisory.message.contains("dominant pollutant: none"));
    }

    #[test]
    fn test_indonesian_messages() {
        let warning = Advisory::for_result(&result_for_co(20.0), Audience::Agency, Locale::Id);
        assert_eq!(
            warning.message,
            "AQI 200 (Tidak Sehat), polutan dominan: CO 20.00 mg/m³. \
             Rekomendasi: Peringatan dini diperlukan."
        );

        let public = Advisory::for_result(&result_for_co(10.0), Audience::Public, Locale::Id);
        assert_eq!(public.level, AdvisoryLevel::Alert);
        assert!(public.message.contains("gunakan masker"));

        let empty = calculate_aqi(&HashMap::new());
        let agency = Advisory::for_result(&empty, Audience::Agency, Locale::Id);
        assert!(agency.message.contains("polutan dominan: tidak ada"));
        assert!(agency.message.ends_with("Monitoring rutin."));
    }
}
