// Air Quality Index aggregation and classification
use super::breakpoint::{sub_index_with, table_for, OutOfRangePolicy};
use super::pollutant::Pollutant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
}

impl Category {
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Category::Good
        } else if aqi <= 100.0 {
            Category::Moderate
        } else if aqi <= 150.0 {
            Category::UnhealthyForSensitiveGroups
        } else {
            Category::Unhealthy
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Category::Good) => "Good",
            (Locale::En, Category::Moderate) => "Moderate",
            (Locale::En, Category::UnhealthyForSensitiveGroups) => "Unhealthy for Sensitive Groups",
            (Locale::En, Category::Unhealthy) => "Unhealthy",
            (Locale::Id, Category::Good) => "Baik",
            (Locale::Id, Category::Moderate) => "Sedang",
            (Locale::Id, Category::UnhealthyForSensitiveGroups) => {
                "Tidak Sehat untuk Kelompok Sensitif"
            }
            (Locale::Id, Category::Unhealthy) => "Tidak Sehat",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::Good => "#00ff00",
            Category::Moderate => "#ffff00",
            Category::UnhealthyForSensitiveGroups => "#ff9900",
            Category::Unhealthy => "#ff0000",
        }
    }
}

/// Language of category labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIndex {
    pub pollutant: Pollutant,
    pub concentration: f64,
    pub index: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AqiResult {
    pub aqi: f64,
    pub category: Category,
    pub sub_indices: Vec<SubIndex>,
}

impl AqiResult {
    /// The sub-index that set the AQI, if any pollutant was recognized.
    pub fn dominant_sub_index(&self) -> Option<&SubIndex> {
        self.sub_indices.iter().find(|s| s.index == self.aqi)
    }

    pub fn dominant(&self) -> Option<Pollutant> {
        self.dominant_sub_index().map(|s| s.pollutant)
    }

    pub fn color(&self) -> &'static str {
        self.category.color()
    }

    /// `(aqi, category label, color)` as presentation layers consume it.
    pub fn summary(&self, locale: Locale) -> (f64, &'static str, &'static str) {
        (self.aqi, self.category.label(locale), self.color())
    }
}

pub fn calculate_aqi(readings: &HashMap<String, f64>) -> AqiResult {
    calculate_aqi_with(readings, OutOfRangePolicy::Saturate)
}

/// Worst sub-index over the recognized readings; unknown keys are skipped.
pub fn calculate_aqi_with(readings: &HashMap<String, f64>, policy: OutOfRangePolicy) -> AqiResult {
    let mut sub_indices: Vec<SubIndex> = readings
        .iter()
        .filter_map(|(key, &value)| match key.parse::<Pollutant>() {
            Ok(pollutant) => Some(SubIndex {
                pollutant,
                concentration: value,
                index: sub_index_with(value, table_for(pollutant), policy),
            }),
            Err(e) => {
                tracing::debug!("Skipping reading: {}", e);
                None
            }
        })
        .collect();
    sub_indices.sort_by_key(|s| s.pollutant);

    let aqi = sub_indices.iter().map(|s| s.index).fold(0.0, f64::max);

    AqiResult {
        aqi,
        category: Category::from_aqi(aqi),
        sub_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_worst_pollutant_dominates() {
        let result = calculate_aqi(&readings(&[("CO(GT)", 2.2), ("NO2(GT)", 27.0)]));
        assert!((result.aqi - 25.471698).abs() < 1e-5);
        assert_eq!(result.category, Category::Good);
        assert_eq!(result.dominant(), Some(Pollutant::No2));
        assert_eq!(result.sub_indices.len(), 2);
        assert_eq!(result.sub_indices[0].pollutant, Pollutant::Co);
    }

    #[test]
    fn test_empty_readings() {
        let result = calculate_aqi(&HashMap::new());
        assert_eq!(result.aqi, 0.0);
        assert_eq!(result.summary(Locale::En), (0.0, "Good", "#00ff00"));
        assert_eq!(result.summary(Locale::Id), (0.0, "Baik", "#00ff00"));
        assert_eq!(result.dominant(), None);
    }

    #[test]
    fn test_above_top_band_saturates() {
        let result = calculate_aqi(&readings(&[("CO(GT)", 20.0)]));
        assert_eq!(result.aqi, 200.0);
        assert_eq!(result.category.label(Locale::En), "Unhealthy");
        assert_eq!(result.color(), "#ff0000");
    }

    #[test]
    fn test_unrecognized_key_ignored() {
        let result = calculate_aqi(&readings(&[("XYZ", 5.0)]));
        assert_eq!(result.aqi, 0.0);
        assert!(result.sub_indices.is_empty());

        let result = calculate_aqi(&readings(&[("XYZ", 5.0), ("C6H6", 8.0)]));
        assert!((result.aqi - 75.5).abs() < 1e-9);
        assert_eq!(result.category, Category::Moderate);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(Category::from_aqi(50.0), Category::Good);
        assert_eq!(Category::from_aqi(50.0001), Category::Moderate);
        assert_eq!(Category::from_aqi(100.0), Category::Moderate);
        assert_eq!(Category::from_aqi(150.0), Category::UnhealthyForSensitiveGroups);
        assert_eq!(Category::from_aqi(150.0001), Category::Unhealthy);
        assert_eq!(
            Category::UnhealthyForSensitiveGroups.color(),
            "#ff9900"
        );
    }

    #[test]
    fn test_clamp_policy_negative_reading() {
        let input = readings(&[("CO", -3.0)]);
        assert_eq!(calculate_aqi(&input).aqi, 200.0);
        let clamped = calculate_aqi_with(&input, OutOfRangePolicy::Clamp);
        assert_eq!(clamped.aqi, 0.0);
        assert_eq!(clamped.category, Category::Good);
    }
}
