use crate::domain::aqi::Locale;
use crate::domain::breakpoint::OutOfRangePolicy;
use config::{builder::DefaultState, ConfigBuilder};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub aqi: AqiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub compression: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AqiSettings {
    pub locale: Locale,
    pub out_of_range: OutOfRangePolicy,
    pub max_series_len: usize,
}

fn with_defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("server.compression", true)?
        .set_default("aqi.locale", "en")?
        .set_default("aqi.out_of_range", "saturate")?
        .set_default("aqi.max_series_len", 168)?)
}

/// Defaults, then `config/server.*` if present, then `AQI__SECTION__KEY`
/// environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = with_defaults()?
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(
            config::Environment::with_prefix("AQI")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
pub fn settings_from_toml(toml: &str) -> anyhow::Result<Settings> {
    let settings = with_defaults()?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = settings_from_toml("").unwrap();
        assert_eq!(settings.server.bind, "0.0.0.0:8080");
        assert!(settings.server.compression);
        assert_eq!(settings.aqi.locale, Locale::En);
        assert_eq!(settings.aqi.out_of_range, OutOfRangePolicy::Saturate);
        assert_eq!(settings.aqi.max_series_len, 168);
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from_toml(
            r#"
            [server]
            compression = false

            [aqi]
            locale = "id"
            out_of_range = "clamp"
            max_series_len = 24
            "#,
        )
        .unwrap();

        assert!(!settings.server.compression);
        assert_eq!(settings.aqi.locale, Locale::Id);
        assert_eq!(settings.aqi.out_of_range, OutOfRangePolicy::Clamp);
        assert_eq!(settings.aqi.max_series_len, 24);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let result = settings_from_toml("[aqi]\nout_of_range = \"wrap\"\n");
        assert!(result.is_err());
    }
}
