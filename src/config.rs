use crate::models::{ChartKind, Features};
use std::{env, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/storage.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_path: PathBuf,
    pub features: Features,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            port: resolve_port(),
            data_path: resolve_data_path(),
            features: resolve_features(
                env::var("ROSTER_VARIANT").ok().as_deref(),
                env::var("ROSTER_CHART").ok().as_deref(),
            ),
        }
    }
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}

/// `variant` picks the preset (`limit` or `plain`); `chart` overrides the
/// preset's chart kind. Unknown values fall back with a warning.
pub fn resolve_features(variant: Option<&str>, chart: Option<&str>) -> Features {
    let mut features = match variant.map(str::trim) {
        None | Some("") | Some("limit") => Features::limited(),
        Some("plain") => Features::plain(),
        Some(other) => {
            warn!("unknown ROSTER_VARIANT '{other}', using 'limit'");
            Features::limited()
        }
    };

    match chart.map(str::trim) {
        None | Some("") => {}
        Some("bar") => features.chart = ChartKind::Bar,
        Some("pie") => features.chart = ChartKind::Pie,
        Some(other) => warn!("unknown ROSTER_CHART '{other}', keeping preset"),
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_defaults_to_limit() {
        assert_eq!(resolve_features(None, None), Features::limited());
        assert_eq!(resolve_features(Some("bogus"), None), Features::limited());
    }

    #[test]
    fn plain_variant_uses_pie() {
        assert_eq!(resolve_features(Some("plain"), None), Features::plain());
    }

    #[test]
    fn chart_override_keeps_limit_flag() {
        let features = resolve_features(Some("limit"), Some("pie"));
        assert!(features.has_limit);
        assert_eq!(features.chart, ChartKind::Pie);

        let features = resolve_features(Some("plain"), Some("nope"));
        assert_eq!(features.chart, ChartKind::Pie);
    }
}
