use serde::{Deserialize, Serialize};

pub const DEFAULT_LATE_LIMIT: i64 = 3;
pub const DEFAULT_PUNISHMENT: &str = "Bake a cake";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub late_limit: i64,
    pub punishment: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            late_limit: DEFAULT_LATE_LIMIT,
            punishment: DEFAULT_PUNISHMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Capabilities a roster is built with. The limit-bearing and plain
/// variants are presets of the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub has_limit: bool,
    pub chart: ChartKind,
}

impl Features {
    pub fn limited() -> Self {
        Self {
            has_limit: true,
            chart: ChartKind::Bar,
        }
    }

    pub fn plain() -> Self {
        Self {
            has_limit: false,
            chart: ChartKind::Pie,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::limited()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitAlert {
    pub late_limit: i64,
    pub punishment: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    pub colors: Vec<String>,
    pub hover_color: Option<String>,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterView {
    pub features: Features,
    pub members: Vec<TeamMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punishment: Option<String>,
    pub over_limit: bool,
    pub alert: Option<LimitAlert>,
    pub editing: Option<EditState>,
    pub pending_name: String,
}

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitRequest {
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct PunishmentRequest {
    pub punishment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_serializes_with_storage_field_names() {
        let member = TeamMember {
            id: 7,
            name: "Ada".to_string(),
            points: 2,
        };
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "name": "Ada", "points": 2 }));
    }

    #[test]
    fn presets_pair_limit_with_chart_kind() {
        assert_eq!(Features::limited().chart, ChartKind::Bar);
        assert!(Features::limited().has_limit);
        assert_eq!(Features::plain().chart, ChartKind::Pie);
        assert!(!Features::plain().has_limit);
    }
}
