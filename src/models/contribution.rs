use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contribution categories, also used as map layer toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Infrastructure,
    Culture,
    Environment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Infrastructure,
        Category::Culture,
        Category::Environment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Infrastructure => "Infrastructure",
            Category::Culture => "Culture",
            Category::Environment => "Environment",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Category::General => Category::Infrastructure,
            Category::Infrastructure => Category::Culture,
            Category::Culture => Category::Environment,
            Category::Environment => Category::General,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// GeoJSON point. Coordinates are [longitude, latitude] on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "GeoPoint::default_type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    fn default_type() -> String {
        "Point".to_string()
    }

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: Self::default_type(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }
}

/// Author summary embedded in contributions and forum messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    #[serde(alias = "_id", deserialize_with = "super::flexible_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A geotagged contribution on the shared map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default = "Contribution::default_category")]
    pub category: Category,
    pub location: GeoPoint,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Contribution {
    fn default_category() -> Category {
        Category::General
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Anonymous")
    }
}

/// Request body for `POST /contributions`.
/// The backend accepts flat coordinates and stores them as a GeoJSON point.
#[derive(Debug, Clone, Serialize)]
pub struct NewContribution {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geopoint_coordinate_order() {
        // GeoJSON is [lng, lat]; accessors must swap back
        let json = r#"{"type":"Point","coordinates":[-6.8416,34.0209]}"#;
        let point: GeoPoint = serde_json::from_str(json).expect("point should parse");
        assert_eq!(point.latitude(), 34.0209);
        assert_eq!(point.longitude(), -6.8416);

        let built = GeoPoint::new(34.0209, -6.8416);
        assert_eq!(built.coordinates, [-6.8416, 34.0209]);
    }

    #[test]
    fn test_parse_contribution() {
        let json = r#"{
            "_id": "c-17",
            "title": "Broken fountain",
            "description": "Fountain at Bab el-Had has been dry for months",
            "category": "infrastructure",
            "location": {"type": "Point", "coordinates": [-6.8400, 34.0180]},
            "author": {"id": "u-2", "name": "Yassine"}
        }"#;
        let contribution: Contribution =
            serde_json::from_str(json).expect("contribution should parse");
        assert_eq!(contribution.id, "c-17");
        assert_eq!(contribution.category, Category::Infrastructure);
        assert_eq!(contribution.author_name(), "Yassine");
        assert_eq!(contribution.location.latitude(), 34.0180);
    }

    #[test]
    fn test_missing_category_defaults_to_general() {
        let json = r#"{
            "id": "c-1",
            "title": "t",
            "description": "d",
            "location": {"type": "Point", "coordinates": [0.0, 0.0]}
        }"#;
        let contribution: Contribution =
            serde_json::from_str(json).expect("contribution should parse");
        assert_eq!(contribution.category, Category::General);
        assert_eq!(contribution.author_name(), "Anonymous");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Environment).expect("serialize");
        assert_eq!(json, r#""environment""#);
    }
}
