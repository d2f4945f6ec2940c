use serde::{Deserialize, Serialize};

/// A route theme offered on the Échappées screen.
/// The catalog is fixed client-side; the backend only sees the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const ROUTE_THEMES: [RouteTheme; 4] = [
    RouteTheme {
        id: "history",
        name: "Historical Journey",
        description: "Explore Rabat's rich historical sites",
    },
    RouteTheme {
        id: "culture",
        name: "Cultural Immersion",
        description: "Discover local art, markets, and traditions",
    },
    RouteTheme {
        id: "nature",
        name: "Urban Nature",
        description: "Parks, gardens, and green spaces",
    },
    RouteTheme {
        id: "gastronomy",
        name: "Culinary Trail",
        description: "Local cuisine and food experiences",
    },
];

/// Start position for route generation, flat lat/lng on the wire
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StartLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Request body for `POST /routes/generate`
#[derive(Debug, Clone, Serialize)]
pub struct RouteRequest {
    pub theme: &'static str,
    #[serde(rename = "startLocation")]
    pub start_location: StartLocation,
}

/// A stop on a generated route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePoint {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Response from `POST /routes/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRoute {
    /// Total length in kilometers
    #[serde(default)]
    pub distance: f64,
    #[serde(rename = "estimatedTime", default)]
    pub estimated_time: String,
    #[serde(default)]
    pub points: Vec<RoutePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_request_wire_shape() {
        let request = RouteRequest {
            theme: "history",
            start_location: StartLocation {
                lat: 34.0209,
                lng: -6.8416,
            },
        };
        let json = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(json["theme"], "history");
        assert_eq!(json["startLocation"]["lat"], 34.0209);
        assert_eq!(json["startLocation"]["lng"], -6.8416);
    }

    #[test]
    fn test_parse_generated_route() {
        let json = r#"{
            "distance": 4.2,
            "estimatedTime": "1h 30m",
            "points": [
                {"name": "Kasbah of the Udayas", "description": "12th-century citadel"},
                {"name": "Hassan Tower", "description": "Minaret of an incomplete mosque"}
            ]
        }"#;
        let route: GeneratedRoute = serde_json::from_str(json).expect("route should parse");
        assert_eq!(route.points.len(), 2);
        assert_eq!(route.distance, 4.2);
        assert_eq!(route.points[0].name, "Kasbah of the Udayas");
    }

    #[test]
    fn test_theme_catalog_ids_are_unique() {
        let mut ids: Vec<_> = ROUTE_THEMES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ROUTE_THEMES.len());
    }
}
