use crate::utils::error::{PredictError, Result};
use crate::utils::validation::validate_coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 經緯度座標，建立時即驗證範圍（反序列化也一樣）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = PredictError;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_coordinate("latitude", latitude, -90.0, 90.0)?;
        validate_coordinate("longitude", longitude, -180.0, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub species: String,
    pub coordinates: GeoPoint,
}

impl Zone {
    pub fn new(name: impl Into<String>, species: impl Into<String>, coordinates: GeoPoint) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            coordinates,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// mg/m³
    pub chlorophyll: f64,
    /// °C
    pub sea_surface_temperature: f64,
}

impl EnvironmentalReading {
    pub fn new(chlorophyll: f64, sea_surface_temperature: f64) -> Self {
        Self {
            chlorophyll,
            sea_surface_temperature,
        }
    }
}

/// What a data source returns for one point: the reading used for scoring,
/// plus the source's own estimate when it has one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub reading: EnvironmentalReading,
    pub service_probability: Option<Probability>,
}

impl From<EnvironmentalReading> for Observation {
    fn from(reading: EnvironmentalReading) -> Self {
        Self {
            reading,
            service_probability: None,
        }
    }
}

/// Probability in `[0, 1]`. Integer percentages exist only for display.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// 超出 [0, 1] 或非有限值時回傳 None
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn from_percent(percent: u8) -> Self {
        Self(f64::from(percent.min(100)) / 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// None 代表資料取得失敗，不提供任何數值
    pub probability: Option<Probability>,
    pub message: String,
    pub nearest_zone_name: String,
    pub distance_km: f64,
    pub chlorophyll: Option<f64>,
    pub sea_surface_temperature: Option<f64>,
    /// 遠端服務自行估計的機率，只供顯示，不參與計分
    #[serde(default)]
    pub service_probability: Option<Probability>,
}

impl PredictionResult {
    pub fn is_success(&self) -> bool {
        self.probability.is_some()
    }

    pub fn percent(&self) -> Option<u8> {
        self.probability.map(|p| p.percent())
    }
}

/// A named point on the hotspot overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotProperties {
    pub name: String,
    pub species: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// GeoJSON 順序為 [longitude, latitude]
    Point { coordinates: [f64; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: HotspotProperties,
}

impl Feature {
    pub fn point(point: GeoPoint, name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            geometry: Geometry::Point {
                coordinates: [point.longitude(), point.latitude()],
            },
            properties: HotspotProperties {
                name: name.into(),
                species: species.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
