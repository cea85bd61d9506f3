use crate::core::geo::distance_km;
use crate::domain::model::{Feature, FeatureCollection, GeoPoint, Zone};
use crate::utils::error::{PredictError, Result};

/// Known aggregation zones: (name, species, latitude, longitude).
const DEFAULT_ZONES: [(&str, &str, f64, f64); 10] = [
    (
        "Great Barrier Reef, Australia",
        "Reef sharks, hammerheads, tiger sharks",
        -18.2871,
        147.6992,
    ),
    (
        "Bahamas (Shark Alley & Bimini)",
        "Caribbean reef, tiger, lemon sharks",
        25.0343,
        -77.3963,
    ),
    (
        "Cape Town / False Bay, South Africa",
        "Great white sharks",
        -34.3568,
        18.4740,
    ),
    (
        "Galápagos Islands, Ecuador",
        "Hammerhead, white-tip, reef sharks",
        -0.9538,
        -90.9656,
    ),
    (
        "Florida Keys, USA",
        "Nurse, blacktip, lemon sharks",
        24.5551,
        -81.7800,
    ),
    (
        "Coral Triangle (Indonesia/Philippines)",
        "Reef sharks, hammerheads",
        0.7893,
        127.3212,
    ),
    (
        "Ningaloo Reef, Northwest Australia",
        "Whale sharks, tiger sharks",
        -21.8405,
        114.1484,
    ),
    (
        "Mozambique Channel, Indian Ocean",
        "Tiger sharks, bull sharks",
        -16.5000,
        41.5000,
    ),
    (
        "Azores, North Atlantic Ocean",
        "Blue sharks, mako sharks",
        38.7121,
        -27.2269,
    ),
    (
        "South Australian Basin, Southern Ocean",
        "Great white sharks",
        -34.0000,
        138.0000,
    ),
];

#[derive(Debug, Clone, PartialEq)]
pub struct NearestZone<'a> {
    pub zone: &'a Zone,
    pub distance_km: f64,
}

/// Fixed, ordered, never-empty set of aggregation zones.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    pub fn new(zones: Vec<Zone>) -> Result<Self> {
        if zones.is_empty() {
            return Err(PredictError::RegistryEmpty);
        }
        tracing::debug!("Zone registry loaded with {} zones", zones.len());
        Ok(Self { zones })
    }

    pub fn default_zones() -> Self {
        let zones = DEFAULT_ZONES
            .iter()
            .map(|&(name, species, lat, lon)| Zone {
                name: name.to_string(),
                species: species.to_string(),
                coordinates: GeoPoint::new(lat, lon)
                    .unwrap_or_else(|e| panic!("built-in zone '{}' is invalid: {}", name, e)),
            })
            .collect();
        Self { zones }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// 線性掃描，距離相同時保留先登錄的區域
    pub fn nearest_zone(&self, point: GeoPoint) -> NearestZone<'_> {
        let first = &self.zones[0];
        let mut nearest = NearestZone {
            zone: first,
            distance_km: distance_km(point, first.coordinates),
        };

        for zone in &self.zones[1..] {
            let distance = distance_km(point, zone.coordinates);
            if distance < nearest.distance_km {
                nearest = NearestZone {
                    zone,
                    distance_km: distance,
                };
            }
        }

        nearest
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            features: self
                .zones
                .iter()
                .map(|zone| Feature::point(zone.coordinates, &zone.name, &zone.species))
                .collect(),
        }
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::default_zones()
    }
}

impl<'a> IntoIterator for &'a ZoneRegistry {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}
