use crate::domain::model::EnvironmentalReading;

/// mg/m³, 高於此值視為高生產力海域
pub const CHLOROPHYLL_THRESHOLD: f64 = 5.0;
/// °C, 含端點
pub const SST_RANGE: (f64, f64) = (18.0, 28.0);
pub const GATE_POINTS: u32 = 35;

/// (最大距離 km, 加分)，依距離遞增排列
pub const PROXIMITY_TIERS: [(f64, u32); 3] = [(150.0, 40), (400.0, 25), (800.0, 10)];

pub fn chlorophyll_favorable(reading: &EnvironmentalReading) -> bool {
    reading.chlorophyll > CHLOROPHYLL_THRESHOLD
}

pub fn temperature_favorable(reading: &EnvironmentalReading) -> bool {
    (SST_RANGE.0..=SST_RANGE.1).contains(&reading.sea_surface_temperature)
}

/// Sum of two binary gates, always one of 0, 35 or 70.
pub fn conditions_score(reading: &EnvironmentalReading) -> u32 {
    let mut score = 0;
    if chlorophyll_favorable(reading) {
        score += GATE_POINTS;
    }
    if temperature_favorable(reading) {
        score += GATE_POINTS;
    }
    score
}

pub fn proximity_bonus(distance_km: f64) -> u32 {
    PROXIMITY_TIERS
        .iter()
        .find(|(max_km, _)| distance_km <= *max_km)
        .map(|&(_, bonus)| bonus)
        .unwrap_or(0)
}
