use crate::domain::model::PredictionResult;
use crate::utils::error::Result;
use serde::Serialize;

/// 對外輸出格式：機率在此才轉為整數百分比
#[derive(Debug, Serialize)]
pub struct PredictionView<'a> {
    pub probability: Option<u8>,
    pub message: &'a str,
    /// 遠端服務自己的估計值，模擬資料來源時省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_probability: Option<u8>,
    pub data: PredictionData<'a>,
}

#[derive(Debug, Serialize)]
pub struct PredictionData<'a> {
    pub chlorophyll: Option<String>,
    pub sst: Option<String>,
    pub distance_to_zone: String,
    pub nearest_zone_name: &'a str,
}

impl<'a> From<&'a PredictionResult> for PredictionView<'a> {
    fn from(result: &'a PredictionResult) -> Self {
        Self {
            probability: result.percent(),
            message: &result.message,
            service_probability: result.service_probability.map(|p| p.percent()),
            data: PredictionData {
                chlorophyll: result.chlorophyll.map(|v| format!("{:.2}", v)),
                sst: result.sea_surface_temperature.map(|v| format!("{:.2}", v)),
                distance_to_zone: format!("{:.0}", result.distance_km),
                nearest_zone_name: &result.nearest_zone_name,
            },
        }
    }
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
