use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::reference::{default_adjustments, RefAdjust};
use crate::route::{empty_routes, Route, ROUTE_COUNT};
use crate::settings::Settings;

pub const STORE_KEY: &str = "dmv_routes_v1";

/// Everything kept between visits. Paths are stored normalized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub routes: [Route; ROUTE_COUNT],
    #[serde(flatten)]
    pub settings: Settings,
    pub ref_adjust: [RefAdjust; ROUTE_COUNT],
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            routes: empty_routes(),
            settings: Settings::default(),
            ref_adjust: default_adjustments(),
        }
    }
}

/// Fields that were present in a stored blob but did not pass validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rejected: Vec<&'static str>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    Corrupt(String),
    NotAnObject,
    Encode(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Corrupt(err) => write!(f, "stored state is not valid json: {err}"),
            PersistError::NotAnObject => f.write_str("stored state is not a json object"),
            PersistError::Encode(err) => write!(f, "failed to encode state: {err}"),
        }
    }
}

impl std::error::Error for PersistError {}

pub fn to_json(state: &PersistedState) -> Result<String, PersistError> {
    serde_json::to_string(state).map_err(|err| PersistError::Encode(err.to_string()))
}

/// Loads a stored blob field by field. A field that is missing keeps its
/// default; a field that is present but malformed also keeps its default and
/// is named in the report. Only unreadable JSON fails as a whole.
pub fn from_json(raw: &str) -> Result<(PersistedState, LoadReport), PersistError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| PersistError::Corrupt(err.to_string()))?;
    let Value::Object(obj) = value else {
        return Err(PersistError::NotAnObject);
    };

    let mut report = LoadReport::default();
    let mut state = PersistedState::default();

    if let Some(routes) = field::<Vec<Route>>(&obj, "routes", &mut report) {
        match <[Route; ROUTE_COUNT]>::try_from(routes) {
            Ok(routes) if routes.iter().all(routes_are_finite) => state.routes = routes,
            _ => report.rejected.push("routes"),
        }
    }

    let settings = &mut state.settings;
    if let Some(stroke) = field::<f64>(&obj, "stroke", &mut report) {
        settings.set_stroke(stroke);
    }
    if let Some(tolerance) = field::<f64>(&obj, "tolerance", &mut report) {
        settings.set_tolerance(tolerance);
    }
    if let Some(map_scale) = field::<f64>(&obj, "mapScale", &mut report) {
        settings.set_map_scale(map_scale);
    }
    let flags: [(&'static str, &mut bool); 6] = [
        ("clickToDraw", &mut settings.click_to_draw),
        ("smoothPath", &mut settings.smooth_path),
        ("showIdealInTest", &mut settings.show_ideal_in_test),
        ("showRef", &mut settings.show_ref),
        ("refAdjustMode", &mut settings.ref_adjust_mode),
        ("showRefSide", &mut settings.show_ref_side),
    ];
    for (key, slot) in flags {
        if let Some(flag) = field::<bool>(&obj, key, &mut report) {
            *slot = flag;
        }
    }

    if let Some(adjust) = field::<Vec<RefAdjust>>(&obj, "refAdjust", &mut report) {
        match <[RefAdjust; ROUTE_COUNT]>::try_from(adjust) {
            Ok(adjust) if adjust.iter().all(RefAdjust::is_valid) => state.ref_adjust = adjust,
            _ => report.rejected.push("refAdjust"),
        }
    }

    Ok((state, report))
}

fn field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &'static str,
    report: &mut LoadReport,
) -> Option<T> {
    let value = obj.get(key)?;
    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            report.rejected.push(key);
            None
        }
    }
}

fn routes_are_finite(route: &Route) -> bool {
    route.ideal.iter().chain(route.attempt.iter()).all(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn round_trips_through_json() {
        let mut state = PersistedState::default();
        state.routes[1].ideal = vec![Point::new(0.1, 0.2), Point::new(0.3, 0.4)];
        state.settings.tolerance = 9.0;
        state.settings.click_to_draw = false;
        state.ref_adjust[2].rotate = 15.0;
        let raw = to_json(&state).unwrap();
        let (loaded, report) = from_json(&raw).unwrap();
        assert!(report.is_clean());
        assert_eq!(loaded, state);
    }

    #[test]
    fn uses_camel_case_keys() {
        let raw = to_json(&PersistedState::default()).unwrap();
        for key in ["\"clickToDraw\"", "\"showIdealInTest\"", "\"refAdjust\"", "\"mapScale\""] {
            assert!(raw.contains(key), "missing {key} in {raw}");
        }
    }

    #[test]
    fn malformed_fields_fall_back_independently() {
        let raw = r#"{
            "stroke": "thick",
            "tolerance": 12,
            "clickToDraw": 1,
            "smoothPath": false,
            "refAdjust": [{"x": 0, "y": 0, "scale": 1, "rotate": 0, "opacity": 0.5}],
            "routes": [
                {"ideal": [{"x": 0.1, "y": 0.1}, {"x": 0.5, "y": 0.5}], "attempt": []},
                {"ideal": [], "attempt": []},
                {"ideal": [], "attempt": []}
            ]
        }"#;
        let (state, report) = from_json(raw).unwrap();
        assert_eq!(report.rejected, vec!["stroke", "clickToDraw", "refAdjust"]);
        assert_eq!(state.settings.stroke, Settings::default().stroke);
        assert_eq!(state.settings.tolerance, 12.0);
        assert!(state.settings.click_to_draw);
        assert!(!state.settings.smooth_path);
        assert_eq!(state.ref_adjust, default_adjustments());
        assert_eq!(state.routes[0].ideal.len(), 2);
    }

    #[test]
    fn wrong_route_count_is_rejected() {
        let raw = r#"{"routes": [{"ideal": [], "attempt": []}]}"#;
        let (state, report) = from_json(raw).unwrap();
        assert_eq!(report.rejected, vec!["routes"]);
        assert_eq!(state.routes, empty_routes());
    }

    #[test]
    fn out_of_range_numbers_are_clamped() {
        let (state, report) = from_json(r#"{"tolerance": 250, "mapScale": 1}"#).unwrap();
        assert!(report.is_clean());
        assert_eq!(state.settings.tolerance, 100.0);
        assert_eq!(state.settings.map_scale, crate::settings::MAP_SCALE_PERCENT_MIN);
    }

    #[test]
    fn corrupt_blob_is_an_error() {
        assert!(matches!(from_json("{not json"), Err(PersistError::Corrupt(_))));
        assert_eq!(from_json("[1, 2]").unwrap_err(), PersistError::NotAnObject);
    }
}
