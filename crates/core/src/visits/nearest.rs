//! Nearest-point search over raw latitude/longitude degrees.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Euclidean distance between two points, in degrees.
///
/// No geodesic correction is applied. Only meaningful for ranking nearby
/// points against each other.
pub fn planar_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = a.latitude - b.latitude;
    let d_lng = a.longitude - b.longitude;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}

/// Returns the candidate closest to `origin` together with its distance.
///
/// Candidates for which `location` yields `None` are skipped. Ties keep the
/// first candidate encountered. Returns `None` when no candidate has a
/// location.
pub fn find_nearest<T, I, F>(origin: GeoPoint, candidates: I, location: F) -> Option<(T, f64)>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<GeoPoint>,
{
    let mut nearest: Option<(T, f64)> = None;

    for candidate in candidates {
        let Some(point) = location(&candidate) else {
            continue;
        };
        let distance = planar_distance(origin, point);
        let closer = match &nearest {
            Some((_, best)) => distance < *best,
            None => true,
        };
        if closer {
            nearest = Some((candidate, distance));
        }
    }

    nearest
}
