use crate::models::Region;
use crate::utils::coordinates::{haversine_distance, is_valid_coordinate};

/// The region chosen for a point and how far away its station is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMatch {
    pub region: Region,
    pub distance_km: f64,
}

/// Picks the nearest weather region for a coordinate.
///
/// Candidates are scanned in order with a strict `<`, so on equal
/// distances the earliest candidate wins.
pub struct RegionResolver {
    candidates: Vec<Region>,
}

impl RegionResolver {
    pub fn new() -> Self {
        Self {
            candidates: Region::ALL.to_vec(),
        }
    }

    pub fn with_candidates(candidates: Vec<Region>) -> Self {
        Self { candidates }
    }

    /// `None` when either coordinate is missing or not a usable number
    pub fn resolve(&self, lat: Option<f64>, lon: Option<f64>) -> Option<RegionMatch> {
        let (lat, lon) = (lat?, lon?);
        if !is_valid_coordinate(lat, lon) {
            return None;
        }

        let mut best: Option<RegionMatch> = None;
        for &region in &self.candidates {
            let (r_lat, r_lon) = region.coordinates();
            let distance_km = haversine_distance(lat, lon, r_lat, r_lon);

            if best.map_or(true, |b| distance_km < b.distance_km) {
                best = Some(RegionMatch {
                    region,
                    distance_km,
                });
            }
        }

        best
    }

    pub fn nearest_region(&self, lat: Option<f64>, lon: Option<f64>) -> Option<Region> {
        self.resolve(lat, lon).map(|m| m.region)
    }
}

impl Default for RegionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest of the fixed regions
pub fn nearest_region(lat: f64, lon: f64) -> Option<Region> {
    RegionResolver::new().nearest_region(Some(lat), Some(lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_point_resolves_to_itself() {
        let resolver = RegionResolver::new();

        for region in Region::ALL {
            let (lat, lon) = region.coordinates();
            let found = resolver.resolve(Some(lat), Some(lon)).unwrap();

            assert_eq!(found.region, region);
            assert_eq!(found.distance_km, 0.0);
        }
    }

    #[test]
    fn test_downtown_station() {
        // Union Station area is closest to the island airport reference
        assert_eq!(
            nearest_region(43.6407, -79.3806),
            Some(Region::TorontoCityCentre)
        );
        // Finch / Yonge
        assert_eq!(
            nearest_region(43.7806, -79.4155),
            Some(Region::TorontoNorthYork)
        );
        // Etobicoke near the airport
        assert_eq!(nearest_region(43.6890, -79.5900), Some(Region::TorontoIntlA));
    }

    #[test]
    fn test_missing_coordinates() {
        let resolver = RegionResolver::new();

        assert_eq!(resolver.resolve(None, Some(-79.4)), None);
        assert_eq!(resolver.resolve(Some(43.6), None), None);
        assert_eq!(resolver.resolve(Some(f64::NAN), Some(-79.4)), None);
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        // Same region listed twice: both are at distance zero, the first wins
        let resolver =
            RegionResolver::with_candidates(vec![Region::TorontoIntlA, Region::TorontoIntlA]);
        let (lat, lon) = Region::TorontoIntlA.coordinates();
        assert_eq!(resolver.nearest_region(Some(lat), Some(lon)), Some(Region::TorontoIntlA));
    }

    #[test]
    fn test_candidate_subset() {
        // Downtown falls back to the city station once the island is excluded
        let resolver = RegionResolver::with_candidates(vec![
            Region::TorontoCity,
            Region::TorontoIntlA,
            Region::TorontoNorthYork,
        ]);
        assert_eq!(
            resolver.nearest_region(Some(43.6407), Some(-79.3806)),
            Some(Region::TorontoCity)
        );
    }

    #[test]
    fn test_empty_candidates() {
        let resolver = RegionResolver::with_candidates(vec![]);
        assert_eq!(resolver.resolve(Some(43.65), Some(-79.40)), None);
    }
}
