use crate::models::{StationInfo, StationSnapshot, StationStatus};
use crate::processors::RegionResolver;
use std::collections::HashMap;

/// Join station information with live status and nearest region, sorted by station id
pub fn build_station_snapshots(
    stations: &[StationInfo],
    statuses: &HashMap<u32, StationStatus>,
    resolver: &RegionResolver,
) -> Vec<StationSnapshot> {
    let mut snapshots: Vec<StationSnapshot> = stations
        .iter()
        .map(|info| {
            let region = resolver
                .resolve(info.lat, info.lon)
                .map(|m| (m.region, m.distance_km));
            StationSnapshot::new(info, statuses.get(&info.station_id), region)
        })
        .collect();

    snapshots.sort_by_key(|s| s.station_id);
    snapshots
}
