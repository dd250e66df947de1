use bikeshare_weather::models::{Region, StationInfo, TripRecord, TripTable, WeatherObservation};
use bikeshare_weather::processors::{RegionResolver, TripEnricher, WeatherStore};
use bikeshare_weather::utils::coordinates::haversine_distance;
use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

// Stations spread over the city and a month of hourly weather per region
fn create_test_data(station_count: usize, days: usize) -> (HashMap<u32, StationInfo>, WeatherStore) {
    let mut stations = HashMap::with_capacity(station_count);
    for i in 0..station_count {
        let id = 7000 + i as u32;
        let lat = 43.60 + (i % 20) as f64 * 0.01;
        let lon = -79.65 + (i / 20 % 20) as f64 * 0.015;
        stations.insert(id, StationInfo::new(id, Some(lat), Some(lon)).with_capacity(20));
    }

    let base_date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let mut weather = WeatherStore::new();
    for region in Region::ALL {
        let mut observations = Vec::new();
        for day in 0..days {
            let date = base_date + chrono::Duration::days(day as i64);
            for hour in 0..24 {
                observations.push(WeatherObservation::new(
                    region,
                    Some(date),
                    Some(hour),
                    Some(15.0 + hour as f64 * 0.5),
                    Some(0.0),
                ));
            }
        }
        weather.insert_region(region, observations);
    }

    (stations, weather)
}

fn create_trips(count: usize, station_count: usize) -> TripTable {
    let base = NaiveDateTime::parse_from_str("07/01/2024 00:00", "%m/%d/%Y %H:%M").unwrap();
    let trips = (0..count)
        .map(|i| {
            let station_id = 7000 + (i % station_count) as u32;
            let start = base + chrono::Duration::minutes((i * 7) as i64 % (30 * 24 * 60));
            TripRecord::new(
                vec![i.to_string(), station_id.to_string()],
                Some(station_id),
                Some(start),
                Some(600),
            )
        })
        .collect();

    TripTable::new(
        vec!["Trip Id".to_string(), "Start Station Id".to_string()],
        trips,
    )
}

fn benchmark_haversine(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(43.6398),
                black_box(-79.3960),
                black_box(43.7800),
                black_box(-79.4678),
            )
        })
    });
}

fn benchmark_region_resolver(c: &mut Criterion) {
    let resolver = RegionResolver::new();

    c.bench_function("nearest_region", |b| {
        b.iter(|| resolver.resolve(black_box(Some(43.6650)), black_box(Some(-79.3836))))
    });
}

fn benchmark_weather_lookup(c: &mut Criterion) {
    let (_, weather) = create_test_data(1, 31);
    let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();

    c.bench_function("weather_lookup_hourly", |b| {
        b.iter(|| weather.lookup(black_box(Region::TorontoCity), black_box(date), black_box(17)))
    });
}

fn benchmark_enrichment(c: &mut Criterion) {
    let mut group = c.benchmark_group("trip_enrichment");
    let (stations, weather) = create_test_data(400, 30);

    for trip_count in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("trips", trip_count),
            &trip_count,
            |b, &trip_count| {
                b.iter_batched(
                    || create_trips(trip_count, 400),
                    |table| {
                        let enricher = TripEnricher::new(&stations, &weather);
                        black_box(enricher.enrich(table, None))
                    },
                    criterion::BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_haversine,
    benchmark_region_resolver,
    benchmark_weather_lookup,
    benchmark_enrichment
);
criterion_main!(benches);
