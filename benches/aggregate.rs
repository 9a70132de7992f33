use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;
use weather_enrich::{
    aggregate, aggregate_all, BatchRunner, Credentials, FetchError, InputRecord, Observation,
    ObservationFetcher, ObservationSeries, RecordEnricher, TrackedParameter, Units, WeatherQuery,
};

/// An hourly week of readings with a gap every fifth hour.
fn hourly_week() -> ObservationSeries {
    let observations = (0..168)
        .map(|i| {
            let reading = (i % 5 != 0).then_some(20.0 + (i % 24) as f64 * 0.5);
            Observation {
                dew_point: reading.map(|t| t - 3.0),
                precip_total: reading.map(|_| 0.1),
                pressure: reading.map(|_| 1012.0),
                temp: reading,
                wspd: reading.map(|t| t / 2.0),
            }
        })
        .collect();
    ObservationSeries::new(observations)
}

struct StaticFetcher(ObservationSeries);

impl ObservationFetcher for StaticFetcher {
    async fn fetch(&self, _query: &WeatherQuery) -> Result<ObservationSeries, FetchError> {
        Ok(self.0.clone())
    }
}

fn bench_aggregate(c: &mut Criterion) {
    let series = hourly_week();
    c.bench_function("aggregate_temperature", |b| {
        b.iter(|| aggregate(black_box(&series), TrackedParameter::Temperature))
    });
    c.bench_function("stats_table", |b| {
        b.iter(|| aggregate_all(black_box(&series)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let runner = BatchRunner::builder()
        .enricher(
            RecordEnricher::builder()
                .fetcher(StaticFetcher(hourly_week()))
                .credentials(Credentials::new("KEY", Units::Metric))
                .build(),
        )
        .build();
    let records: Vec<InputRecord> = (0..500)
        .map(|i| InputRecord::new("01/05/2016", format!("loc-{i}"), "-8.05", "-34.9"))
        .collect();

    let rt = Runtime::new().unwrap();
    c.bench_function("batch_500_records", |b| {
        b.to_async(&rt).iter(|| runner.run(black_box(&records)))
    });
}

criterion_group!(benches, bench_aggregate, bench_batch);
criterion_main!(benches);
