use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sitemapstream::{Frequency, GzipStrategy, Sitemap, Url, WriterConfig};
use tempfile::tempdir;

fn make_url(i: usize) -> Url {
    Url::new(format!("https://example.com/catalog/item/{}", i))
        .unwrap()
        .last_modified(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        .change_frequency(Frequency::Weekly)
        .priority(0.8)
        .unwrap()
}

fn benchmark_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    group.sample_size(10); // Reduce samples for large benchmarks

    for size in [1000, 10000, 100000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let dir = tempdir().unwrap();
                let mut sitemap = Sitemap::new(dir.path().join("sitemap.xml")).unwrap();
                for i in 0..size {
                    sitemap.add_url(make_url(i)).unwrap();
                }
                black_box(sitemap.write().unwrap().len());
            });
        });
    }

    group.finish();
}

fn benchmark_gzip(c: &mut Criterion) {
    let mut group = c.benchmark_group("gzip");
    group.sample_size(10);

    let size = 50000;
    for strategy in [GzipStrategy::Incremental, GzipStrategy::Spooled] {
        let name = format!("{:?}", strategy);
        group.bench_with_input(BenchmarkId::from_parameter(name), &strategy, |b, &strategy| {
            b.iter(|| {
                let dir = tempdir().unwrap();
                let config = WriterConfig::default()
                    .with_gzip(true)
                    .with_gzip_strategy(strategy);
                let mut sitemap = Sitemap::new(dir.path().join("sitemap.xml.gz"))
                    .unwrap()
                    .with_config(config)
                    .unwrap();
                for i in 0..size {
                    sitemap.add_url(make_url(i)).unwrap();
                }
                black_box(sitemap.write().unwrap().len());
            });
        });
    }

    group.finish();
}

fn benchmark_buffer_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_size");
    group.sample_size(10);

    for buffer in [1, 10, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(buffer), buffer, |b, &buffer| {
            b.iter(|| {
                let dir = tempdir().unwrap();
                let mut sitemap = Sitemap::new(dir.path().join("sitemap.xml")).unwrap();
                sitemap.set_buffer_size(buffer).unwrap();
                sitemap.set_max_records(5000).unwrap();
                for i in 0..20000 {
                    sitemap.add_url(make_url(i)).unwrap();
                }
                black_box(sitemap.write().unwrap().len());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_write,
    benchmark_gzip,
    benchmark_buffer_size
);
criterion_main!(benches);
