use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{TimeDelta, TimeZone, Utc};
use stockwise_core::{MovementId, ProductId};
use stockwise_inventory::{MovementLog, MovementType, StatusClassifier, StockMovement};
use stockwise_products::Product;
use stockwise_reporting::{DashboardSummary, aggregate_monthly, category_buckets, group_movements};

fn movement_log(count: usize) -> Vec<StockMovement> {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let kind = if i % 3 == 0 { MovementType::Out } else { MovementType::In };
            StockMovement::new(
                MovementId::new(format!("m{i}")).unwrap(),
                ProductId::new(format!("p{}", i % 50)).unwrap(),
                kind,
                (i % 17 + 1) as i64,
                start + TimeDelta::hours(i as i64 * 7),
            )
        })
        .collect()
}

fn catalog(count: usize) -> Vec<Product> {
    let categories = ["Tools", "Paint", "Garden", "Electrical"];
    (0..count)
        .map(|i| {
            let p = Product::new(ProductId::new(format!("p{i}")).unwrap(), format!("Item {i}"), format!("SKU-{i}"))
                .with_quantity((i % 40) as i64)
                .with_threshold(10)
                .with_prices(1.5, 2.75);
            if i % 5 == 0 { p } else { p.with_category(categories[i % categories.len()]) }
        })
        .collect()
}

fn bench_monthly_pivot(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly_pivot");

    for count in [100usize, 1_000, 10_000, 100_000].iter() {
        let log = movement_log(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("group_then_pivot", count), &log, |b, log| {
            b.iter(|| black_box(aggregate_monthly(&group_movements(log))));
        });
    }

    group.finish();
}

fn bench_category_rollup(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_rollup");

    for count in [100usize, 1_000, 10_000].iter() {
        let products = catalog(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("category_buckets", count), &products, |b, products| {
            b.iter(|| black_box(category_buckets(products)));
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let products = catalog(5_000);
    let movements = movement_log(20_000);
    let groups = group_movements(&movements);
    let log: MovementLog = movements.into_iter().collect();
    let classifier = StatusClassifier::default();
    let now = Utc::now();

    c.bench_function("dashboard_summary_5k_products", |b| {
        b.iter(|| black_box(DashboardSummary::build(&products, &groups, &log, &classifier, now)));
    });
}

criterion_group!(benches, bench_monthly_pivot, bench_category_rollup, bench_dashboard);
criterion_main!(benches);
