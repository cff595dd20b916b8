use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zipquote_core::{
    lookup_by_city_state, lookup_by_zip, normalize_state, normalize_zip, PricingRow,
    PricingTable, TableBuilder,
};
use zipquote_sheet::{Book, Sheet};

const PRICES: [u32; 6] = [175, 200, 225, 250, 325, 525];
const STATES: [&str; 4] = ["MA", "New Jersey", "N.Y.", "ct"];

fn synthetic_rows(size: usize) -> Vec<PricingRow> {
    (0..size)
        .map(|i| PricingRow {
            zip: format!("{:05}", i * 7 % 100_000),
            city: format!("CITY {}", i % 97),
            state: normalize_state(STATES[i % STATES.len()]),
            quote: PRICES[i % PRICES.len()],
        })
        .collect()
}

fn synthetic_book(rows_per_sheet: usize) -> Book {
    let mut book = Book::new();
    for price in PRICES {
        let mut data = vec![vec!["zipcode".to_string(), "city".to_string(), "state".to_string()]];
        for i in 0..rows_per_sheet {
            data.push(vec![
                format!("{}.0", (i * 13 + price as usize) % 100_000),
                format!("City {}", i % 97),
                STATES[i % STATES.len()].to_string(),
            ]);
        }
        book.add_sheet(&format!("{price} dollars"), Sheet::from_data(data))
            .unwrap();
    }
    book
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.bench_function("zip_plus_four", |b| {
        b.iter(|| normalize_zip(black_box("20855-1234")))
    });
    group.bench_function("zip_float", |b| b.iter(|| normalize_zip(black_box("1002.0"))));
    group.bench_function("state_name", |b| {
        b.iter(|| normalize_state(black_box("New Jersey")))
    });
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let builder = TableBuilder::default();

    for size in [100, 1_000, 5_000].iter() {
        let book = synthetic_book(*size);
        group.bench_with_input(BenchmarkId::new("from_book", size), size, |b, _| {
            b.iter(|| builder.build_from_book(black_box(&book)).unwrap())
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in [1_000, 10_000].iter() {
        let table = PricingTable::from_rows(synthetic_rows(*size));

        group.bench_with_input(BenchmarkId::new("zip", size), size, |b, _| {
            b.iter(|| lookup_by_zip(black_box(&table), black_box("00700")))
        });
        group.bench_with_input(BenchmarkId::new("city_state", size), size, |b, _| {
            b.iter(|| lookup_by_city_state(black_box(&table), "City 12", "MA"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_build, bench_lookup);
criterion_main!(benches);
