use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use csv_records::{RelationTable, marshal, record, relation, unmarshal};

record! {
    #[derive(Debug, Clone, Default)]
    struct Shipment {
        carrier: String [csv = "carrier", relation = "Carrier"],
        weight: f64 [csv = "weight", relation = "Weight"],
        pieces: u16 [csv = "pieces", relation = "Pieces"],
        fragile: bool [csv = "fragile"],
    }
}

record! {
    #[derive(Debug, Clone, Default)]
    struct Order {
        id: u64 [csv = "id", relation = "Id"],
        status: String [csv = "status", relation = "Status"],
        total: f64 [csv = "total"],
        shipment: Shipment [csv = "shipment", relation = "Shipment"],
    }
}

fn generate_orders(rows: usize) -> Vec<Order> {
    (0..rows)
        .map(|i| Order {
            id: i as u64,
            status: match i % 3 {
                0 => "shipped",
                1 => "pending",
                _ => "processing",
            }
            .to_string(),
            total: (i % 997) as f64 * 1.25,
            shipment: Shipment {
                carrier: format!("carrier-{}", i % 17),
                weight: (i % 50) as f64 / 4.0,
                pieces: (i % 9) as u16,
                fragile: i % 2 == 0,
            },
        })
        .collect()
}

fn relations() -> RelationTable {
    RelationTable::new()
        .with("Id", "order_id")
        .with("Status", "state")
        .with("Shipment Carrier", "carrier")
        .with("Shipment Weight", "kg")
}

fn bench_transcode(c: &mut Criterion) {
    let orders = generate_orders(20_000);
    let direct = marshal(&orders).expect("encode orders");
    let table = relations();
    let relational = relation::marshal(&orders, &table).expect("encode orders relationally");

    let mut group = c.benchmark_group("transcode");

    group.bench_function("direct_encode", |b| {
        b.iter(|| marshal(black_box(&orders)).expect("encode"));
    });

    group.bench_function("direct_decode", |b| {
        b.iter_batched(
            Vec::<Order>::new,
            |mut decoded| {
                unmarshal(black_box(&direct), &mut decoded).expect("decode");
                decoded
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("relational_encode", |b| {
        b.iter(|| relation::marshal(black_box(&orders), &table).expect("encode"));
    });

    group.bench_function("relational_decode", |b| {
        b.iter_batched(
            Vec::<Order>::new,
            |mut decoded| {
                relation::unmarshal(black_box(&relational), &mut decoded, &table)
                    .expect("decode");
                decoded
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_transcode);
criterion_main!(benches);
