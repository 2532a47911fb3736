use arrivals_processor::config::ParserConfig;
use arrivals_processor::parser::{DatasetParser, RawTable};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Three-level table: regions with countries and cities, ten years of months
fn synthetic_table() -> RawTable {
    let mut headers = vec!["Data Series".to_string()];
    for year in 2015..2025 {
        for month in MONTHS {
            headers.push(format!("{}{}", year, month));
        }
    }
    let width = headers.len();

    let mut rows = Vec::new();
    for region in 0..10 {
        for country in 0..10 {
            for city in 0..5 {
                let label = match (country, city) {
                    (0, 0) => format!("Region {}", region),
                    (_, 0) => format!("    Country {}", country),
                    _ => format!("        City {}", city),
                };
                let mut row = vec![label];
                for column in 1..width {
                    row.push(if column % 17 == 0 {
                        "N/A".to_string()
                    } else {
                        format!("{},{:03}", column, region * 7 + city)
                    });
                }
                rows.push(row);
            }
        }
    }

    RawTable::new(headers, rows)
}

fn bench_parse(c: &mut Criterion) {
    let table = synthetic_table();
    let parser = DatasetParser::new(&ParserConfig::default()).unwrap();

    c.bench_function("parse_wide_table", |b| {
        b.iter(|| parser.parse(black_box(&table)))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
