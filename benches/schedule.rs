use chrono::NaiveDateTime;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use millicron::Schedule;

const EXPRESSIONS: &[&str] = &[
    "*:*:*",
    "*:00:00",
    "*.*.01 01:30:00",
    "*.*.32 12:00:00",
    "*.9.*/2 1-5 10:00:00.000",
    "*.*.* * *:*:*.1,2,3-5,10-20/3",
    "2100.12.31 23:59:59.999",
];

const NOW: &[&str] = &["2000-01-01 00:00:00.000", "2020-06-15 12:30:45.500", "2100-12-31 23:59:59.998"];

fn now(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f").unwrap()
}

pub fn new_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("new");
    for expression in EXPRESSIONS {
        group.bench_with_input(BenchmarkId::from_parameter(expression), expression, |b, e| {
            b.iter(|| Schedule::new(*e).unwrap())
        });
    }
    group.finish();
}

pub fn next_event_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_event");
    for expression in EXPRESSIONS {
        for now_str in NOW {
            let now = now(now_str);
            let schedule = Schedule::new(*expression).unwrap();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{now_str}/{expression}")),
                &(now, &schedule),
                |b, (now, schedule)| b.iter(|| schedule.next_event(now)),
            );
        }
    }
    group.finish();
}

pub fn prev_event_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("prev_event");
    for expression in EXPRESSIONS {
        for now_str in NOW {
            let now = now(now_str);
            let schedule = Schedule::new(*expression).unwrap();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{now_str}/{expression}")),
                &(now, &schedule),
                |b, (now, schedule)| b.iter(|| schedule.prev_event(now)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, new_benchmark, next_event_benchmark, prev_event_benchmark);
criterion_main!(benches);
