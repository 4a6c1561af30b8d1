//! Codec benchmarks for structpack
//!
//! Measures pack/unpack throughput for flat records, length-marked
//! arrays, and nested records, in both byte orders.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use structpack::{
    pack, unpack, ByteOrder, ElemKind, FieldDecl, FieldMut, FieldRef, LayoutDecl, Struct,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Telemetry {
    flag: bool,
    delta: i16,
    seq: i32,
    stamp: i64,
    ratio: f32,
    total: f64,
}

impl Struct for Telemetry {
    fn layout(&self) -> LayoutDecl {
        LayoutDecl::new("BenchTelemetry")
            .constructed_by(|| Box::new(Telemetry::default()))
            .field(FieldDecl::scalar("flag", 0, ElemKind::Bool))
            .field(FieldDecl::scalar("delta", 1, ElemKind::I16))
            .field(FieldDecl::scalar("seq", 2, ElemKind::I32))
            .field(FieldDecl::scalar("stamp", 3, ElemKind::I64))
            .field(FieldDecl::scalar("ratio", 4, ElemKind::F32))
            .field(FieldDecl::scalar("total", 5, ElemKind::F64))
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "flag" => Some(FieldRef::Bool(self.flag)),
            "delta" => Some(FieldRef::I16(self.delta)),
            "seq" => Some(FieldRef::I32(self.seq)),
            "stamp" => Some(FieldRef::I64(self.stamp)),
            "ratio" => Some(FieldRef::F32(self.ratio)),
            "total" => Some(FieldRef::F64(self.total)),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "flag" => Some(FieldMut::Bool(&mut self.flag)),
            "delta" => Some(FieldMut::I16(&mut self.delta)),
            "seq" => Some(FieldMut::I32(&mut self.seq)),
            "stamp" => Some(FieldMut::I64(&mut self.stamp)),
            "ratio" => Some(FieldMut::F32(&mut self.ratio)),
            "total" => Some(FieldMut::F64(&mut self.total)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Samples {
    count: i32,
    values: Vec<f64>,
}

impl Struct for Samples {
    fn layout(&self) -> LayoutDecl {
        LayoutDecl::new("BenchSamples")
            .constructed_by(|| Box::new(Samples::default()))
            .field(FieldDecl::scalar("count", 0, ElemKind::I32))
            .field(FieldDecl::array("values", 1, ElemKind::F64).length_from("count"))
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "count" => Some(FieldRef::I32(self.count)),
            "values" => Some(FieldRef::F64s(&self.values)),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "count" => Some(FieldMut::I32(&mut self.count)),
            "values" => Some(FieldMut::F64s(&mut self.values)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Wrapper {
    inner: Telemetry,
    tail: i64,
}

impl Struct for Wrapper {
    fn layout(&self) -> LayoutDecl {
        LayoutDecl::new("BenchWrapper")
            .constructed_by(|| Box::new(Wrapper::default()))
            .field(FieldDecl::nested("inner", 0))
            .field(FieldDecl::scalar("tail", 1, ElemKind::I64))
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "inner" => Some(FieldRef::Struct(&self.inner)),
            "tail" => Some(FieldRef::I64(self.tail)),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "inner" => Some(FieldMut::Struct(&mut self.inner)),
            "tail" => Some(FieldMut::I64(&mut self.tail)),
            _ => None,
        }
    }
}

fn sample_telemetry() -> Telemetry {
    Telemetry {
        flag: true,
        delta: -512,
        seq: 0x0102_0304,
        stamp: -1_234_567_890,
        ratio: 0.5,
        total: 1024.25,
    }
}

fn bench_flat_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_record");
    let record = sample_telemetry();

    for order in [ByteOrder::Big, ByteOrder::Little] {
        group.bench_with_input(BenchmarkId::new("pack", format!("{order:?}")), &order, |b, &order| {
            b.iter(|| pack(black_box(&record), order).unwrap());
        });

        let bytes = pack(&record, order).unwrap();
        group.bench_with_input(
            BenchmarkId::new("unpack", format!("{order:?}")),
            &order,
            |b, &order| {
                b.iter(|| unpack::<Telemetry>(black_box(&bytes), order).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_marked_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("marked_array");

    for len in [16usize, 256, 4096] {
        let record = Samples {
            count: len as i32,
            values: (0..len).map(|i| i as f64 * 0.5).collect(),
        };

        group.bench_with_input(BenchmarkId::new("pack", len), &record, |b, record| {
            b.iter(|| pack(black_box(record), ByteOrder::Little).unwrap());
        });

        let bytes = pack(&record, ByteOrder::Little).unwrap();
        group.bench_with_input(BenchmarkId::new("unpack", len), &bytes, |b, bytes| {
            b.iter(|| unpack::<Samples>(black_box(bytes), ByteOrder::Little).unwrap());
        });
    }

    group.finish();
}

fn bench_nested_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_record");
    let record = Wrapper {
        inner: sample_telemetry(),
        tail: 42,
    };

    group.bench_function("pack", |b| {
        b.iter(|| pack(black_box(&record), ByteOrder::Big).unwrap());
    });

    let bytes = pack(&record, ByteOrder::Big).unwrap();
    group.bench_function("unpack", |b| {
        b.iter(|| unpack::<Wrapper>(black_box(&bytes), ByteOrder::Big).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_flat_record,
    bench_marked_array,
    bench_nested_record
);
criterion_main!(benches);
