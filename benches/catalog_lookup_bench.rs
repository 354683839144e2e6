use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::path::Path;
use std::sync::Arc;

use structure_catalog::catalog_error::MeshDecodeError;
use structure_catalog::prelude::*;

/// Decoder that returns an empty mesh without I/O.
#[derive(Debug)]
struct NullDecoder;

impl MeshDecoder for NullDecoder {
    fn decode(&self, _path: &Path) -> Result<MeshAsset, MeshDecodeError> {
        Ok(MeshAsset::default())
    }
}

/// Flat ontology: one root with `n - 1` children, every structure with a mesh.
fn structures(n: u32) -> Vec<RawStructure> {
    let mut out = vec![RawStructure::new(1u32, "root", "root").with_id_path([1u32])];
    for id in 2..=n {
        out.push(
            RawStructure::new(id, format!("R{id}"), format!("Region {id}"))
                .with_id_path([1u32, id])
                .with_mesh(format!("{id}.obj")),
        );
    }
    out
}

fn bench_catalog_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_lookup");

    for &n in &[100u32, 1000u32] {
        let raws = structures(n);
        let catalog = StructureCatalog::build(&raws, Arc::new(NullDecoder))
            .expect("valid structures");
        let acronyms: Vec<String> = raws.iter().map(|r| r.acronym.clone()).collect();

        group.bench_with_input(BenchmarkId::new("by_id", n), &n, |b, _| {
            b.iter(|| {
                for raw in &raws {
                    black_box(catalog.lookup(raw.id).ok());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("by_acronym", n), &n, |b, _| {
            b.iter(|| {
                for acronym in &acronyms {
                    black_box(catalog.lookup(acronym.as_str()).ok());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("memoized_mesh", n), &n, |b, _| {
            b.iter(|| {
                for record in catalog.iter() {
                    black_box(record.get_mesh().ok());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, _| {
            b.iter(|| {
                let catalog = StructureCatalog::build(&raws, Arc::new(NullDecoder));
                black_box(catalog.map(|c| c.len()).ok());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_catalog_lookup);
criterion_main!(benches);
