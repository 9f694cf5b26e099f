use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use plat_viewer::algebra::dga_context;
use plat_viewer::config::LayoutConfig;
use plat_viewer::diagram::{Chord, Dga, Knot, LineSegment, PlatDiagram};
use plat_viewer::layout::compute_geometry;
use plat_viewer::params::{QueryParams, resolve};
use plat_viewer::presets::{DEFAULT_PRESET_KEY, PresetTable};
use plat_viewer::theme::Theme;
use plat_viewer::{Config, PlatViewer, ReplayLibrary};
use std::hint::black_box;

/// A plat with `n_strands` horizontal strands and one crossing per column.
fn synthetic_plat(n_strands: usize, columns: usize) -> PlatDiagram {
    let mut line_segments = Vec::new();
    let mut chords = Vec::new();
    for col in 0..columns {
        let crossing = col % (n_strands - 1);
        for strand in 0..n_strands {
            let y0 = strand as f64;
            let y1 = if strand == crossing {
                y0 + 1.0
            } else if strand == crossing + 1 {
                y0 - 1.0
            } else {
                y0
            };
            let chord_label = (strand == crossing).then(|| format!("a_{col}"));
            line_segments.push(LineSegment {
                start: (col as f64, y0),
                end: (col as f64 + 1.0, y1),
                knot_label: strand % 3,
                orientation: if strand % 2 == 0 { "r" } else { "l" }.to_string(),
                chord_label,
                one_handle: false,
                handle_index: None,
            });
        }
        chords.push(Chord {
            label: format!("a_{col}"),
            bottom_knot: 0,
            top_knot: 1,
        });
    }
    PlatDiagram {
        n_strands,
        max_x_right: columns,
        front_crossings: (0..columns).map(|col| (col % (n_strands - 1)) as i64).collect(),
        knots: vec![Knot::default(); 3],
        line_segments,
        chords,
        linking_matrix: vec![vec![0; 3]; 3],
        link_is_connected: false,
        num_strands_per_handle: vec![2, 2],
        lch: None,
        rsft: None,
    }
}

fn synthetic_dga(generators: usize, augmentations: usize) -> Dga {
    let symbols: Vec<String> = (0..generators).rev().map(|idx| format!("q_{idx}")).collect();
    Dga {
        grading_mod: 0,
        coeff_mod: 2,
        gradings: symbols
            .iter()
            .enumerate()
            .map(|(idx, symbol)| (symbol.clone(), (idx % 3) as i64 - 1))
            .collect(),
        differentials: symbols
            .iter()
            .map(|symbol| (symbol.clone(), format!("1 + {symbol}*{symbol}")))
            .collect(),
        augmentations: Some(
            (0..augmentations)
                .map(|aug| {
                    symbols
                        .iter()
                        .enumerate()
                        .map(|(idx, symbol)| (symbol.clone(), ((idx + aug) % 2) as i64))
                        .collect()
                })
                .collect(),
        ),
        symbols,
        ..Dga::default()
    }
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let presets = PresetTable::bundled().expect("bundled presets");
    for (name, query) in [
        ("minimal", "n_strands=4"),
        (
            "full",
            "n_strands=12&crossings=1,3,5,7,9,2,4,6,8,10&mirror=true&orientation_flips=true,false\
             &n_copy=2&auto_dgas=lch,rsft&aug_fill_na=1&num_one_handle=2&num_strands_per_handle=2,4",
        ),
    ] {
        let params = QueryParams::parse(query);
        group.bench_with_input(BenchmarkId::from_parameter(name), &params, |b, params| {
            b.iter(|| resolve(Some(black_box(params)), &presets, DEFAULT_PRESET_KEY));
        });
    }
    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    for (n_strands, columns) in [(4, 10), (12, 100), (40, 1000)] {
        let plat = synthetic_plat(n_strands, columns);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_strands}x{columns}")),
            &plat,
            |b, plat| {
                b.iter(|| {
                    let geometry = compute_geometry(black_box(plat), &theme, &config);
                    black_box(geometry.map(|geometry| geometry.lines.len()).unwrap_or(0));
                });
            },
        );
    }
    group.finish();
}

fn bench_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");
    for (generators, augmentations) in [(10, 4), (100, 64), (400, 256)] {
        let dga = synthetic_dga(generators, augmentations);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{generators}g_{augmentations}a")),
            &dga,
            |b, dga| {
                b.iter(|| black_box(dga_context(black_box(dga), "LCH", false)));
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let dump = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/trefoil.json"
    ));
    let library = ReplayLibrary::from_json(dump).expect("fixture parse failed");
    let viewer = PlatViewer::new(
        Config::default(),
        PresetTable::bundled().expect("bundled presets"),
        library,
    );
    for (name, query) in [
        ("plain", "n_strands=4&crossings=1,1,1"),
        ("eager", "n_strands=4&crossings=1,1,1&auto_dgas=lch,rsft"),
        ("signs", "n_strands=4&crossings=1,1,1&lch_signs=true"),
    ] {
        let params = QueryParams::parse(query);
        group.bench_with_input(BenchmarkId::from_parameter(name), &params, |b, params| {
            b.iter(|| {
                let context = viewer.render(Some(black_box(params)));
                black_box(context.map(|context| context.dgas.len()).unwrap_or(0));
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_resolve, bench_geometry, bench_algebra, bench_end_to_end
);
criterion_main!(benches);
