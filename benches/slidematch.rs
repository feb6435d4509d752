use criterion::{criterion_group, criterion_main, Criterion};
use slidematch::{
    distance_matrix, distance_matrix_with, find_n_best, similarity_matrix, to_gray, Boundary,
    OwnedImage, Rgb,
};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> OwnedImage<Rgb> {
    OwnedImage::from_fn(width, height, |row, col| {
        let value = ((col * 13) ^ (row * 7) ^ (col * row)) & 0xFF;
        Rgb::from_channels(value as i64, (value ^ 0x5A) as i64, (255 - value) as i64)
    })
    .expect("non-empty benchmark image")
}

fn extract_patch(
    image: &OwnedImage<Rgb>,
    row: usize,
    col: usize,
    width: usize,
    height: usize,
) -> OwnedImage<Rgb> {
    image
        .view()
        .roi(row, col, width, height)
        .expect("patch inside image")
        .to_owned_image()
}

fn bench_surfaces(c: &mut Criterion) {
    let image = make_image(160, 120);
    let pattern = extract_patch(&image, 40, 60, 24, 18);

    c.bench_function("distance_valid", |b| {
        b.iter(|| distance_matrix(black_box(pattern.view()), image.view()).unwrap());
    });

    for boundary in [Boundary::Wrap, Boundary::Mirror] {
        let name = format!("distance_{boundary}");
        c.bench_function(&name, |b| {
            b.iter(|| distance_matrix_with(pattern.view(), image.view(), boundary).unwrap());
        });
    }

    let gray_image = to_gray(&image);
    let gray_pattern = to_gray(&pattern);
    c.bench_function("similarity_valid", |b| {
        b.iter(|| similarity_matrix(gray_pattern.view(), gray_image.view()).unwrap());
    });

    #[cfg(feature = "rayon")]
    {
        use slidematch::lowlevel::{score_surface_par, DistancePlan, MeanAbsErrorScalar};
        let plan = DistancePlan::from_view(pattern.view());
        c.bench_function("distance_valid_par", |b| {
            b.iter(|| score_surface_par::<MeanAbsErrorScalar, Rgb>(image.view(), &plan).unwrap());
        });
    }
}

fn bench_selection(c: &mut Criterion) {
    let surface = OwnedImage::from_fn(512, 512, |row, col| {
        (((col * 31) ^ (row * 17) ^ (col * row)) & 0x3FF) as f64
    })
    .expect("non-empty surface");

    c.bench_function("find_n_best_16", |b| {
        b.iter(|| find_n_best(black_box(16), surface.view(), true).unwrap());
    });
}

criterion_group!(benches, bench_surfaces, bench_selection);
criterion_main!(benches);
