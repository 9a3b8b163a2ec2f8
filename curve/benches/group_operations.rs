use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{Affine, Group, RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_scalar(rng: &mut StdRng) -> ScalarField {
    ScalarField::random(rng)
}

fn bench_affine_double(c: &mut Criterion) {
    let g = Affine::generator();
    c.bench_function("affine_double", |bencher| {
        bencher.iter(|| black_box(black_box(g).double()))
    });
}

fn bench_affine_add(c: &mut Criterion) {
    let g = Affine::generator();
    let h = g.mul_u64(7);
    c.bench_function("affine_add", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h)))
    });
}

fn bench_affine_scalar_mul(c: &mut Criterion) {
    let g = Affine::generator();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("affine_scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(g).scalar_mul(black_box(&scalar))))
    });
}

fn bench_x_only_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let point = Affine::generator().scalar_mul(&random_scalar(&mut rng));
    let encoded = point.to_x_only();

    c.bench_function("affine_from_x_only", |bencher| {
        bencher.iter(|| black_box(Affine::from_x_only(black_box(&encoded))))
    });
}

criterion_group!(
    benches,
    bench_affine_double,
    bench_affine_add,
    bench_affine_scalar_mul,
    bench_x_only_decode
);
criterion_main!(benches);
