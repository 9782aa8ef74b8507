use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rkorf::cubie::CubieCube;
use rkorf::moves::MOVE_TABLE;
use rkorf::pdb::{corner_rank, EDGE6_A, EDGE6_B};
use rkorf::ranker::{lehmer_rank, lehmer_unrank};
use rkorf::{constants::ALL_MOVES, scramble_with_seed};

fn apply_all_moves() {
    let mut state = CubieCube::default();
    for m in ALL_MOVES {
        MOVE_TABLE.generator(m).apply_in_place(&mut state);
    }
    black_box(state);
}

fn rank_scrambled_state() {
    let state = CubieCube::default().apply_moves(&scramble_with_seed(25, Some(3)));
    black_box(corner_rank(&state));
    black_box(EDGE6_A.rank(&state));
    black_box(EDGE6_B.rank(&state));
}

fn lehmer_roundtrip() {
    let mut out = [0u8; 8];
    for rank in (0..40320).step_by(63) {
        lehmer_unrank(rank, &mut out);
        black_box(lehmer_rank(&out));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("Move application", |b| b.iter(apply_all_moves));
    c.bench_function("PDB ranking", |b| b.iter(rank_scrambled_state));
    c.bench_function("Lehmer roundtrip", |b| b.iter(lehmer_roundtrip));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
