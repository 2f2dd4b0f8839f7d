use chain_ringsig::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

const MESSAGE: &[u8] = b"Example of a message. This could be a transaction id";

fn common(rng: &mut ChaCha20Rng, size: usize) -> (Vec<Keypair>, Ring, RevocationKeypair) {
    let members: Vec<Keypair> = (0..size).map(|_| Keypair::generate(rng)).collect();
    let ring = Ring::new(members.iter().map(|kp| kp.public_key).collect()).unwrap();
    let authority = RevocationKeypair::generate(rng);
    (members, ring, authority)
}

fn sign_ring(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([0u8; 32]);
    let crs = Crs::default();
    let mut group = c.benchmark_group("Sign");

    for &ring_size in [2usize, 4, 8, 16, 32, 64, 128, 256].iter() {
        let (members, ring, authority) = common(&mut rng, ring_size);
        let signer = ring_size / 2;
        let parameter_string = format!("{} members", ring_size);
        group.bench_with_input(
            BenchmarkId::new("Sign with", parameter_string),
            &ring_size,
            |b, _| {
                b.iter(|| {
                    sign(
                        &mut rng,
                        &crs,
                        &ring,
                        signer,
                        &members[signer].secret_key,
                        &authority.public_key,
                        MESSAGE,
                        SignOptions::default(),
                    )
                })
            },
        );
    }

    group.finish();
}

fn verify_ring(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([0u8; 32]);
    let crs = Crs::default();
    let mut group = c.benchmark_group("Verify");

    for &ring_size in [2usize, 4, 8, 16, 32, 64, 128, 256].iter() {
        let (members, ring, authority) = common(&mut rng, ring_size);
        let signer = ring_size / 2;
        let signature = sign(
            &mut rng,
            &crs,
            &ring,
            signer,
            &members[signer].secret_key,
            &authority.public_key,
            MESSAGE,
            SignOptions::default(),
        )
        .unwrap();
        let parameter_string = format!("{} members", ring_size);
        group.bench_with_input(
            BenchmarkId::new("Verify with", parameter_string),
            &ring_size,
            |b, _| b.iter(|| verify(&crs, &ring, &authority.public_key, MESSAGE, &signature)),
        );
    }

    group.finish();
}

criterion_group!(
    name = ringsig;
    config = Criterion::default();
    targets =
    sign_ring,
    verify_ring,
);

criterion_main!(ringsig);
