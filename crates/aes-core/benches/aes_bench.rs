use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{encrypt, encrypt_block, expand_key, Key, Mode, Padding};

fn bench_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut group = c.benchmark_group("block");
    for key_len in [16usize, 32] {
        let mut key_bytes = vec![0u8; key_len];
        rng.fill_bytes(&mut key_bytes);
        let key = Key::new(&key_bytes).expect("valid key length");
        let round_keys = expand_key(&key);
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);

        group.bench_function(format!("expand_key_{}", key_len * 8), |b| {
            b.iter(|| expand_key(&key));
        });
        group.bench_function(format!("encrypt_block_{}", key_len * 8), |b| {
            b.iter(|| encrypt_block(&block, &round_keys));
        });
    }
    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
    let mut key = [0u8; 32];
    let mut iv = [0u8; 16];
    let mut data = vec![0u8; 4096];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    rng.fill_bytes(&mut data);

    let mut group = c.benchmark_group("modes");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for mode in [Mode::Ecb, Mode::Cbc] {
        group.bench_function(format!("{mode}_pkcs7_4k"), |b| {
            b.iter(|| encrypt(mode, Padding::Pkcs7, &key, Some(&iv), &data));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block, bench_modes);
criterion_main!(benches);
