use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pcm_normalize::{config::NormalizerConfig, format::SampleFormat, gain::GainController, rolling_max::RollingMax, sink::BufferSink, normalizer::{Normalizer, SampleSink}};

fn bench_rolling_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("RollingMax");
    for n_p in [64usize, 4410, 44100].iter() {
        group.bench_with_input(BenchmarkId::new("add_remove_pair", n_p), n_p, |b, &n_p| {
            let mut deque = RollingMax::new(n_p);
            for i in 0..n_p {
                deque.add(black_box(i as i32)).unwrap();
            }
            let mut v = 0i32;
            b.iter(|| {
                deque.remove(black_box(v));
                v = (v + 1) % 32768;
                deque.add(black_box(v)).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_gain_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("GainController");
    group.bench_function("update", |b| {
        let mut ctl = GainController::new(30.0, 4410, 32767);
        let mut peak = 0i32;
        b.iter(|| {
            peak = (peak + 97) % 32768;
            black_box(ctl.update(black_box(peak)))
        });
    });
    group.finish();
}

fn bench_normalizer_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalizer");
    group.bench_function("push_16bit_stereo", |b| {
        let config =
            NormalizerConfig::new(SampleFormat::Pcm16Le, 2, 44100, 1.0, 30.0, false, true).unwrap();
        let (mut normalizer, _events) = Normalizer::new(config, BufferSink::new());
        let mut sample = 0i32;
        let mut channel = 0usize;
        b.iter(|| {
            sample = (sample + 37) % 32768;
            normalizer.push(channel, black_box(sample)).unwrap();
            channel = 1 - channel;
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rolling_max,
    bench_gain_update,
    bench_normalizer_throughput
);
criterion_main!(benches);
