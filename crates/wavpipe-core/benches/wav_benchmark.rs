use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Cursor;
use wavpipe_core::{build_header, StreamingWavWriter, WavWriter};

fn bench_header(c: &mut Criterion) {
    c.bench_function("build_header", |b| {
        b.iter(|| build_header(black_box(44_100), black_box(65_535)));
    });
}

fn bench_write_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_samples");

    // Test different audio lengths
    let audio_lengths = vec![
        ("1sec", 22_050),   // 1 second at 22.05kHz
        ("5sec", 110_250),  // 5 seconds
        ("10sec", 220_500), // 10 seconds
    ];

    for (name, length) in audio_lengths {
        let samples: Vec<i16> = (0..length)
            .map(|i| ((i as f32 * 0.01).sin() * 16_000.0) as i16)
            .collect();

        group.bench_with_input(BenchmarkId::new("single_shot", name), &samples, |b, samples| {
            b.iter(|| {
                let mut writer = WavWriter::new(Vec::with_capacity(44 + samples.len() * 2), 22_050);
                black_box(writer.write_samples(black_box(samples)).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("streaming", name), &samples, |b, samples| {
            b.iter(|| {
                let mut writer = StreamingWavWriter::new(Cursor::new(Vec::new()), 22_050).unwrap();
                for chunk in samples.chunks(2_205) {
                    writer.append_samples(black_box(chunk)).unwrap();
                }
                black_box(writer.finalize().unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_header, bench_write_samples);
criterion_main!(benches);
