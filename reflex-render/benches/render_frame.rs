use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use reflex_core::{Attempt, TrialPhase};
use reflex_render::SkiaRenderer;
use reflex_session::SessionView;

fn harness(phase: TrialPhase, attempts: usize) -> (SkiaRenderer, SessionView, Vec<u8>) {
    let width = 1280u32;
    let height = 720u32;
    let r = SkiaRenderer::new(width, height).unwrap();
    let attempts: Vec<Attempt> = (0..attempts as u64)
        .map(|i| Attempt::from_millis(180 + i * 7))
        .collect();
    let view = SessionView {
        phase,
        live_ms: None,
        last_reaction: attempts.last().copied(),
        best: attempts.first().copied(),
        average: None,
        attempts,
    };
    let fb = vec![0u8; (width * height * 4) as usize];
    (r, view, fb)
}

pub fn bench_frames(c: &mut Criterion) {
    let mut g = c.benchmark_group("render_frame");
    g.sample_size(40);

    for (name, phase, attempts) in [
        ("go_empty", TrialPhase::Go, 0),
        ("result_full_history", TrialPhase::Result, 40),
    ] {
        g.bench_function(name, |b| {
            b.iter_batched(
                || harness(phase, attempts),
                |(mut r, view, mut fb)| {
                    let stats = r.render_frame(&view, &mut fb);
                    black_box(stats.map(|s| s.total))
                },
                BatchSize::SmallInput,
            )
        });
    }

    g.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
