use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mathmotion_lessons_core::{LessonKind, ProblemData, Stage};
use mathmotion_timeline_core::Config;

fn loaded_stage() -> Stage {
    let mut stage = Stage::new(Config::default()).unwrap();
    for kind in LessonKind::ALL {
        let id = stage.mount(kind.name(), &ProblemData::default()).unwrap();
        stage.set_show_solution(id, true).unwrap();
    }
    stage
}

fn bench_stage(c: &mut Criterion) {
    c.bench_function("stage_full_run_all_lessons", |b| {
        b.iter(|| {
            let mut stage = loaded_stage();
            let mut events = 0;
            for _ in 0..600 {
                events += stage.update(black_box(16.7)).events.len();
            }
            black_box(events)
        })
    });

    let stage = loaded_stage();
    let ids = stage.lesson_ids();
    c.bench_function("stage_view_all_lessons", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(stage.view(*id).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_stage);
criterion_main!(benches);
