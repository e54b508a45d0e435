use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mathmotion_lessons_core::{LessonId, LessonKind, ProblemData, Rendered, Stage, StageError};
use mathmotion_timeline_core::{
    AnimationPlayer, Config, PlayerOptions, SoundCue, SoundEffects, TimelineEvent,
};

#[derive(Clone, Default)]
struct RecordingSound(Rc<RefCell<Vec<SoundCue>>>);

impl SoundEffects for RecordingSound {
    fn play_pop(&mut self) {
        self.0.borrow_mut().push(SoundCue::Pop);
    }
    fn play_whoosh(&mut self) {
        self.0.borrow_mut().push(SoundCue::Whoosh);
    }
    fn play_success(&mut self) {
        self.0.borrow_mut().push(SoundCue::Success);
    }
}

/// 10 ms ticks, 2 ticks per phase.
fn fast() -> Config {
    Config {
        tick_interval_ms: 10,
        ticks_per_phase: 2,
        ..Config::default()
    }
}

fn counter(stage: &mut Stage, id: LessonId) -> Rc<Cell<u32>> {
    let done = Rc::new(Cell::new(0u32));
    let cb = Rc::clone(&done);
    stage
        .on_complete(id, move || cb.set(cb.get() + 1))
        .unwrap();
    done
}

fn entered(stage: &mut Stage, id: LessonId, dt: f64) -> Vec<String> {
    stage
        .update(dt)
        .for_lesson(id)
        .filter_map(|e| match e {
            TimelineEvent::PhaseEntered { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

/// it should show 95, 96, 97, reveal 98, and complete exactly once
#[test]
fn sequence_run_end_to_end() {
    let mut stage = Stage::new(fast()).unwrap();
    let sound = RecordingSound::default();
    stage.set_sound(sound.clone());
    let id = stage
        .mount("sequence", &ProblemData::from_operands(&[95.0, 3.0]))
        .unwrap();
    let done = counter(&mut stage, id);

    stage.set_show_solution(id, true).unwrap();
    stage.update(0.0);
    assert_eq!(stage.phase(id).unwrap(), "setup");

    // two ticks per phase
    stage.update(20.0);
    assert_eq!(stage.phase(id).unwrap(), "terms");
    let view = stage.view(id).unwrap();
    let v = view.lesson_view().unwrap();
    assert_eq!(v.labels["sequence"], "95, 96, 97");
    assert!(!v.labels.contains_key("answer"));

    stage.update(10_000.0);
    assert!(stage.is_complete(id).unwrap());
    assert!(!stage.is_running(id).unwrap());
    let view = stage.view(id).unwrap();
    assert_eq!(view.lesson_view().unwrap().labels["answer"], "98");
    assert_eq!(done.get(), 1);

    stage.update(10_000.0);
    assert_eq!(done.get(), 1);
    assert_eq!(
        *sound.0.borrow(),
        vec![
            SoundCue::Pop,
            SoundCue::Pop,
            SoundCue::Whoosh,
            SoundCue::Pop,
            SoundCue::Success
        ]
    );
}

/// it should render the zero-divisor panel and never touch the timer
#[test]
fn long_division_by_zero_is_inert() {
    let mut stage = Stage::new(fast()).unwrap();
    let sound = RecordingSound::default();
    stage.set_sound(sound.clone());
    let id = stage
        .mount("long_division", &ProblemData::from_operands(&[45.0, 0.0]))
        .unwrap();

    match stage.view(id).unwrap() {
        Rendered::Error(panel) => {
            assert_eq!(panel.title, "We can't divide by zero");
            assert!(panel.explanation.contains("45"));
        }
        other => panic!("expected error panel, got {other:?}"),
    }
    assert!(matches!(
        stage.on_complete(id, || {}),
        Err(StageError::NotRunnable(_))
    ));

    stage.set_show_solution(id, true).unwrap();
    stage.set_paused(id, true).unwrap();
    let out = stage.update(60_000.0);
    assert!(out.events.is_empty());
    assert!(sound.0.borrow().is_empty());
    assert!(stage.static_view(id).unwrap().is_error());
}

/// it should emit exactly one success cue per run for every lesson kind
#[test]
fn one_success_per_run() {
    for kind in LessonKind::ALL {
        let mut stage = Stage::new(fast()).unwrap();
        let id = stage.mount(kind.name(), &ProblemData::default()).unwrap();
        let done = counter(&mut stage, id);

        for run in 1..=2u32 {
            stage.set_show_solution(id, true).unwrap();
            let out = stage.update(60_000.0);
            assert_eq!(out.count_cue(SoundCue::Success), 1, "{kind} run {run}");
            assert_eq!(
                out.for_lesson(id)
                    .filter(|e| matches!(e, TimelineEvent::Completed { .. }))
                    .count(),
                1
            );
            assert_eq!(done.get(), run, "{kind}");
            stage.set_show_solution(id, false).unwrap();
            assert_eq!(stage.phase(id).unwrap(), "setup");
        }
    }
}

/// it should produce the same phase sequence when paused and resumed mid-run
#[test]
fn pause_resume_matches_uninterrupted() {
    let problem = ProblemData::from_operands(&[2.0, 3.0, 1.0, 4.0]);

    let mut plain = Stage::new(fast()).unwrap();
    let a = plain.mount("foil", &problem).unwrap();
    plain.set_show_solution(a, true).unwrap();
    let mut expected = Vec::new();
    for _ in 0..40 {
        expected.extend(entered(&mut plain, a, 10.0));
    }

    let mut stage = Stage::new(fast()).unwrap();
    let b = stage.mount("foil", &problem).unwrap();
    stage.set_show_solution(b, true).unwrap();
    let mut seen = entered(&mut stage, b, 30.0);
    stage.set_paused(b, true).unwrap();
    let frozen = stage.phase(b).unwrap().to_string();
    let progress = stage.progress(b).unwrap();
    for _ in 0..50 {
        assert!(entered(&mut stage, b, 100.0).is_empty());
    }
    assert_eq!(stage.phase(b).unwrap(), frozen);
    assert_eq!(stage.progress(b).unwrap(), progress);
    assert!(stage.is_running(b).unwrap(), "pause keeps the timer");

    stage.set_paused(b, false).unwrap();
    for _ in 0..40 {
        seen.extend(entered(&mut stage, b, 10.0));
    }
    assert_eq!(seen, expected);
    assert!(stage.is_complete(b).unwrap());
}

/// it should hold nested lessons while the enclosing player is not playing
#[test]
fn mounted_under_player_context() {
    let mut player = AnimationPlayer::new(PlayerOptions::new(100), &false).unwrap();
    let mut stage = Stage::new(fast()).unwrap();
    let id = stage
        .mount_under("number_line", &ProblemData::default(), &player.context())
        .unwrap();
    stage.set_show_solution(id, true).unwrap();
    stage.update(1_000.0);
    assert_eq!(stage.phase(id).unwrap(), "setup", "idle player holds the lesson");

    player.play().unwrap();
    stage.update(20.0);
    assert_eq!(stage.phase(id).unwrap(), "start");

    player.pause().unwrap();
    stage.update(1_000.0);
    assert_eq!(stage.phase(id).unwrap(), "start");

    player.play().unwrap();
    stage.update(10_000.0);
    assert!(stage.is_complete(id).unwrap());
}

/// it should restart from tick 0 on every show-solution edge
#[test]
fn show_solution_edges_restart() {
    let mut stage = Stage::new(fast()).unwrap();
    let id = stage.mount("triangle", &ProblemData::default()).unwrap();
    stage.set_show_solution(id, true).unwrap();
    stage.update(50.0);
    assert_ne!(stage.phase(id).unwrap(), "setup");

    stage.set_show_solution(id, false).unwrap();
    let out = stage.update(500.0);
    assert!(out
        .for_lesson(id)
        .any(|e| matches!(e, TimelineEvent::TimerStopped)));
    assert_eq!(stage.phase(id).unwrap(), "setup");
    assert_eq!(stage.progress(id).unwrap(), 0.0);

    stage.set_show_solution(id, true).unwrap();
    assert_eq!(entered(&mut stage, id, 0.0), vec!["setup"]);
}

/// it should keep lessons independent and report events per lesson
#[test]
fn lessons_are_independent() {
    let mut stage = Stage::new(fast()).unwrap();
    let a = stage.mount("foil", &ProblemData::default()).unwrap();
    let b = stage.mount("derivative", &ProblemData::default()).unwrap();
    stage.set_show_solution(a, true).unwrap();
    stage.set_paused(b, true).unwrap();
    stage.set_show_solution(b, true).unwrap();

    let out = stage.update(10_000.0);
    assert!(out.for_lesson(a).any(|e| matches!(e, TimelineEvent::Completed { .. })));
    assert!(!out.for_lesson(b).any(|e| matches!(e, TimelineEvent::Completed { .. })));
    assert_eq!(stage.phase(b).unwrap(), "setup");

    stage.unmount(a).unwrap();
    assert_eq!(stage.lesson_ids(), vec![b]);
    assert!(matches!(stage.phase(a), Err(StageError::NotMounted(_))));
}

/// it should render the finished picture statically without starting a timer
#[test]
fn static_view_for_reduced_motion() {
    let mut stage = Stage::new(fast()).unwrap();
    let id = stage.mount("unit_circle", &ProblemData::default()).unwrap();
    let view = stage.static_view(id).unwrap();
    assert!(matches!(view, Rendered::Static(_)));
    let v = view.lesson_view().unwrap();
    assert_eq!(v.phase, "complete");
    assert_eq!(v.labels["cos"], "0.866");
    assert!(!stage.is_running(id).unwrap());
    assert!(stage.update(1_000.0).events.is_empty());
}

/// it should keep lessons under a reduced-motion player static and never start a timer
#[test]
fn reduced_motion_player_mounts_static() {
    let player =
        AnimationPlayer::new(PlayerOptions::new(100).with_auto_play(), &true).unwrap();
    let mut stage = Stage::new(fast()).unwrap();
    let sound = RecordingSound::default();
    stage.set_sound(sound.clone());
    let id = stage
        .mount_under("sequence", &ProblemData::default(), &player.context())
        .unwrap();

    stage.set_show_solution(id, true).unwrap();
    stage.set_paused(id, false).unwrap();
    assert!(!stage.is_running(id).unwrap());
    assert!(stage.update(10_000.0).events.is_empty());
    assert!(sound.0.borrow().is_empty());

    let view = stage.view(id).unwrap();
    assert!(matches!(view, Rendered::Static(_)));
    let v = view.lesson_view().unwrap();
    assert_eq!(v.phase, "complete");
    assert_eq!(v.labels["answer"], "5");
    assert!(!stage.is_complete(id).unwrap());
    assert!(matches!(stage.phase(id), Err(StageError::NotRunnable(_))));
    assert!(matches!(
        stage.on_complete(id, || {}),
        Err(StageError::NotRunnable(_))
    ));
}

/// it should give nested lessons a fresh run when the player replays
#[test]
fn player_replay_restarts_nested_lessons() {
    let mut player =
        AnimationPlayer::new(PlayerOptions::new(100).with_auto_play(), &false).unwrap();
    let mut stage = Stage::new(fast()).unwrap();
    let id = stage
        .mount_under("sequence", &ProblemData::from_operands(&[95.0, 3.0]), &player.context())
        .unwrap();
    let done = counter(&mut stage, id);
    stage.set_show_solution(id, true).unwrap();
    assert_eq!(stage.update(10_000.0).count_cue(SoundCue::Success), 1);
    assert!(stage.is_complete(id).unwrap());

    player.replay();
    assert_eq!(entered(&mut stage, id, 0.0), vec!["setup"]);
    assert!(!stage.is_complete(id).unwrap());
    assert!(stage.is_running(id).unwrap());

    let out = stage.update(10_000.0);
    assert_eq!(out.count_cue(SoundCue::Success), 1);
    assert_eq!(done.get(), 2);
    assert_eq!(stage.update(10_000.0).count_cue(SoundCue::Success), 0);
}

/// it should replay nested lessons on every loop of a looping player
#[test]
fn looping_player_replays_nested_lessons() {
    let mut player = AnimationPlayer::new(
        PlayerOptions::new(2).with_auto_play().with_loop(),
        &false,
    )
    .unwrap();
    let mut stage = Stage::new(fast()).unwrap();
    let id = stage
        .mount_under("foil", &ProblemData::default(), &player.context())
        .unwrap();
    let done = counter(&mut stage, id);
    stage.set_show_solution(id, true).unwrap();

    for lap in 1..=3u32 {
        let out = stage.update(10_000.0);
        assert_eq!(out.count_cue(SoundCue::Success), 1, "lap {lap}");
        assert_eq!(
            out.for_lesson(id)
                .filter(|e| matches!(e, TimelineEvent::Completed { .. }))
                .count(),
            1
        );
        assert_eq!(done.get(), lap);
        player.tick();
        player.tick();
        assert_eq!(player.loops_completed(), lap);
    }
}

/// it should leave lessons whose solution is hidden alone when the player restarts
#[test]
fn player_restart_skips_inactive_lessons() {
    let mut player =
        AnimationPlayer::new(PlayerOptions::new(100).with_auto_play(), &false).unwrap();
    let mut stage = Stage::new(fast()).unwrap();
    let id = stage
        .mount_under("triangle", &ProblemData::default(), &player.context())
        .unwrap();
    player.replay();
    assert!(stage.update(1_000.0).events.is_empty());
    assert!(!stage.is_running(id).unwrap());
    assert_eq!(stage.phase(id).unwrap(), "setup");
}
