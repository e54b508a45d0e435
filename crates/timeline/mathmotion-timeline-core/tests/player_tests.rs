use mathmotion_timeline_core::{
    AnimationPlayer, Config, PauseSource, PhaseRunner, PlayerError, PlayerEvent, PlayerOptions,
    PlayerState, RenderMode, Timeline,
};

fn player(opts: PlayerOptions) -> AnimationPlayer {
    AnimationPlayer::new(opts, &false).unwrap()
}

/// it should walk idle → playing → paused → playing → complete
#[test]
fn basic_lifecycle() {
    let mut p = player(PlayerOptions::new(4));
    assert_eq!(p.state(), PlayerState::Idle);
    p.tick();
    assert_eq!(p.elapsed_ticks(), 0, "idle does not advance");

    p.play().unwrap();
    p.tick();
    p.tick();
    p.pause().unwrap();
    p.tick();
    assert_eq!(p.elapsed_ticks(), 2, "paused does not advance");
    assert!((p.progress() - 0.5).abs() < 1e-6);

    p.play().unwrap();
    p.tick();
    p.tick();
    assert_eq!(p.state(), PlayerState::Complete);
    assert_eq!(p.progress(), 1.0);

    let events = p.take_events();
    assert_eq!(events.last(), Some(&PlayerEvent::Completed));
    assert!(events.contains(&PlayerEvent::StateChanged {
        from: PlayerState::Playing,
        to: PlayerState::Paused
    }));
}

/// it should only leave complete through replay
#[test]
fn complete_requires_replay() {
    let mut p = player(PlayerOptions::new(1).with_auto_play());
    assert_eq!(p.state(), PlayerState::Playing);
    p.tick();
    assert_eq!(p.state(), PlayerState::Complete);

    let err = p.play().unwrap_err();
    assert_eq!(
        err,
        PlayerError::InvalidTransition {
            from: PlayerState::Complete,
            to: PlayerState::Playing
        }
    );
    assert!(p.pause().is_err());

    p.replay();
    assert_eq!(p.state(), PlayerState::Playing);
    assert_eq!(p.elapsed_ticks(), 0);
}

/// it should restart a fresh playing run when looping
#[test]
fn loop_restarts() {
    let mut p = player(PlayerOptions::new(3).with_auto_play().with_loop());
    for _ in 0..7 {
        p.tick();
    }
    assert_eq!(p.state(), PlayerState::Playing);
    assert_eq!(p.loops_completed(), 2);
    assert_eq!(p.elapsed_ticks(), 1);
    let events = p.take_events();
    assert!(events.contains(&PlayerEvent::Looped { count: 2 }));
    assert!(!events.contains(&PlayerEvent::Completed));
}

/// it should render the static fallback and never start a timer under reduced motion
#[test]
fn reduced_motion_fallback() {
    let mut p = AnimationPlayer::new(PlayerOptions::new(3).with_auto_play(), &true).unwrap();
    assert_eq!(p.render_mode(), RenderMode::StaticFallback);
    assert_eq!(p.state(), PlayerState::Idle);
    p.play().unwrap();
    p.replay();
    for _ in 0..10 {
        p.tick();
    }
    assert!(!p.timer_running());
    assert_eq!(p.elapsed_ticks(), 0);
    assert!(p.take_events().is_empty());
}

/// it should reject a zero-length player
#[test]
fn zero_duration_rejected() {
    let err = AnimationPlayer::new(PlayerOptions::new(0), &false).unwrap_err();
    assert_eq!(err, PlayerError::ZeroDuration);
}

/// it should drive a nested runner's pause level through the context handle
#[test]
fn context_pauses_children() {
    let mut p = player(PlayerOptions::new(100));
    let ctx = p.context();
    assert!(ctx.is_paused());
    assert!(!ctx.is_playing());

    let tl = Timeline::uniform(&["setup", "apply", "complete"], 2).unwrap();
    let mut child = PhaseRunner::new(tl, &Config::default()).with_pause(ctx.pause_handle());
    child.set_active(true);
    child.tick();
    assert_eq!(child.state().tick, 0, "idle shell holds the child");

    p.toggle().unwrap();
    assert!(ctx.is_playing());
    child.tick();
    child.tick();
    assert_eq!(child.phase_name(), "apply");

    p.toggle().unwrap();
    assert_eq!(ctx.state(), PlayerState::Paused);
    child.tick();
    assert_eq!(child.state().tick, 2);
}

/// it should tell nested children about restarts and the render mode
#[test]
fn context_reports_restarts_and_render_mode() {
    let mut p = player(PlayerOptions::new(2).with_auto_play().with_loop());
    let ctx = p.context();
    assert_eq!(ctx.render_mode(), RenderMode::Animated);
    assert_eq!(ctx.restarts(), 0);

    p.tick();
    assert_eq!(ctx.restarts(), 0);
    p.tick();
    assert_eq!(ctx.restarts(), 1, "loop");
    p.replay();
    assert_eq!(ctx.restarts(), 2, "replay");
    p.reset();
    assert_eq!(ctx.restarts(), 3, "reset");
    assert_eq!(ctx.state(), PlayerState::Idle);

    let still = AnimationPlayer::new(PlayerOptions::new(2), &true).unwrap();
    assert_eq!(still.context().render_mode(), RenderMode::StaticFallback);
}
