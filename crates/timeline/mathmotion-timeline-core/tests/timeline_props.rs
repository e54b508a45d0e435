use mathmotion_timeline_core::{
    reduce, PhaseSpec, RunState, Signal, SoundCue, Timeline, TimelineEvent,
};
use proptest::prelude::*;

fn timeline(n: usize, d: u32) -> Timeline {
    let phases = (0..n)
        .map(|i| {
            let p = PhaseSpec::new(format!("p{i}"));
            if i % 2 == 1 {
                p.with_cue(SoundCue::Pop)
            } else {
                p
            }
        })
        .collect();
    Timeline::new(phases, d).unwrap()
}

/// Drive `steps` ticks; `pauses[i]` closes the gate before tick i for that many ticks.
fn drive(tl: &Timeline, steps: usize, pauses: &[u8]) -> (Vec<TimelineEvent>, RunState) {
    let mut s = RunState::default();
    let mut events = Vec::new();
    let t = reduce(tl, &s, Signal::SetActive(true));
    s = t.state;
    events.extend(t.events);
    for i in 0..steps {
        let hold = pauses.get(i).copied().unwrap_or(0);
        if hold > 0 {
            s = reduce(tl, &s, Signal::SetPaused(true)).state;
            for _ in 0..hold {
                let t = reduce(tl, &s, Signal::Tick);
                assert!(t.events.is_empty());
                s = t.state;
            }
            s = reduce(tl, &s, Signal::SetPaused(false)).state;
        }
        let t = reduce(tl, &s, Signal::Tick);
        s = t.state;
        events.extend(t.events);
    }
    (events, s)
}

fn phase_trace(events: &[TimelineEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            TimelineEvent::PhaseEntered { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}

proptest! {
    /// it should map ticks to non-decreasing phases that hit N-1 exactly at (N-1)*D
    #[test]
    fn phase_is_monotonic_and_lands_on_schedule(n in 1usize..12, d in 1u32..8) {
        let tl = timeline(n, d);
        let mut last = 0usize;
        let end = (n as u64 - 1) * d as u64;
        for tick in 0..(end + 3 * d as u64 + 1) {
            let p = tl.phase_at(tick);
            prop_assert!(p >= last);
            prop_assert!(p < n);
            if tick < end {
                prop_assert!(p < n - 1);
            } else {
                prop_assert_eq!(p, n - 1);
            }
            last = p;
        }
    }

    /// it should produce the same phase sequence and one success whatever the pause pattern
    #[test]
    fn pause_is_time_transparent(
        n in 1usize..8,
        d in 1u32..5,
        pauses in proptest::collection::vec(0u8..6, 0..40),
    ) {
        let tl = timeline(n, d);
        let steps = n * d as usize + 5;
        let (plain, plain_state) = drive(&tl, steps, &[]);
        let (paused, paused_state) = drive(&tl, steps, &pauses);

        prop_assert_eq!(phase_trace(&plain), phase_trace(&paused));
        prop_assert_eq!(plain_state.tick, paused_state.tick);
        prop_assert!(paused_state.completed);

        let successes = paused.iter().filter(|e| e.is_cue(SoundCue::Success)).count();
        let completions = paused
            .iter()
            .filter(|e| matches!(e, TimelineEvent::Completed { .. }))
            .count();
        prop_assert_eq!(successes, 1);
        prop_assert_eq!(completions, 1);
    }

    /// it should emit success only after the terminal phase is entered
    #[test]
    fn success_follows_terminal_phase(n in 1usize..8, d in 1u32..5) {
        let tl = timeline(n, d);
        let (events, _) = drive(&tl, n * d as usize, &[]);
        let success_at = events.iter().position(|e| e.is_cue(SoundCue::Success)).unwrap();
        let terminal_at = events
            .iter()
            .position(|e| matches!(e, TimelineEvent::PhaseEntered { index, .. } if *index == n - 1))
            .unwrap();
        prop_assert!(terminal_at < success_at);
    }
}
