//! Stage: hosts any number of mounted lessons and steps them together.
//!
//! Each mounted lesson owns its own [`PhaseRunner`] and [`PauseGate`]; the
//! only things shared between lessons are the sound provider and, for
//! lessons mounted under an [`AnimationPlayer`](mathmotion_timeline_core::AnimationPlayer),
//! the player's read-only [`PlayerContext`]. Lessons whose parameters fail
//! validation are mounted as error panels with no runner at all, and lessons
//! mounted under a reduced-motion player render their static picture only.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, warn};
use mathmotion_timeline_core::{
    Config, NullSound, PauseGate, PauseHandle, PauseSource, PhaseRunner, PlayerContext, RenderMode,
    SoundCue, SoundEffects, TimelineEvent,
};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorPanel, StageError};
use crate::ids::{IdAllocator, LessonId};
use crate::lesson::Lesson;
use crate::problem::ProblemData;
use crate::registry::LessonRegistry;
use crate::view::Rendered;

/// Sound provider shared by every runner on the stage; replacing it takes
/// effect for lessons that are already mounted.
struct SharedSound(Rc<RefCell<Box<dyn SoundEffects>>>);

impl SoundEffects for SharedSound {
    fn play_pop(&mut self) {
        self.play(SoundCue::Pop);
    }

    fn play_whoosh(&mut self) {
        self.play(SoundCue::Whoosh);
    }

    fn play_success(&mut self) {
        self.play(SoundCue::Success);
    }

    fn play(&mut self, cue: SoundCue) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.play(cue);
        }
    }
}

/// Local gate, optionally combined with an enclosing player.
struct StagePause {
    local: PauseHandle,
    parent: Option<PlayerContext>,
}

impl PauseSource for StagePause {
    fn is_paused(&self) -> bool {
        self.local.is_paused() || self.parent.as_ref().is_some_and(|p| p.is_paused())
    }
}

/// Enclosing player plus the last restart count this lesson followed.
struct Parent {
    ctx: PlayerContext,
    restarts: u32,
}

impl Parent {
    fn new(ctx: PlayerContext) -> Self {
        let restarts = ctx.restarts();
        Self { ctx, restarts }
    }

    /// True once per replay, loop or reset of the player.
    fn restarted(&mut self) -> bool {
        let now = self.ctx.restarts();
        let changed = now != self.restarts;
        self.restarts = now;
        changed
    }
}

enum Slot {
    Ready {
        lesson: Box<dyn Lesson>,
        runner: PhaseRunner,
        gate: PauseGate,
        parent: Option<Parent>,
    },
    Static {
        lesson: Box<dyn Lesson>,
    },
    Invalid {
        kind: String,
        panel: ErrorPanel,
    },
}

impl Slot {
    fn kind(&self) -> &str {
        match self {
            Slot::Ready { lesson, .. } | Slot::Static { lesson } => lesson.kind(),
            Slot::Invalid { kind, .. } => kind,
        }
    }
}

/// One timeline event tagged with the lesson that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    pub lesson: LessonId,
    pub event: TimelineEvent,
}

/// Events produced since the previous [`Stage::update`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StageOutputs {
    #[serde(default)]
    pub events: Vec<StageEvent>,
    #[serde(default)]
    pub dropped: usize,
}

impl StageOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    pub fn for_lesson(&self, id: LessonId) -> impl Iterator<Item = &TimelineEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.lesson == id)
            .map(|e| &e.event)
    }

    pub fn count_cue(&self, cue: SoundCue) -> usize {
        self.events.iter().filter(|e| e.event.is_cue(cue)).count()
    }
}

pub struct Stage {
    cfg: Config,
    ids: IdAllocator,
    registry: LessonRegistry,
    sound: Rc<RefCell<Box<dyn SoundEffects>>>,
    slots: IndexMap<LessonId, Slot>,
    outputs: StageOutputs,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("cfg", &self.cfg)
            .field("lessons", &self.slots.len())
            .field("registry", &self.registry.kinds())
            .finish()
    }
}

impl Stage {
    pub fn new(cfg: Config) -> Result<Self, StageError> {
        Self::with_registry(cfg, LessonRegistry::with_defaults())
    }

    pub fn with_registry(cfg: Config, registry: LessonRegistry) -> Result<Self, StageError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            ids: IdAllocator::new(),
            registry,
            sound: Rc::new(RefCell::new(Box::new(NullSound))),
            slots: IndexMap::new(),
            outputs: StageOutputs::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.registry.kinds()
    }

    /// Replace the sound provider for every lesson on the stage.
    pub fn set_sound(&mut self, sound: impl SoundEffects + 'static) {
        *self.sound.borrow_mut() = Box::new(sound);
    }

    /// Mount a lesson. Unknown kinds are an error; invalid parameters mount
    /// an error panel that never starts a timer.
    pub fn mount(&mut self, kind: &str, problem: &ProblemData) -> Result<LessonId, StageError> {
        self.mount_inner(kind, problem, None)
    }

    /// Mount a lesson that also pauses whenever `ctx`'s player is not playing
    /// and restarts its run when the player replays or loops. Under a
    /// reduced-motion player the lesson is mounted static: no runner, no timer.
    pub fn mount_under(
        &mut self,
        kind: &str,
        problem: &ProblemData,
        ctx: &PlayerContext,
    ) -> Result<LessonId, StageError> {
        self.mount_inner(kind, problem, Some(ctx.clone()))
    }

    fn mount_inner(
        &mut self,
        kind: &str,
        problem: &ProblemData,
        parent: Option<PlayerContext>,
    ) -> Result<LessonId, StageError> {
        let factory = self.registry.factory(kind)?;
        let slot = match factory(problem) {
            Ok(lesson)
                if parent
                    .as_ref()
                    .is_some_and(|p| p.render_mode() == RenderMode::StaticFallback) =>
            {
                debug!("{kind}: enclosing player prefers reduced motion; mounting static");
                Slot::Static { lesson }
            }
            Ok(lesson) => {
                let timeline = lesson.timeline(&self.cfg)?;
                let gate = PauseGate::new(false);
                let runner = PhaseRunner::new(timeline, &self.cfg)
                    .with_pause(StagePause {
                        local: gate.handle(),
                        parent: parent.clone(),
                    })
                    .with_sound(SharedSound(Rc::clone(&self.sound)));
                Slot::Ready {
                    lesson,
                    runner,
                    gate,
                    parent: parent.map(Parent::new),
                }
            }
            Err(err) => {
                warn!("{kind}: {err}; showing error panel");
                Slot::Invalid {
                    kind: kind.to_string(),
                    panel: err.panel(),
                }
            }
        };
        let id = self.ids.alloc();
        debug!("mounted {kind} as {id:?}");
        self.slots.insert(id, slot);
        Ok(id)
    }

    /// Drop a lesson and its timer.
    pub fn unmount(&mut self, id: LessonId) -> Result<(), StageError> {
        match self.slots.shift_remove(&id) {
            Some(slot) => {
                debug!("unmounted {} {id:?}", slot.kind());
                Ok(())
            }
            None => Err(StageError::NotMounted(id)),
        }
    }

    #[inline]
    pub fn is_mounted(&self, id: LessonId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn lesson_ids(&self) -> Vec<LessonId> {
        self.slots.keys().copied().collect()
    }

    fn slot(&self, id: LessonId) -> Result<&Slot, StageError> {
        self.slots.get(&id).ok_or(StageError::NotMounted(id))
    }

    fn runner_mut(&mut self, id: LessonId) -> Result<(&mut PhaseRunner, &PauseGate), StageError> {
        match self.slots.get_mut(&id) {
            Some(Slot::Ready { runner, gate, .. }) => Ok((runner, gate)),
            Some(Slot::Static { .. } | Slot::Invalid { .. }) => Err(StageError::NotRunnable(id)),
            None => Err(StageError::NotMounted(id)),
        }
    }

    /// Register the completion callback for a lesson's runs.
    pub fn on_complete(
        &mut self,
        id: LessonId,
        f: impl FnMut() + 'static,
    ) -> Result<(), StageError> {
        let (runner, _) = self.runner_mut(id)?;
        runner.set_completion_sink(Some(Box::new(f)));
        Ok(())
    }

    /// Host "show solution" toggle. Error panels and static lessons ignore it.
    pub fn set_show_solution(&mut self, id: LessonId, show: bool) -> Result<(), StageError> {
        match self.runner_mut(id) {
            Ok((runner, _)) => {
                runner.set_active(show);
                Ok(())
            }
            Err(StageError::NotRunnable(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn set_paused(&mut self, id: LessonId, paused: bool) -> Result<(), StageError> {
        match self.runner_mut(id) {
            Ok((runner, gate)) => {
                gate.set(paused);
                runner.sync_pause();
                Ok(())
            }
            Err(StageError::NotRunnable(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Advance every running lesson by `dt_ms` of host time and collect the
    /// events produced since the last update (including those from
    /// `set_show_solution` / `set_paused` calls in between).
    pub fn update(&mut self, dt_ms: f64) -> &StageOutputs {
        self.outputs.clear();
        for (id, slot) in self.slots.iter_mut() {
            let Slot::Ready { runner, parent, .. } = slot else {
                continue;
            };
            if parent.as_mut().is_some_and(Parent::restarted) && runner.state().active {
                debug!("{id:?} restarting with its player");
                runner.set_active(false);
                runner.set_active(true);
            }
            runner.update(dt_ms);
            let out = runner.take_outputs();
            self.outputs.dropped += out.dropped;
            self.outputs
                .events
                .extend(out.events.into_iter().map(|event| StageEvent { lesson: *id, event }));
        }
        &self.outputs
    }

    /// Current picture: the phase view, the static picture, or the error panel.
    pub fn view(&self, id: LessonId) -> Result<Rendered, StageError> {
        Ok(match self.slot(id)? {
            Slot::Ready { lesson, runner, .. } => Rendered::Lesson(lesson.view(runner.phase_index())),
            Slot::Static { lesson } => Rendered::Static(lesson.final_view()),
            Slot::Invalid { panel, .. } => Rendered::Error(panel.clone()),
        })
    }

    /// Reduced-motion picture: the finished explanation, no timer involved.
    pub fn static_view(&self, id: LessonId) -> Result<Rendered, StageError> {
        Ok(match self.slot(id)? {
            Slot::Ready { lesson, .. } | Slot::Static { lesson } => {
                Rendered::Static(lesson.final_view())
            }
            Slot::Invalid { panel, .. } => Rendered::Error(panel.clone()),
        })
    }

    pub fn phase(&self, id: LessonId) -> Result<&str, StageError> {
        match self.slot(id)? {
            Slot::Ready { runner, .. } => Ok(runner.phase_name()),
            Slot::Static { .. } | Slot::Invalid { .. } => Err(StageError::NotRunnable(id)),
        }
    }

    pub fn progress(&self, id: LessonId) -> Result<f32, StageError> {
        match self.slot(id)? {
            Slot::Ready { runner, .. } => Ok(runner.progress()),
            Slot::Static { .. } | Slot::Invalid { .. } => Err(StageError::NotRunnable(id)),
        }
    }

    pub fn is_complete(&self, id: LessonId) -> Result<bool, StageError> {
        match self.slot(id)? {
            Slot::Ready { runner, .. } => Ok(runner.is_complete()),
            Slot::Static { .. } | Slot::Invalid { .. } => Ok(false),
        }
    }

    /// Whether the lesson's timer is running.
    pub fn is_running(&self, id: LessonId) -> Result<bool, StageError> {
        match self.slot(id)? {
            Slot::Ready { runner, .. } => Ok(runner.state().timer_running()),
            Slot::Static { .. } | Slot::Invalid { .. } => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> Stage {
        Stage::new(Config::default()).unwrap()
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut s = stage();
        let err = s.mount("pie_chart", &ProblemData::default()).unwrap_err();
        assert_eq!(err.category(), "registry");
        assert!(s.lesson_ids().is_empty());
    }

    #[test]
    fn invalid_parameters_mount_error_panel() {
        let mut s = stage();
        let id = s
            .mount("logarithm", &ProblemData::from_operands(&[1.0, 8.0]))
            .unwrap();
        assert!(s.view(id).unwrap().is_error());
        assert!(s.set_show_solution(id, true).is_ok());
        assert!(!s.is_running(id).unwrap());
        assert!(matches!(s.phase(id), Err(StageError::NotRunnable(_))));
        assert!(s.update(10_000.0).events.is_empty());
    }

    #[test]
    fn unmount_twice() {
        let mut s = stage();
        let id = s.mount("foil", &ProblemData::default()).unwrap();
        s.unmount(id).unwrap();
        assert_eq!(s.unmount(id), Err(StageError::NotMounted(id)));
        assert!(matches!(s.view(id), Err(StageError::NotMounted(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = Config {
            ticks_per_phase: 0,
            ..Config::default()
        };
        assert!(Stage::new(cfg).is_err());
    }
}
