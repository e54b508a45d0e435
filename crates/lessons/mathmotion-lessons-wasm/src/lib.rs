use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use mathmotion_lessons_core::{LessonId, ProblemData, Stage};
use mathmotion_timeline_core::{Config, SoundEffects};

#[wasm_bindgen]
pub struct MathmotionStage {
    core: Stage,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn js_err(context: &str, e: impl std::fmt::Display) -> JsError {
    JsError::new(&format!("{context}: {e}"))
}

/// Plain JS objects instead of `Map`s, so label maps read as `view.labels.cos`.
fn to_js<T: Serialize>(value: &T, context: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| js_err(context, e))
}

/// Forwards cues to `handler(cue: "pop" | "whoosh" | "success")`.
struct JsSound {
    f: Function,
}

impl JsSound {
    fn call(&self, cue: &str) {
        // fire and forget; a throwing handler must not stall the lesson
        let _ = self.f.call1(&JsValue::UNDEFINED, &JsValue::from_str(cue));
    }
}

impl SoundEffects for JsSound {
    fn play_pop(&mut self) {
        self.call("pop");
    }

    fn play_whoosh(&mut self) {
        self.call("whoosh");
    }

    fn play_success(&mut self) {
        self.call("success");
    }
}

#[wasm_bindgen]
impl MathmotionStage {
    /// Create a stage. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new MathmotionStage({ ticks_per_phase: 10 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MathmotionStage, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| js_err("config error", e))?
        };
        let core = Stage::new(cfg).map_err(|e| js_err("config error", e))?;
        Ok(MathmotionStage { core })
    }

    /// Mount a lesson by kind. `problem` is optional `{ operands, operation?,
    /// correctAnswer?, context? }`. Returns the lesson id; invalid parameters
    /// still mount and render an error panel.
    #[wasm_bindgen]
    pub fn mount(&mut self, kind: String, problem: JsValue) -> Result<u32, JsError> {
        let problem: ProblemData = if jsvalue_is_undefined_or_null(&problem) {
            ProblemData::default()
        } else {
            swb::from_value(problem).map_err(|e| js_err("problem parse error", e))?
        };
        let id = self
            .core
            .mount(&kind, &problem)
            .map_err(|e| js_err("mount error", e))?;
        Ok(id.0)
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self, id: u32) -> Result<(), JsError> {
        self.core
            .unmount(LessonId(id))
            .map_err(|e| js_err("unmount error", e))
    }

    #[wasm_bindgen(js_name = set_show_solution)]
    pub fn set_show_solution(&mut self, id: u32, show: bool) -> Result<(), JsError> {
        self.core
            .set_show_solution(LessonId(id), show)
            .map_err(|e| js_err("set_show_solution error", e))
    }

    #[wasm_bindgen(js_name = set_paused)]
    pub fn set_paused(&mut self, id: u32, paused: bool) -> Result<(), JsError> {
        self.core
            .set_paused(LessonId(id), paused)
            .map_err(|e| js_err("set_paused error", e))
    }

    /// Route sound cues to `handler(cue)` for every lesson on the stage.
    #[wasm_bindgen(js_name = set_sound_handler)]
    pub fn set_sound_handler(&mut self, handler: Function) {
        self.core.set_sound(JsSound { f: handler });
    }

    /// Call `callback()` once each time the lesson's run completes.
    #[wasm_bindgen(js_name = on_complete)]
    pub fn on_complete(&mut self, id: u32, callback: Function) -> Result<(), JsError> {
        self.core
            .on_complete(LessonId(id), move || {
                let _ = callback.call0(&JsValue::UNDEFINED);
            })
            .map_err(|e| js_err("on_complete error", e))
    }

    /// Advance every lesson by `dt_ms` milliseconds. Returns
    /// `{ events: [{ lesson, event }], dropped }`.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64) -> Result<JsValue, JsError> {
        let out = self.core.update(dt_ms);
        to_js(out, "outputs error")
    }

    /// `{ kind: "lesson" | "error", view }` for the current phase.
    #[wasm_bindgen]
    pub fn view(&self, id: u32) -> Result<JsValue, JsError> {
        let rendered = self
            .core
            .view(LessonId(id))
            .map_err(|e| js_err("view error", e))?;
        to_js(&rendered, "view error")
    }

    /// Reduced-motion fallback: `{ kind: "static" | "error", view }`.
    #[wasm_bindgen(js_name = static_view)]
    pub fn static_view(&self, id: u32) -> Result<JsValue, JsError> {
        let rendered = self
            .core
            .static_view(LessonId(id))
            .map_err(|e| js_err("static_view error", e))?;
        to_js(&rendered, "static_view error")
    }

    #[wasm_bindgen]
    pub fn phase(&self, id: u32) -> Result<String, JsError> {
        self.core
            .phase(LessonId(id))
            .map(str::to_string)
            .map_err(|e| js_err("phase error", e))
    }

    #[wasm_bindgen]
    pub fn progress(&self, id: u32) -> Result<f32, JsError> {
        self.core
            .progress(LessonId(id))
            .map_err(|e| js_err("progress error", e))
    }

    #[wasm_bindgen(js_name = is_complete)]
    pub fn is_complete(&self, id: u32) -> Result<bool, JsError> {
        self.core
            .is_complete(LessonId(id))
            .map_err(|e| js_err("is_complete error", e))
    }

    /// Registered lesson kinds, sorted.
    #[wasm_bindgen(js_name = lesson_kinds)]
    pub fn lesson_kinds(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.kinds(), "lesson_kinds error")
    }
}

/// ABI guard for JS wrappers.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
