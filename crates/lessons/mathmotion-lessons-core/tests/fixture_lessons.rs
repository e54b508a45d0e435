use mathmotion_lessons_core::{ProblemData, Rendered, Stage};
use mathmotion_test_fixtures::{configs, problems};
use mathmotion_timeline_core::{Config, SoundCue};

/// it should load every fixture problem through the lenient parser
#[test]
fn fixtures_parse() {
    let keys = problems::keys();
    assert!(!keys.is_empty());
    for name in keys {
        let problem: ProblemData = problems::load(&name).unwrap();
        let round = ProblemData::from_json(&problems::json(&name).unwrap()).unwrap();
        assert_eq!(problem, round, "{name}");
    }
}

/// it should run every fixture to completion and match its expected labels
#[test]
fn fixtures_render_expected_labels() {
    let cfg: Config = configs::load("fast-test").unwrap();
    for name in problems::keys() {
        let kind = problems::kind(&name).unwrap();
        let problem: ProblemData = problems::load(&name).unwrap();
        let expect = problems::expectation(&name).unwrap();

        let mut stage = Stage::new(cfg.clone()).unwrap();
        let id = stage.mount(&kind, &problem).unwrap();
        stage.set_show_solution(id, true).unwrap();
        let out = stage.update(600_000.0).clone();

        match stage.view(id).unwrap() {
            Rendered::Error(panel) => {
                assert!(expect.error, "{name}: unexpected error panel {panel:?}");
                assert!(out.events.is_empty(), "{name}: error panels have no timer");
            }
            Rendered::Lesson(view) => {
                assert!(!expect.error, "{name}: expected an error panel");
                assert!(stage.is_complete(id).unwrap(), "{name}");
                assert_eq!(out.count_cue(SoundCue::Success), 1, "{name}");
                assert_eq!(view.phase, "complete", "{name}");
                for (key, want) in &expect.labels {
                    assert_eq!(
                        view.labels.get(key),
                        Some(want),
                        "{name}: label {key}"
                    );
                }
            }
            Rendered::Static(_) => panic!("{name}: stage.view never renders static"),
        }
    }
}

/// it should accept every shipped config
#[test]
fn fixture_configs_validate() {
    for name in configs::keys() {
        let json = configs::json(&name).unwrap();
        let cfg = Config::from_json(&json).unwrap();
        assert!(Stage::new(cfg).is_ok(), "{name}");
    }
    let brisk: Config = configs::load("brisk").unwrap();
    assert_eq!(brisk, Config::brisk());
}
