use smokefly::{
    config::{GameConfig, SnapshotConfig},
    engine::{EngineBuilder, EngineSettings},
    input::{InputIntent, ScriptLoader, ScriptedInput},
    session::{Session, SessionError, SessionState},
    snapshot::SaveGame,
};
use tempfile::tempdir;

fn settings(config: &GameConfig) -> EngineSettings {
    EngineSettings::from_config("test_run", config)
}

#[test]
fn engine_hook_sees_every_frame_before_its_tick() {
    let config = GameConfig::default();
    let mut session = Session::new(&config);
    let mut engine = EngineBuilder::new(settings(&config)).build();
    let mut idle = |_frame: u64| InputIntent::idle();

    let mut frames = Vec::new();
    let summary = engine
        .run_with_hook(&mut session, &mut idle, 6, |plan| {
            frames.push(plan.frame);
            assert_eq!(plan.tiles.len(), 21 * 21);
        })
        .expect("run succeeds");

    assert_eq!(frames, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(summary.frames, 6);
    assert!(!summary.escaped);
    assert_eq!(session.state(), SessionState::Playing);
}

#[test]
fn terminated_session_is_rejected_before_any_render() {
    let config = GameConfig::default();
    let mut session = Session::new(&config);
    session.start().unwrap();
    session.tick(InputIntent::escape()).unwrap();
    assert!(session.world().landscape.is_empty());

    let mut engine = EngineBuilder::new(settings(&config)).build();
    let mut idle = |_frame: u64| InputIntent::idle();
    let mut hook_calls = 0;
    let err = engine
        .run_with_hook(&mut session, &mut idle, 5, |_| hook_calls += 1)
        .expect_err("terminated session cannot run");

    assert_eq!(
        err.downcast_ref::<SessionError>(),
        Some(&SessionError::NotPlaying {
            state: SessionState::Terminated
        })
    );
    assert_eq!(hook_calls, 0);
    assert!(session.world().landscape.is_empty());
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn script_end_quits_the_session() {
    let config = GameConfig::default();
    let mut session = Session::new(&config);
    let mut engine = EngineBuilder::new(settings(&config)).build();
    let mut script = ScriptedInput::from_yaml("- right: true\n  repeat: 10\n").unwrap();

    let summary = engine.run(&mut session, &mut script, 1_000).unwrap();

    assert_eq!(summary.frames, 10);
    assert!(summary.escaped);
    assert_eq!(session.state(), SessionState::Terminated);
    assert_eq!(session.world().frame_number(), 10);
}

#[test]
fn sample_script_fixture_runs() {
    let loader = ScriptLoader::new(env!("CARGO_MANIFEST_DIR"));
    let mut script = loader.load("scripts/wander.yaml").expect("script parses");
    let config = GameConfig::default();
    let mut session = Session::new(&config);
    let mut engine = EngineBuilder::new(settings(&config)).build();

    let summary = engine.run(&mut session, &mut script, 10_000).unwrap();

    assert!(summary.escaped);
    assert_eq!(summary.frames, 120 + 60 + 80 + 10);
}

#[test]
fn engine_writes_autosaves_on_interval() {
    let temp = tempdir().unwrap();
    let config = GameConfig {
        snapshot: SnapshotConfig {
            interval_frames: 10,
            output_dir: temp.path().join("saves").display().to_string(),
        },
        ..GameConfig::default()
    };
    let mut session = Session::new(&config);
    let mut engine = EngineBuilder::new(settings(&config)).build();
    let mut idle = |_frame: u64| InputIntent::idle();

    let summary = engine.run(&mut session, &mut idle, 30).unwrap();

    let expected = temp.path().join("saves").join("test_run").join("frame_000010.json");
    assert_eq!(summary.autosaves.len(), 3);
    assert_eq!(summary.autosaves[0], expected);
    assert!(expected.exists(), "expected {} to exist", expected.display());

    let save = SaveGame::read_from(&summary.autosaves[2]).unwrap();
    assert_eq!(save.player.frame_number, 30);
    assert_eq!(save.metadata.session, "test_run");
}

#[test]
fn loading_a_save_continues_identically() {
    let temp = tempdir().unwrap();
    let config = GameConfig {
        seed: 31,
        asphalt_frequency: 0.25,
        ..GameConfig::default()
    };
    let walk = |frame: u64| InputIntent {
        right: frame % 3 != 0,
        down: frame % 5 == 0,
        pave: true,
        ..InputIntent::default()
    };

    // One uninterrupted run of 200 frames.
    let mut straight = Session::new(&config);
    let mut engine = EngineBuilder::new(settings(&config)).build();
    engine.run(&mut straight, &mut walk.clone(), 200).unwrap();

    // The same run split by a save file.
    let mut first = Session::new(&config);
    engine.run(&mut first, &mut walk.clone(), 120).unwrap();
    let path = temp.path().join("mid.json");
    SaveGame::capture("test_run", first.world())
        .write_to(&path)
        .unwrap();
    let mut second = Session::resume(&config, SaveGame::read_from(&path).unwrap().into_world());
    engine.run(&mut second, &mut walk.clone(), 80).unwrap();

    assert_eq!(second.world().player, straight.world().player);
    assert_eq!(
        second.world().landscape.tiles(),
        straight.world().landscape.tiles()
    );
}
