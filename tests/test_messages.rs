use std::path::PathBuf;

use clap::Parser;

use asteroids_reloaded::config::*;
use asteroids_reloaded::context::RenderMode;
use asteroids_reloaded::error::GameError;
use asteroids_reloaded::messages::Messages;

use pretty_assertions::assert_eq;

#[test]
fn builtin_bundle_has_the_hud_strings() {
    let messages = Messages::builtin();
    assert_eq!(messages.lookup("paused"), "PAUSED");
    assert_eq!(messages.lookup("wave"), "Wave");
    assert_eq!(messages.lookup("game-over"), "GAME OVER");
    assert_eq!(messages.lookup("powerup-smart-bomb"), "Smart Bomb!");
}

#[test]
fn unknown_id_falls_back_to_itself() {
    assert_eq!(Messages::builtin().lookup("no-such-key"), "no-such-key");
    assert_eq!(Messages::empty().lookup("paused"), "paused");
}

#[test]
fn merge_overrides_and_skips_malformed_lines() {
    let mut messages = Messages::builtin();
    messages.merge("paused=EN PAUSE\r\nnot a pair\n=orphan\nempty=\nformula=a=b\n");
    assert_eq!(messages.lookup("paused"), "EN PAUSE");
    assert_eq!(messages.lookup("empty"), "empty");
    assert_eq!(messages.lookup("formula"), "a=b");
    assert_eq!(messages.lookup("wave"), "Wave");
}

#[test]
fn load_layers_a_file_over_english() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("de.txt");
    std::fs::write(&path, "wave=Welle\n").expect("write");

    let messages = Messages::load(&path).expect("load");
    assert_eq!(messages.lookup("wave"), "Welle");
    assert_eq!(messages.lookup("paused"), "PAUSED");
}

#[test]
fn load_of_missing_file_is_an_error() {
    let path = PathBuf::from("definitely/not/here.txt");
    match Messages::load(&path) {
        Err(GameError::Messages { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected a bundle error, got {other:?}"),
    }
}

// ── Options ───────────────────────────────────────────────────────────────────

#[test]
fn defaults_match_the_classic_game() {
    let opts = Options::try_parse_from(["asteroids"]).expect("parse");
    assert_eq!(opts.width, 640.0);
    assert_eq!(opts.height, 640.0);
    assert_eq!(opts.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    assert!(!opts.debug);
    assert_eq!(opts.seed, None);
}

#[test]
fn flags_become_context_settings() {
    let opts = Options::try_parse_from([
        "asteroids",
        "--seed",
        "42",
        "--vector",
        "--mute",
        "--debug",
        "--invincible",
        "--show-radius",
        "--no-background",
        "--autofire",
    ])
    .expect("parse");
    assert_eq!(opts.seed, Some(42));

    let flags = opts.debug_flags();
    assert!(flags.enabled && flags.invincible && flags.collision_radius);
    assert!(flags.no_background && flags.autofire);

    let ctx = opts.into_context().expect("context");
    assert_eq!(ctx.render_mode, RenderMode::Vector);
    assert!(!ctx.sound_enabled);
    assert!(ctx.debug.autofire);
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(Options::try_parse_from(["asteroids", "--warp-drive"]).is_err());
}

#[test]
fn missing_locale_falls_back_to_english() {
    let opts = Options { locale: Some("xx-missing".into()), ..Options::default() };
    let messages = opts.load_messages().expect("fallback");
    assert_eq!(messages.lookup("paused"), "PAUSED");
}

#[test]
fn explicit_bundle_must_exist() {
    let opts = Options { messages: Some(PathBuf::from("definitely/not/here.txt")), ..Options::default() };
    assert!(opts.load_messages().is_err());
    assert!(opts.into_context().is_err());
}

#[test]
fn explicit_bundle_wins_over_locale() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.txt");
    std::fs::write(&path, "paused=HOLD\n").expect("write");

    let opts = Options {
        locale: Some("xx-missing".into()),
        messages: Some(path),
        ..Options::default()
    };
    assert_eq!(opts.load_messages().expect("load").lookup("paused"), "HOLD");
}

#[test]
fn same_seed_gives_same_context_rng() {
    use rand::Rng;
    let opts = Options { seed: Some(9), ..Options::default() };
    let a: u64 = opts.rng().gen();
    let b: u64 = opts.rng().gen();
    assert_eq!(a, b);
}

#[test]
fn score_file_flag_picks_the_store_path() {
    let opts = Options::try_parse_from(["asteroids", "--score-file", "/tmp/hs"]).expect("parse");
    assert_eq!(opts.score_store().path(), PathBuf::from("/tmp/hs").as_path());
}

#[test]
fn shipped_french_bundle_loads_by_locale() {
    let opts = Options { locale: Some("fr".into()), ..Options::default() };
    let messages = opts.load_messages().expect("load");
    assert_eq!(messages.lookup("paused"), "PAUSE");
    // untranslated ids keep the English text
    assert_eq!(messages.lookup("powerup-rear-gun"), "Rear Gun!");
}

#[test]
fn playfield_size_must_be_finite_and_big_enough() {
    for bad in ["150", "0", "-640", "NaN", "inf", "wide"] {
        assert!(
            Options::try_parse_from(["asteroids", "--width", bad]).is_err(),
            "--width {bad} should be rejected"
        );
    }
    assert!(Options::try_parse_from(["asteroids", "--height", "100"]).is_err());

    let opts = Options::try_parse_from(["asteroids", "--width", "800", "--height", "320"]).expect("parse");
    assert_eq!((opts.width, opts.height), (800.0, MIN_PLAYFIELD));
    assert_eq!(parse_dimension("640"), Ok(640.0));
}
