use backline::amp::AmpProfile;
use backline::analysis::energy_profile;
use backline::dsp::mix;
use backline::theory::Style;
use backline::{
    render, BackingTrackConfig, BassConfig, ConfigWarning, RenderError, RenderSettings, SAMPLE_RATE,
};

fn config(key: &str, style: &str, bpm: u32, bars: u32) -> BackingTrackConfig {
    BackingTrackConfig {
        key: key.to_string(),
        style: style.to_string(),
        bpm,
        bars,
        ..BackingTrackConfig::default()
    }
}

fn with_bass(config: BackingTrackConfig) -> BackingTrackConfig {
    BackingTrackConfig {
        bass: BassConfig {
            enabled: true,
            ..BassConfig::default()
        },
        ..config
    }
}

#[test]
fn metal_in_a_two_bars() {
    let artifacts = render(&config("A", "metal", 140, 2)).unwrap();

    let roots: Vec<u8> = artifacts.events.iter().map(|e| e.root).collect();
    assert_eq!(roots, vec![45, 41]);
    assert!(artifacts.events.iter().all(|e| e.duration_beats == 4));

    assert_eq!(artifacts.raw_guitar.len(), 151_200);
    assert_eq!(artifacts.guitar.left.len(), 151_200);
    assert_eq!(artifacts.guitar.right.len(), 151_200);
    assert!(artifacts.bass.is_none());
}

#[test]
fn rock_in_e_follows_one_four_five_one() {
    let artifacts = render(&config("E", "rock", 120, 4)).unwrap();
    let roots: Vec<u8> = artifacts.events.iter().map(|e| e.root).collect();
    assert_eq!(roots, vec![40, 45, 47, 40]);
    assert_eq!(artifacts.settings.style, Style::Rock);
    assert_eq!(artifacts.raw_guitar.len(), 4 * 4 * 22_050);
}

#[test]
fn identical_settings_render_identical_audio() {
    let cfg = with_bass(config("D", "punk", 180, 2));
    let first = render(&cfg).unwrap();
    let second = render(&cfg).unwrap();
    assert_eq!(first, second);

    let reseeded = render(&BackingTrackConfig { seed: 7, ..cfg }).unwrap();
    assert_ne!(first.raw_guitar, reseeded.raw_guitar);
}

#[test]
fn unknown_rhythm_renders_like_straight() {
    let straight = render(&config("G", "rock", 160, 1)).unwrap();
    let unknown = render(&BackingTrackConfig {
        rhythm: "bossa".to_string(),
        ..config("G", "rock", 160, 1)
    })
    .unwrap();

    assert_eq!(straight.raw_guitar, unknown.raw_guitar);
    assert_eq!(straight.amp_guitar, unknown.amp_guitar);
    assert!(straight.settings.warnings.is_empty());
    assert_eq!(
        unknown.settings.warnings,
        vec![ConfigWarning::UnknownPatternId {
            table: "rhythm",
            id: "bossa".to_string(),
            fallback: "straight",
        }]
    );
}

#[test]
fn unknown_accent_renders_like_downbeat() {
    let downbeat = render(&BackingTrackConfig {
        accent: "downbeat".to_string(),
        ..config("G", "rock", 160, 1)
    })
    .unwrap();
    let unknown = render(&BackingTrackConfig {
        accent: "swing".to_string(),
        ..config("G", "rock", 160, 1)
    })
    .unwrap();

    assert_eq!(downbeat.raw_guitar, unknown.raw_guitar);
    assert_eq!(downbeat.amp_guitar, unknown.amp_guitar);
    assert!(downbeat.settings.warnings.is_empty());
    assert_eq!(
        unknown.settings.warnings,
        vec![ConfigWarning::UnknownPatternId {
            table: "accent",
            id: "swing".to_string(),
            fallback: "downbeat",
        }]
    );
}

#[test]
fn unknown_style_plays_rock_through_metal_amp() {
    let unknown_config = config("E", "polka", 240, 4);

    let settings = RenderSettings::resolve(&unknown_config).unwrap();
    assert_eq!(settings.style, Style::Rock);
    assert_eq!(settings.amp, AmpProfile::METAL);
    assert_eq!(
        settings.warnings,
        vec![
            ConfigWarning::UnknownStyleId {
                table: "style",
                id: "polka".to_string(),
                fallback: "rock",
            },
            ConfigWarning::UnknownStyleId {
                table: "amp style",
                id: "polka".to_string(),
                fallback: "metal",
            },
        ]
    );

    let unknown = render(&unknown_config).unwrap();
    let roots: Vec<u8> = unknown.events.iter().map(|e| e.root).collect();
    assert_eq!(roots, vec![40, 45, 47, 40]);
    assert_eq!(unknown.settings.warnings, settings.warnings);

    // Same audio as asking for rock with the metal amp by name.
    let explicit = render(&BackingTrackConfig {
        amp_style: Some("metal".to_string()),
        ..config("E", "rock", 240, 4)
    })
    .unwrap();
    assert!(explicit.settings.warnings.is_empty());
    assert_eq!(unknown.raw_guitar, explicit.raw_guitar);
    assert_eq!(unknown.amp_guitar, explicit.amp_guitar);
}

#[test]
fn full_mix_is_bounded_and_audible() {
    let artifacts = render(&with_bass(config("E", "metal", 120, 2))).unwrap();
    let bass = artifacts.bass.as_ref().unwrap();

    let peak = bass.mix.peak();
    assert!((peak - 0.95).abs() < 1e-4, "mix peak {peak}");
    assert!(mix::rms(&bass.mix.left) > 0.01);
    assert!(bass.mix.left.iter().chain(&bass.mix.right).all(|x| x.is_finite()));
    assert!((mix::peak(&bass.processed) - 0.85).abs() < 1e-4);
}

#[test]
fn metal_amp_output_is_mid_forward() {
    let artifacts = render(&config("E", "metal", 120, 2)).unwrap();
    let profile = energy_profile(&artifacts.amp_guitar, SAMPLE_RATE as f32);
    assert!(profile.is_mid_forward(), "{profile}");
    assert!(artifacts.amp_guitar.iter().all(|x| x.abs() <= 1.0));
}

#[test]
fn bad_key_is_rejected_before_rendering() {
    let err = render(&config("X#", "metal", 120, 1)).unwrap_err();
    assert_eq!(
        err,
        RenderError::InvalidPitchClass {
            name: "X#".to_string()
        }
    );
}

#[test]
fn every_style_renders() {
    for style in [
        "rock",
        "blues",
        "metal",
        "metal_reference",
        "punk",
        "grunge",
        "djent",
    ] {
        let artifacts = render(&config("C", style, 240, 1)).unwrap();
        assert!(artifacts.settings.warnings.is_empty(), "{style}");
        assert_eq!(artifacts.raw_guitar.len(), 44_100, "{style}");
        assert!(mix::peak(&artifacts.amp_guitar) > 0.0, "{style}");
    }
}
