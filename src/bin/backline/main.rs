//! backline - render a backing track to WAV files
//!
//! Run with: cargo run -- [CONFIG.toml] [--out DIR]
//!
//! Without a config file the default metal track in E is rendered.

mod export;

use std::fs;
use std::path::PathBuf;

use backline::analysis::SpectrumAnalyzer;
use backline::config::registry::ids;
use backline::effects::Modulation;
use backline::notation;
use backline::render::patterns::{AccentPattern, Articulation, AttackStyle, BassStyle, RhythmPattern};
use backline::theory::Style;
use backline::BackingTrackConfig;
use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::info;

#[derive(Parser)]
#[command(name = "backline")]
#[command(about = "Render a guitar and bass backing track to WAV files", long_about = None)]
struct Cli {
    /// TOML config file (default: metal in E)
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "out")]
    out: PathBuf,

    /// Override the config's random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the accepted ids for every named option and exit
    #[arg(long)]
    list_ids: bool,
}

fn print_ids() {
    let table = |name: &str, ids: Vec<&str>| println!("{name:<13} {}", ids.join(", "));
    table("style", ids::<Style>().collect());
    table("rhythm", ids::<RhythmPattern>().collect());
    table("accent", ids::<AccentPattern>().collect());
    table("articulation", ids::<Articulation>().collect());
    table("attack", ids::<AttackStyle>().collect());
    table("modulation", ids::<Modulation>().collect());
    table("bass.style", ids::<BassStyle>().collect());
}

fn load_config(path: Option<&PathBuf>) -> Result<BackingTrackConfig> {
    let Some(path) = path else {
        return Ok(BackingTrackConfig::default());
    };
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).wrap_err_with(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.list_ids {
        print_ids();
        return Ok(());
    }

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    let artifacts = backline::render(&config)?;

    fs::create_dir_all(&cli.out).wrap_err_with(|| format!("creating {}", cli.out.display()))?;
    let out = |name: &str| cli.out.join(name);

    export::write_mono(&out("guitar_raw.wav"), &artifacts.raw_guitar)?;
    export::write_stereo(&out("guitar_amp.wav"), &artifacts.guitar)?;
    if let Some(bass) = &artifacts.bass {
        export::write_mono(&out("bass_raw.wav"), &bass.raw)?;
        export::write_mono(&out("bass_amp.wav"), &bass.processed)?;
        export::write_stereo(&out("mix.wav"), &bass.mix)?;
    }

    let settings = &artifacts.settings;
    let tab = notation::tablature(&artifacts.events, settings.beats_per_bar);
    fs::write(out("tab.txt"), export::tab_text(&tab)).wrap_err("writing tablature")?;
    let midi = notation::MidiPerformance::from_events(&artifacts.events, settings.bpm);
    fs::write(out("notes.txt"), export::note_list(&midi)).wrap_err("writing note list")?;

    let mut analyzer = SpectrumAnalyzer::new(backline::SAMPLE_RATE as f32);
    println!("raw guitar  {}", analyzer.energy_profile(&artifacts.raw_guitar));
    println!("amp guitar  {}", analyzer.energy_profile(&artifacts.amp_guitar));
    if let Some(bass) = &artifacts.bass {
        println!("bass        {}", analyzer.energy_profile(&bass.processed));
    }
    for warning in &settings.warnings {
        println!("warning: {warning}");
    }

    info!(dir = %cli.out.display(), "wrote artifacts");
    Ok(())
}
