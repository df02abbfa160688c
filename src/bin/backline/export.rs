//! WAV and text writers for render artifacts.

use std::fmt::Write as _;
use std::path::Path;

use backline::mixdown::StereoBuffer;
use backline::notation::{MidiPerformance, TabMeasure};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use hound::{SampleFormat, WavSpec, WavWriter};

fn spec(channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate: backline::SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

fn write_samples(path: &Path, channels: u16, samples: impl Iterator<Item = f32>) -> Result<()> {
    let mut writer = WavWriter::create(path, spec(channels))
        .wrap_err_with(|| format!("creating {}", path.display()))?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

pub fn write_mono(path: &Path, samples: &[f32]) -> Result<()> {
    write_samples(path, 1, samples.iter().copied())
}

pub fn write_stereo(path: &Path, buffer: &StereoBuffer) -> Result<()> {
    write_samples(path, 2, buffer.interleaved())
}

/// High to low, matching tab string numbers 1 to 6.
const STRING_NAMES: [&str; 6] = ["e", "B", "G", "D", "A", "E"];

/// Six-line ASCII tab, one column per measure.
pub fn tab_text(measures: &[TabMeasure]) -> String {
    let mut text = String::new();
    for (string, name) in STRING_NAMES.iter().enumerate() {
        let number = string as u8 + 1;
        let _ = write!(text, "{name}|");
        for measure in measures {
            let cell = measure
                .notes
                .iter()
                .find(|note| note.string == number)
                .map(|note| note.fret.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(text, "-{cell:-<3}|");
        }
        text.push('\n');
    }
    text
}

/// One line per note: start beat, length, MIDI note, velocity.
pub fn note_list(midi: &MidiPerformance) -> String {
    let mut text = format!("tempo {} bpm, program {}\n", midi.tempo_bpm, midi.program);
    for note in &midi.notes {
        let _ = writeln!(
            text,
            "{:>7.2} {:>5.2} {:>3} {:>3}",
            note.start_beat, note.duration_beats, note.note, note.velocity
        );
    }
    text
}
