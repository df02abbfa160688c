//! Playing-style parameter tables shared by the guitar and bass renderers.

/// Per-subdivision duration multipliers for the guitar strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RhythmPattern {
    Straight,
    Syncopated,
    Triplet,
    Gallop,
    Staccato,
    Tremolo,
}

impl RhythmPattern {
    pub fn multipliers(self) -> &'static [f32] {
        match self {
            RhythmPattern::Straight => &[1.0; 8],
            RhythmPattern::Syncopated => &[1.5, 0.5, 1.0, 1.0, 1.5, 0.5, 1.0, 1.0],
            RhythmPattern::Triplet => &[0.67, 0.67, 0.66, 0.67, 0.67, 0.66, 0.67, 0.67, 0.66],
            RhythmPattern::Gallop => &[0.5, 0.5, 1.0, 0.5, 0.5, 1.0, 0.5, 0.5, 1.0, 0.5, 0.5, 1.0],
            RhythmPattern::Staccato => &[0.3, 0.7, 0.3, 0.7, 0.3, 0.7, 0.3, 0.7],
            RhythmPattern::Tremolo => &[0.25; 32],
        }
    }

    /// Multiplier for subdivision `sub`, cycling the table.
    pub fn at(self, sub: usize) -> f32 {
        let table = self.multipliers();
        table[sub % table.len()]
    }
}

/// Per-subdivision velocity multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccentPattern {
    None,
    Downbeat,
    Backbeat,
    Buildup,
}

impl AccentPattern {
    pub fn multipliers(self) -> &'static [f32; 8] {
        match self {
            AccentPattern::None => &[1.0; 8],
            AccentPattern::Downbeat => &[1.2, 0.8, 1.0, 0.8, 1.2, 0.8, 1.0, 0.8],
            AccentPattern::Backbeat => &[0.8, 1.2, 0.8, 1.2, 0.8, 1.2, 0.8, 1.2],
            AccentPattern::Buildup => &[0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3],
        }
    }

    pub fn at(self, sub: usize) -> f32 {
        let table = self.multipliers();
        table[sub % table.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticulationProfile {
    /// Exponential decay rate, per second.
    pub decay_rate: f32,
    /// Fraction of the stroke after which the gate closes.
    pub gate_point: f32,
    /// String model brightness.
    pub brightness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Articulation {
    PalmMute,
    Staccato,
    Legato,
}

impl Articulation {
    pub fn profile(self) -> ArticulationProfile {
        match self {
            Articulation::PalmMute => ArticulationProfile {
                decay_rate: 12.0,
                gate_point: 0.7,
                brightness: 0.85,
            },
            Articulation::Staccato => ArticulationProfile {
                decay_rate: 18.0,
                gate_point: 0.5,
                brightness: 0.9,
            },
            Articulation::Legato => ArticulationProfile {
                decay_rate: 4.0,
                gate_point: 0.95,
                brightness: 0.7,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub duration_secs: f32,
    pub amplitude: f32,
    pub decay_exp: f32,
}

/// Pick attack character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackStyle {
    Aggressive,
    Natural,
    Soft,
}

impl AttackStyle {
    pub fn profile(self) -> AttackProfile {
        match self {
            AttackStyle::Aggressive => AttackProfile {
                duration_secs: 0.010,
                amplitude: 2.5,
                decay_exp: 0.3,
            },
            AttackStyle::Natural => AttackProfile {
                duration_secs: 0.025,
                amplitude: 1.5,
                decay_exp: 0.5,
            },
            AttackStyle::Soft => AttackProfile {
                duration_secs: 0.040,
                amplitude: 0.8,
                decay_exp: 0.7,
            },
        }
    }
}

/// Bass line shape. The table length is the number of subdivisions per
/// chord; a zero entry is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BassStyle {
    Root,
    Eighth,
    Fifth,
    Octave,
    Walking,
}

impl BassStyle {
    pub fn velocities(self) -> &'static [f32] {
        match self {
            BassStyle::Root => &[1.0],
            BassStyle::Eighth => &[1.0; 8],
            BassStyle::Fifth => &[1.0, 0.0, 0.8, 0.0],
            BassStyle::Octave => &[1.0, 0.0, 0.7, 0.0, 0.9, 0.0, 0.7, 0.0],
            BassStyle::Walking => &[1.0, 0.6, 0.7, 0.8],
        }
    }

    /// Semitones above the bass root played at subdivision `sub`.
    pub fn interval_at(self, sub: usize) -> u8 {
        match (self, sub) {
            (BassStyle::Fifth, 2) => 7,
            (BassStyle::Octave, 4) => 12,
            (BassStyle::Octave, 2) | (BassStyle::Octave, 6) => 7,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rhythm_tables_cycle() {
        assert_eq!(RhythmPattern::Gallop.at(0), 0.5);
        assert_eq!(RhythmPattern::Gallop.at(2), 1.0);
        assert_eq!(RhythmPattern::Gallop.at(14), 1.0);
        assert_eq!(RhythmPattern::Tremolo.multipliers().len(), 32);
    }

    #[test]
    fn test_accent_tables_cycle() {
        assert_eq!(AccentPattern::Downbeat.at(0), 1.2);
        assert_eq!(AccentPattern::Downbeat.at(9), 0.8);
        assert!(AccentPattern::None.multipliers().iter().all(|&a| a == 1.0));
    }

    #[test]
    fn test_articulation_ordering() {
        let palm = Articulation::PalmMute.profile();
        let staccato = Articulation::Staccato.profile();
        let legato = Articulation::Legato.profile();
        assert!(staccato.decay_rate > palm.decay_rate);
        assert!(legato.decay_rate < palm.decay_rate);
        assert!(legato.gate_point > palm.gate_point);
    }

    #[test]
    fn test_bass_intervals() {
        assert_eq!(BassStyle::Fifth.interval_at(2), 7);
        assert_eq!(BassStyle::Fifth.interval_at(0), 0);
        assert_eq!(BassStyle::Octave.interval_at(2), 7);
        assert_eq!(BassStyle::Octave.interval_at(4), 12);
        assert_eq!(BassStyle::Octave.interval_at(6), 7);
        assert_eq!(BassStyle::Walking.interval_at(2), 0);
    }

    #[test]
    fn test_bass_rests() {
        let rests = BassStyle::Octave.velocities().iter().filter(|&&v| v <= 0.0).count();
        assert_eq!(rests, 4);
        assert_eq!(BassStyle::Root.velocities().len(), 1);
    }
}
