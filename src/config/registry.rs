//! String id → enum tables for every named option a config can carry.
//!
//! Lookups happen once, when a [`BackingTrackConfig`](super::BackingTrackConfig)
//! is resolved into [`RenderSettings`](super::RenderSettings). The render loops
//! only ever see the enums.

use tracing::warn;

use crate::effects::Modulation;
use crate::error::ConfigWarning;
use crate::render::patterns::{AccentPattern, Articulation, AttackStyle, BassStyle, RhythmPattern};
use crate::theory::Style;

/// Which warning an unknown id produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Pattern,
    Style,
}

pub trait Registry: Copy + Sized + 'static {
    /// Table name used in warnings.
    const TABLE: &'static str;
    const KIND: IdKind;
    const ALL: &'static [Self];

    fn id(self) -> &'static str;

    /// Case-insensitive lookup.
    fn lookup(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|entry| entry.id().eq_ignore_ascii_case(id))
    }
}

/// All ids of a table, in declaration order.
pub fn ids<T: Registry>() -> impl Iterator<Item = &'static str> {
    T::ALL.iter().map(|entry| entry.id())
}

/// Look up `id`, or record a warning and return `fallback`.
pub fn resolve<T: Registry>(id: &str, fallback: T, warnings: &mut Vec<ConfigWarning>) -> T {
    resolve_in(T::TABLE, id, fallback, warnings)
}

/// As [`resolve`], reporting under a caller-chosen table name. Used when one
/// enum backs two options (progression style and amp style).
pub fn resolve_in<T: Registry>(
    table: &'static str,
    id: &str,
    fallback: T,
    warnings: &mut Vec<ConfigWarning>,
) -> T {
    if let Some(found) = T::lookup(id) {
        return found;
    }

    warn!(table, id, fallback = fallback.id(), "unknown id, using fallback");
    let warning = match T::KIND {
        IdKind::Pattern => ConfigWarning::UnknownPatternId {
            table,
            id: id.to_string(),
            fallback: fallback.id(),
        },
        IdKind::Style => ConfigWarning::UnknownStyleId {
            table,
            id: id.to_string(),
            fallback: fallback.id(),
        },
    };
    warnings.push(warning);
    fallback
}

impl Registry for Style {
    const TABLE: &'static str = "style";
    const KIND: IdKind = IdKind::Style;
    const ALL: &'static [Self] = &[
        Style::Rock,
        Style::Blues,
        Style::Metal,
        Style::MetalReference,
        Style::Punk,
        Style::Grunge,
        Style::Djent,
    ];

    fn id(self) -> &'static str {
        match self {
            Style::Rock => "rock",
            Style::Blues => "blues",
            Style::Metal => "metal",
            Style::MetalReference => "metal_reference",
            Style::Punk => "punk",
            Style::Grunge => "grunge",
            Style::Djent => "djent",
        }
    }
}

impl Registry for RhythmPattern {
    const TABLE: &'static str = "rhythm";
    const KIND: IdKind = IdKind::Pattern;
    const ALL: &'static [Self] = &[
        RhythmPattern::Straight,
        RhythmPattern::Syncopated,
        RhythmPattern::Triplet,
        RhythmPattern::Gallop,
        RhythmPattern::Staccato,
        RhythmPattern::Tremolo,
    ];

    fn id(self) -> &'static str {
        match self {
            RhythmPattern::Straight => "straight",
            RhythmPattern::Syncopated => "syncopated",
            RhythmPattern::Triplet => "triplet",
            RhythmPattern::Gallop => "gallop",
            RhythmPattern::Staccato => "staccato",
            RhythmPattern::Tremolo => "tremolo",
        }
    }
}

impl Registry for AccentPattern {
    const TABLE: &'static str = "accent";
    const KIND: IdKind = IdKind::Pattern;
    const ALL: &'static [Self] = &[
        AccentPattern::None,
        AccentPattern::Downbeat,
        AccentPattern::Backbeat,
        AccentPattern::Buildup,
    ];

    fn id(self) -> &'static str {
        match self {
            AccentPattern::None => "none",
            AccentPattern::Downbeat => "downbeat",
            AccentPattern::Backbeat => "backbeat",
            AccentPattern::Buildup => "buildup",
        }
    }
}

impl Registry for Articulation {
    const TABLE: &'static str = "articulation";
    const KIND: IdKind = IdKind::Pattern;
    const ALL: &'static [Self] = &[
        Articulation::PalmMute,
        Articulation::Staccato,
        Articulation::Legato,
    ];

    fn id(self) -> &'static str {
        match self {
            Articulation::PalmMute => "palm_mute",
            Articulation::Staccato => "staccato",
            Articulation::Legato => "legato",
        }
    }
}

impl Registry for AttackStyle {
    const TABLE: &'static str = "attack";
    const KIND: IdKind = IdKind::Pattern;
    const ALL: &'static [Self] = &[AttackStyle::Aggressive, AttackStyle::Natural, AttackStyle::Soft];

    fn id(self) -> &'static str {
        match self {
            AttackStyle::Aggressive => "aggressive",
            AttackStyle::Natural => "natural",
            AttackStyle::Soft => "soft",
        }
    }
}

impl Registry for Modulation {
    const TABLE: &'static str = "modulation";
    const KIND: IdKind = IdKind::Pattern;
    const ALL: &'static [Self] = &[
        Modulation::None,
        Modulation::Phaser,
        Modulation::Flanger,
        Modulation::Chorus,
    ];

    fn id(self) -> &'static str {
        match self {
            Modulation::None => "none",
            Modulation::Phaser => "phaser",
            Modulation::Flanger => "flanger",
            Modulation::Chorus => "chorus",
        }
    }
}

impl Registry for BassStyle {
    const TABLE: &'static str = "bass style";
    const KIND: IdKind = IdKind::Pattern;
    const ALL: &'static [Self] = &[
        BassStyle::Root,
        BassStyle::Eighth,
        BassStyle::Fifth,
        BassStyle::Octave,
        BassStyle::Walking,
    ];

    fn id(self) -> &'static str {
        match self {
            BassStyle::Root => "root",
            BassStyle::Eighth => "eighth",
            BassStyle::Fifth => "fifth",
            BassStyle::Octave => "octave",
            BassStyle::Walking => "walking",
        }
    }
}
