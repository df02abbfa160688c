use thiserror::Error;

use crate::dsp::FilterSpecError;

/// Fatal render failures. A render that returns one of these produced no
/// audio.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid pitch class `{name}`")]
    InvalidPitchClass { name: String },

    #[error("invalid configuration: `{parameter}` {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },

    #[error("invalid filter in {stage}: {source}")]
    InvalidFilterSpec {
        stage: &'static str,
        #[source]
        source: FilterSpecError,
    },
}

impl RenderError {
    pub(crate) fn config(parameter: &'static str, reason: impl Into<String>) -> Self {
        RenderError::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn filter(stage: &'static str) -> impl FnOnce(FilterSpecError) -> Self {
        move |source| RenderError::InvalidFilterSpec { stage, source }
    }
}

/// Non-fatal lookups that fell back to a default id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("unknown {table} pattern `{id}`, using `{fallback}`")]
    UnknownPatternId {
        table: &'static str,
        id: String,
        fallback: &'static str,
    },

    #[error("unknown {table} `{id}`, using `{fallback}`")]
    UnknownStyleId {
        table: &'static str,
        id: String,
        fallback: &'static str,
    },
}
