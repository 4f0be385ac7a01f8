//! Advanced engine capability probe

use serde::Serialize;

const ENGINE_NAME: &str = "prophet";

/// Availability of the advanced structural-model engine
///
/// Probed once at process startup and injected into the [`Forecaster`]
/// as an immutable capability; requests never re-check it.
///
/// [`Forecaster`]: crate::forecaster::Forecaster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    /// Whether the engine can fit models in this build
    pub available: bool,
    /// Name of the engine backing the advanced method
    pub engine: &'static str,
    /// Reason the engine is unavailable, when it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl EngineStatus {
    /// Probe what the compiled feature set provides
    pub fn probe() -> Self {
        #[cfg(feature = "prophet")]
        {
            Self::enabled()
        }
        #[cfg(not(feature = "prophet"))]
        {
            Self::disabled("built without the `prophet` feature")
        }
    }

    /// Status reporting an operational engine
    pub fn enabled() -> Self {
        Self {
            available: true,
            engine: ENGINE_NAME,
            detail: None,
        }
    }

    /// Status reporting an unavailable engine
    pub fn disabled<S: Into<String>>(reason: S) -> Self {
        Self {
            available: false,
            engine: ENGINE_NAME,
            detail: Some(reason.into()),
        }
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::probe()
    }
}
