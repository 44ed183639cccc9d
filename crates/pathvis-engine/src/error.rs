use std::fmt;
use std::io;

/// Errors from parsing a delay specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelayError {
    /// The time unit is not one of ns, us, ms, s, min or h.
    UnknownUnit(String),
}

impl fmt::Display for DelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUnit(u) => write!(f, "unsupported delay unit \u{201c}{u}\u{201d}"),
        }
    }
}

impl std::error::Error for DelayError {}

/// Errors from starting or stopping an [`Engine`](crate::Engine).
#[derive(Debug)]
pub enum EngineError {
    /// The worker thread could not be spawned.
    Spawn(io::Error),
    /// A delay setting was invalid.
    Delay(DelayError),
    /// The worker thread panicked before it could be joined.
    WorkerPanicked,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "engine: cannot spawn worker: {e}"),
            Self::Delay(e) => write!(f, "engine: {e}"),
            Self::WorkerPanicked => f.write_str("engine: worker thread panicked"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            Self::Delay(e) => Some(e),
            Self::WorkerPanicked => None,
        }
    }
}

impl From<DelayError> for EngineError {
    fn from(e: DelayError) -> Self {
        Self::Delay(e)
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        Self::Spawn(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn messages() {
        let e = DelayError::UnknownUnit("fortnight".into());
        assert_eq!(e.to_string(), "unsupported delay unit \u{201c}fortnight\u{201d}");
        let e: EngineError = e.into();
        assert!(e.to_string().starts_with("engine: unsupported"));
        assert!(e.source().is_some());
        assert!(EngineError::WorkerPanicked.source().is_none());
    }
}
