/// Errors from starting or stopping the ticker thread
#[derive(Debug)]
pub enum RuntimeError {
    /// The OS refused to start the ticker thread
    Spawn(std::io::Error),
    /// The ticker thread panicked before it could be joined
    TickerPanicked,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::Spawn(err) => write!(f, "failed to spawn ticker thread: {}", err),
            RuntimeError::TickerPanicked => write!(f, "ticker thread panicked"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Spawn(err) => Some(err),
            RuntimeError::TickerPanicked => None,
        }
    }
}
