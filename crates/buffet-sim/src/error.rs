use buffet_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid scenario or workload configuration — rejected before the run
    /// starts; the engine itself has no runtime failure paths.
    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
