/// Core error type.
///
/// Adapter crates map their transport errors into `External` so the binary
/// can report every failure through one type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
