//! CLI failures and the exit code each one maps to.
//!
//! | code | meaning |
//! |---|---|
//! | 0  | success |
//! | 2  | clap rejected the arguments (before `run`) |
//! | 10 | the field refused to build or step: dimensions, options, lattice size |
//! | 11 | reading or writing a file: PNG, seed file |
//! | 12 | malformed user input: `--params`, `--drag`, seed file contents |
//! | 13 | encoding JSON output |

use wave_field_core::WaveError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Field(WaveError),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Input(String),
    #[error("cannot encode JSON output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Field(_) => 10,
            Self::Io(_) => 11,
            Self::Input(_) => 12,
            Self::Serialization(_) => 13,
        }
    }
}

/// File failures surfaced by the field crates count as I/O, not as field errors.
impl From<WaveError> for CliError {
    fn from(e: WaveError) -> Self {
        match e {
            WaveError::Io(msg) => Self::Io(msg),
            other => Self::Field(other),
        }
    }
}
