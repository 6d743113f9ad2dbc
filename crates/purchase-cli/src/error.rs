use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Purchase(#[from] purchase_operations::PurchaseError),

    #[error("failed to read scenario file '{path}'")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario file '{path}'")]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no scenarios defined in '{0}'")]
    NoScenarios(PathBuf),

    #[error("failed to serialize output")]
    Json(#[from] serde_json::Error),

    #[error("purchase rolled back")]
    RolledBack(#[source] purchase_saga::SagaError),

    #[error("{failed} of {total} scenario(s) did not end as expected")]
    UnexpectedOutcomes { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;
