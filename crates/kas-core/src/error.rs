use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read regions file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse regions file: {0}")]
    RegionsFileParse(#[source] serde_yaml::Error),

    #[error("region validation failed: {0}")]
    Validation(String),

    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}
