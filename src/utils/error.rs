use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("{message}")]
    NotFoundError { message: String },

    #[error("{message}")]
    CapacityError { message: String },

    #[error("{message}")]
    InsufficientCombatantsError { message: String },

    #[error("{message}")]
    RandomSourceError { message: String },

    #[error("Random backend request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl ArenaError {
    /// HTTP-class status code a transport should attach to this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ValidationError { .. } => 400,
            Self::NotFoundError { .. } => 404,
            Self::CapacityError { .. } | Self::InsufficientCombatantsError { .. } => 409,
            Self::RandomSourceError { .. } | Self::ApiError(_) => 502,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArenaError>;
