use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Required column '{column}' missing from {table} table")]
    MissingColumn { table: String, column: String },

    #[error("The {0} table contains no data rows")]
    EmptyTable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MappingError>;
