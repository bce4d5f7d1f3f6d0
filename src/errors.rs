use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteGenError {
    #[error("{0}")] Validation(String),
    #[error("generation service error: {0}")] GenerationService(String),
    #[error("persistence error: {0}")] Persistence(String),
    #[error("{0}")] NotFound(String),
    #[error("config error: {0}")] Config(String),
}

pub type Result<T> = std::result::Result<T, SiteGenError>;

impl From<std::io::Error> for SiteGenError {
    fn from(e: std::io::Error) -> Self {
        SiteGenError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for SiteGenError {
    fn from(e: serde_json::Error) -> Self {
        SiteGenError::Persistence(format!("invalid record data: {e}"))
    }
}

impl From<zip::result::ZipError> for SiteGenError {
    fn from(e: zip::result::ZipError) -> Self {
        SiteGenError::Persistence(format!("archive write failed: {e}"))
    }
}

impl From<tempfile::PersistError> for SiteGenError {
    fn from(e: tempfile::PersistError) -> Self {
        SiteGenError::Persistence(format!("atomic rename failed: {}", e.error))
    }
}

impl From<reqwest::Error> for SiteGenError {
    fn from(e: reqwest::Error) -> Self {
        SiteGenError::GenerationService(e.to_string())
    }
}
