//! Render errors for the script injector.

use polyboot_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Unsupported context: {0}")]
    UnsupportedContext(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
