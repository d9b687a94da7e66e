//! Error types for the analysis engine

use thiserror::Error;

use crate::analyzer::{CssStageError, JsStageError};

/// Errors that can occur while running an analysis
#[derive(Error, Debug)]
pub enum EngineError {
    /// Stylesheet track failed
    #[error("Stylesheet analysis failed: {0}")]
    CssStage(#[from] CssStageError),

    /// Script track failed
    #[error("Script analysis failed: {0}")]
    JsStage(#[from] JsStageError),
}

impl EngineError {
    /// Stage that produced the error
    pub fn stage(&self) -> super::Stage {
        match self {
            Self::CssStage(_) => super::Stage::Css,
            Self::JsStage(_) => super::Stage::Js,
        }
    }
}
