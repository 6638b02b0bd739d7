use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("cannot write image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A surface closure failed while a hit was being shaded.
    #[error(transparent)]
    Surface(#[from] gml_lang::Error),
}

/// Surface failures keep their own classification; everything else is
/// reported as a render failure.
impl From<RenderError> for gml_lang::Error {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Surface(inner) => inner,
            other => gml_lang::Error::Render(other.to_string()),
        }
    }
}
