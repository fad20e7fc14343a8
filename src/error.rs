use thiserror::Error;

use crate::config::ConfigError;
use crate::render::RenderError;
use crate::sources::SourceError;

/// Failures that stop a ranking run before or after the pass itself.
///
/// Collaborator failures during the pass are not here; they fall back.
#[derive(Error, Debug)]
pub enum RankerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not set up data source: {0}")]
    Source(#[from] SourceError),

    #[error("Could not render ranking: {0}")]
    Render(#[from] RenderError),

    #[error("No patient ids given")]
    NoPatients,
}

/// Upper bound on the upstream error text carried in errors and logs.
pub const MAX_UPSTREAM_BODY_BYTES: usize = 512;

/// Keep at most [`MAX_UPSTREAM_BODY_BYTES`] of an error body, cut on a char boundary.
pub(crate) fn truncate_upstream_body(mut body: String) -> String {
    if body.len() > MAX_UPSTREAM_BODY_BYTES {
        let mut end = MAX_UPSTREAM_BODY_BYTES;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}
