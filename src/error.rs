use std::path::PathBuf;

/// Failures while loading, rendering or building a site.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required directory or file is missing: the site itself, `config.yaml` or `pages/`.
    #[error("`{}` does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid config `{}`", path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: brage_config::Status,
    },

    /// A template failed to parse or evaluate; `route` names the page or post.
    #[error("failed to render `{route}`")]
    RenderFailure {
        route: String,
        #[source]
        source: crate::template::Error,
    },

    #[error("failed to access `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
