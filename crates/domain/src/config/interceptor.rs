use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterceptorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Prefix of the remote-backed dataset paths that are eligible for redirection.
    #[serde(default = "default_dir")]
    pub root_dir: String,

    /// Local directory mirroring `root_dir` contents.
    #[serde(default = "default_dir")]
    pub cache_dir: String,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root_dir: default_dir(),
            cache_dir: default_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_dir() -> String {
    "/tmp".to_string()
}
