use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the model artifact directory.
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";

/// Where the model volume is mounted when running in a container.
const CONTAINER_MODEL_DIR: &str = "/app/emotion_model_final";

/// Directory name probed next to the executable for local development.
const LOCAL_MODEL_DIR: &str = "emotion_model_final";

/// Resolves the model artifact directory.
///
/// Precedence: explicit override (CLI), `MODEL_PATH` environment variable,
/// the container mount point if it exists, then a directory beside the
/// executable. The returned path is not required to exist; loading reports
/// missing artifacts on its own.
pub fn resolve_model_dir(overridden: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = overridden {
        return dir;
    }

    if let Ok(dir) = env::var(MODEL_PATH_ENV) {
        return PathBuf::from(dir);
    }

    let container_dir = Path::new(CONTAINER_MODEL_DIR);
    if container_dir.exists() {
        return container_dir.to_path_buf();
    }

    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LOCAL_MODEL_DIR)))
        .unwrap_or_else(|| PathBuf::from(LOCAL_MODEL_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test; parallel tests sharing MODEL_PATH would race.
    #[test]
    fn test_resolution_precedence() {
        env::set_var(MODEL_PATH_ENV, "/tmp/from-env");
        let dir = resolve_model_dir(Some(PathBuf::from("/tmp/from-cli")));
        assert_eq!(dir, PathBuf::from("/tmp/from-cli"));

        env::set_var(MODEL_PATH_ENV, "/tmp/test-model-dir");
        let dir = resolve_model_dir(None);
        assert_eq!(dir, PathBuf::from("/tmp/test-model-dir"));
        env::remove_var(MODEL_PATH_ENV);

        let dir = resolve_model_dir(None);
        assert!(dir.to_str().unwrap().contains("emotion_model_final"));
    }
}
