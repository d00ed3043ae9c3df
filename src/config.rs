use std::path::PathBuf;

/// Crate-level constants
pub const APP_NAME: &str = "Cento";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the fine-to-coarse POS mapping table. Persisted alongside
/// each fragment so an auditing layer can detect mapping drift.
pub const SHAPE_MAPPING_VERSION: i64 = 1;

/// Default span range for the shape classifier (tokens per fragment).
pub const DEFAULT_MIN_FRAG: usize = 1;
pub const DEFAULT_MAX_FRAG: usize = 7;

/// Get the application data directory
/// ~/Cento/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Cento")
}

/// Default location of the SQLite corpus database
pub fn default_corpus_path() -> PathBuf {
    app_data_dir().join("corpus.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Cento"));
    }

    #[test]
    fn corpus_path_under_app_data() {
        let corpus = default_corpus_path();
        let app = app_data_dir();
        assert!(corpus.starts_with(app));
        assert!(corpus.ends_with("corpus.db"));
    }

    #[test]
    fn fragment_range_is_sane() {
        assert!(DEFAULT_MIN_FRAG >= 1);
        assert!(DEFAULT_MIN_FRAG <= DEFAULT_MAX_FRAG);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
