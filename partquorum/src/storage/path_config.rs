pub struct PathConfig;

impl PathConfig {
    /// The single well-known path holding one table's encoded quorum state.
    pub fn quorum_status() -> String {
        "/quorum/status".to_string()
    }
}
