//! Central configuration for the auction draft server.
//!
//! All tunables are defined here with their defaults; command-line flags
//! and environment variables override them in `main`.

use engine::RoomConfig;
use server::ServerConfig;
use types::Budget;

/// Master configuration for one server process (one room).
#[derive(Debug, Clone)]
pub struct DraftConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Network
    // ─────────────────────────────────────────────────────────────────────────
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,

    // ─────────────────────────────────────────────────────────────────────────
    // Room
    // ─────────────────────────────────────────────────────────────────────────
    /// Participant count required to start the auction.
    pub capacity: usize,
    /// Starting budget for every participant.
    pub initial_budget: u64,
    /// Bidding window length in seconds.
    pub countdown_secs: u64,
    /// Delay between the room filling and the first nomination prompt (ms).
    pub room_start_delay_ms: u64,
    /// Delay between a round's outcome and the next nomination prompt (ms).
    pub nomination_delay_ms: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────
    /// Path to the item catalog file (`id,name,category,group` rows).
    /// A built-in fallback list is used when the file is unavailable.
    pub catalog_path: String,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            // Network
            host: "0.0.0.0".to_string(),
            port: 3000,

            // Room
            capacity: 2,
            initial_budget: 100,
            countdown_secs: 30,
            room_start_delay_ms: 2_000,
            nomination_delay_ms: 2_000,

            // Catalog
            catalog_path: "data/players.csv".to_string(),
        }
    }
}

impl DraftConfig {
    /// Room engine view of this configuration.
    pub fn room_config(&self) -> RoomConfig {
        RoomConfig {
            capacity: self.capacity,
            initial_budget: Budget(self.initial_budget),
            countdown_secs: self.countdown_secs,
            room_start_delay_ms: self.room_start_delay_ms,
            nomination_delay_ms: self.nomination_delay_ms,
        }
    }

    /// Server bind view of this configuration.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_room() {
        let cfg = DraftConfig::default();
        assert_eq!(cfg.capacity, 2);
        assert_eq!(cfg.initial_budget, 100);
        assert_eq!(cfg.server_config().bind_addr(), "0.0.0.0:3000");
    }
}
