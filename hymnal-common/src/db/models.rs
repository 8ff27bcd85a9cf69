//! Database models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a song may be used in worship lineups
///
/// Serialized as `"Allowed"` / `"Not Allowed"`, matching the values stored
/// in the `songs.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SongStatus {
    Allowed,
    #[serde(rename = "Not Allowed")]
    NotAllowed,
}

impl SongStatus {
    /// Stored string form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            SongStatus::Allowed => "Allowed",
            SongStatus::NotAllowed => "Not Allowed",
        }
    }

    /// Parse the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Allowed" => Some(SongStatus::Allowed),
            "Not Allowed" => Some(SongStatus::NotAllowed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SongStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub category: Option<String>,
    pub lyrics_link: Option<String>,
    pub youtube_link: Option<String>,
    pub musical_key: Option<String>,
    pub tempo_bpm: Option<i64>,
    pub time_signature: Option<String>,
    pub status: SongStatus,
    pub date_added: DateTime<Utc>,
}

/// One banned-artist registry entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannedArtist {
    pub id: Uuid,
    pub artist_name: String,
    pub reason: Option<String>,
}

/// Worship lineup header row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineup {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// One position in a lineup's ordered song sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupEntry {
    pub order: i64,
    pub song: Song,
}

/// Lineup together with its songs, ordered by `order` ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupWithSongs {
    #[serde(flatten)]
    pub lineup: Lineup,
    pub songs: Vec<LineupEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_stored_form() {
        assert_eq!(SongStatus::parse("Allowed"), Some(SongStatus::Allowed));
        assert_eq!(SongStatus::parse("Not Allowed"), Some(SongStatus::NotAllowed));
        assert_eq!(SongStatus::parse("banned"), None);
        assert_eq!(SongStatus::NotAllowed.as_str(), "Not Allowed");
    }

    #[test]
    fn status_serializes_with_space() {
        let json = serde_json::to_string(&SongStatus::NotAllowed).unwrap();
        assert_eq!(json, "\"Not Allowed\"");
        let back: SongStatus = serde_json::from_str("\"Not Allowed\"").unwrap();
        assert_eq!(back, SongStatus::NotAllowed);
    }
}
