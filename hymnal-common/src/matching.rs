//! Banned-artist matching
//!
//! The pure core of the status reconciliation engine. Everything here is
//! side-effect free; the query layer decides what to do with the verdicts.
//!
//! The match rule is bidirectional substring containment, case-insensitive:
//! banning "Hillsong" also covers "Hillsong United", and banning
//! "Hillsong United" covers a song filed under just "Hillsong". This is
//! deliberately permissive and favors over-blocking; short names like "U2"
//! will match unrelated longer names.

use crate::db::models::{BannedArtist, SongStatus};

/// True iff one name contains the other, ignoring case.
pub fn artist_matches(song_artist: &str, banned_name: &str) -> bool {
    let song = song_artist.to_lowercase();
    let banned = banned_name.to_lowercase();
    song.contains(&banned) || banned.contains(&song)
}

/// Status of a song with the given artist under the given registry.
///
/// NotAllowed iff any registry entry matches. O(registry size).
pub fn evaluate_status(artist: &str, registry: &[BannedArtist]) -> SongStatus {
    if registry.iter().any(|entry| artist_matches(artist, &entry.artist_name)) {
        SongStatus::NotAllowed
    } else {
        SongStatus::Allowed
    }
}

/// First registry entry matching the artist, if any.
///
/// Used to derive the banned reason shown alongside NotAllowed songs.
pub fn find_matching_entry<'a>(
    artist: &str,
    registry: &'a [BannedArtist],
) -> Option<&'a BannedArtist> {
    registry.iter().find(|entry| artist_matches(artist, &entry.artist_name))
}
