//! Current-track lookup and response formatting.

use log::{debug, warn};
use serde::Serialize;

use crate::clients::{
    LastFmClient,
    entities::{RecentTrack, TrackInfo},
    errors::Result,
};
use crate::text::truncate_text;

const TITLE_MAX_LEN: usize = 43;
const ARTIST_MAX_LEN: usize = 41;
const ALBUM_MAX_LEN: usize = 41;

const ARTWORK_SIZE: &str = "extralarge";
const ARTWORK_PLACEHOLDER: &str = "https://via.placeholder.com/300";
const TRACK_URL_FALLBACK: &str = "https://www.last.fm";
const UNKNOWN_USER: &str = "Unknown User";

/// Simplified view of the track a user is playing or last played.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    /// Track title, ASCII, at most 43 characters plus ellipsis
    pub title: String,
    /// Artist name, ASCII, at most 41 characters plus ellipsis
    pub artist: String,
    /// Album name, ASCII, at most 41 characters plus ellipsis
    pub album: String,
    /// Extra large artwork URL or a placeholder image
    pub artwork: String,
    /// Last.fm page of the track
    pub url: String,
    /// Whether the user is listening right now
    pub now_playing: bool,
    /// Plays by the configured user
    #[serde(rename = "userplaycount")]
    pub user_play_count: u64,
    /// Plays across all of Last.fm
    #[serde(rename = "totalplaycount")]
    pub total_play_count: u64,
    /// Username reported by Last.fm
    pub user: String,
}

impl NowPlaying {
    /// Map Last.fm payloads onto the record, defaulting every missing field.
    pub fn from_upstream(track: &RecentTrack, info: &TrackInfo, user: Option<&str>) -> Self {
        NowPlaying {
            title: truncate_text(track.name.as_deref(), TITLE_MAX_LEN),
            artist: truncate_text(track.artist_name(), ARTIST_MAX_LEN),
            album: truncate_text(track.album_name(), ALBUM_MAX_LEN),
            artwork: track
                .image_url(ARTWORK_SIZE)
                .unwrap_or(ARTWORK_PLACEHOLDER)
                .to_string(),
            url: track
                .url
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(TRACK_URL_FALLBACK)
                .to_string(),
            now_playing: track.is_now_playing(),
            user_play_count: info.userplaycount,
            total_play_count: info.playcount,
            user: user
                .filter(|u| !u.is_empty())
                .unwrap_or(UNKNOWN_USER)
                .to_string(),
        }
    }
}

/// The track flagged as now playing, or the most recent one.
pub fn select_track(tracks: &[RecentTrack]) -> Option<&RecentTrack> {
    tracks
        .iter()
        .find(|t| t.is_now_playing())
        .or_else(|| tracks.first())
}

/// Look up the user's current track. `Ok(None)` means the user has no scrobbles.
pub async fn fetch_current_track(client: &LastFmClient, page: u32) -> Result<Option<NowPlaying>> {
    let recent = client.recent_tracks(page).await?;

    let Some(track) = select_track(&recent.tracks) else {
        warn!("No recent tracks found for {}", client.username());
        return Ok(None);
    };

    let info = match client
        .track_info(
            track.artist_name().unwrap_or_default(),
            track.name.as_deref().unwrap_or_default(),
        )
        .await
    {
        Ok(info) => info,
        Err(e) if e.is_not_found() => {
            warn!("Last.fm has no track info for {:?}: {e}", track.name);
            TrackInfo::default()
        }
        Err(e) => return Err(e),
    };

    let details = NowPlaying::from_upstream(track, &info, recent.user.as_deref());
    debug!("Formatted track details: {details:?}");
    Ok(Some(details))
}
