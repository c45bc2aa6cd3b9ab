//! Payloads returned by the Last.fm REST API.
//!
//! Last.fm is loose with its JSON: numbers arrive as strings, single-element
//! lists sometimes arrive as a bare object, and most fields may be missing.
//! Everything here is optional or defaulted so a sparse response still
//! deserializes.

use serde::{Deserialize, Deserializer};

/// Text node in Last.fm's XML-derived JSON (`{"#text": "..."}`).
#[derive(Deserialize, Debug, Default, Clone)]
pub struct TextNode {
    /// Node value, often empty
    #[serde(rename = "#text", default)]
    pub text: Option<String>,
}

/// Artwork entry; Last.fm sends one per size label.
#[derive(Deserialize, Debug, Clone)]
pub struct Image {
    /// `small`, `medium`, `large` or `extralarge`
    #[serde(default)]
    pub size: String,
    /// Image URL, empty when Last.fm has no artwork
    #[serde(rename = "#text", default)]
    pub url: Option<String>,
}

/// `@attr` of a recent track.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct TrackAttr {
    /// `"true"` while the track is playing
    #[serde(default)]
    pub nowplaying: Option<String>,
}

/// One entry of `recenttracks.track`.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RecentTrack {
    /// Track title
    #[serde(default)]
    pub name: Option<String>,
    /// Artist name node
    #[serde(default)]
    pub artist: Option<TextNode>,
    /// Album name node
    #[serde(default)]
    pub album: Option<TextNode>,
    /// Artwork in several sizes
    #[serde(default)]
    pub image: Vec<Image>,
    /// Canonical Last.fm page of the track
    #[serde(default)]
    pub url: Option<String>,
    /// Now-playing marker
    #[serde(rename = "@attr", default)]
    pub attr: Option<TrackAttr>,
}

impl RecentTrack {
    /// Artist name, if Last.fm sent one
    pub fn artist_name(&self) -> Option<&str> {
        self.artist.as_ref().and_then(|a| a.text.as_deref())
    }

    /// Album name, if Last.fm sent one
    pub fn album_name(&self) -> Option<&str> {
        self.album.as_ref().and_then(|a| a.text.as_deref())
    }

    /// True while the user is listening to this track
    pub fn is_now_playing(&self) -> bool {
        self.attr
            .as_ref()
            .and_then(|a| a.nowplaying.as_deref())
            .is_some_and(|v| v == "true")
    }

    /// URL of the image with the given size label, if present and non-empty.
    pub fn image_url(&self, size: &str) -> Option<&str> {
        self.image
            .iter()
            .find(|img| img.size == size)
            .and_then(|img| img.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// `@attr` of the `recenttracks` object.
#[derive(Deserialize, Debug, Default)]
pub struct RecentTracksAttr {
    /// Username the history belongs to
    #[serde(default)]
    pub user: Option<String>,
}

/// Body of `recenttracks`.
#[derive(Deserialize, Debug, Default)]
pub struct RecentTracks {
    /// Newest first
    #[serde(default, deserialize_with = "one_or_many")]
    pub track: Vec<RecentTrack>,
    /// Paging and user metadata
    #[serde(rename = "@attr", default)]
    pub attr: Option<RecentTracksAttr>,
}

/// `user.getrecenttracks` response.
#[derive(Deserialize, Debug, Default)]
pub struct RecentTracksResponse {
    /// Missing when the user does not exist
    #[serde(default)]
    pub recenttracks: Option<RecentTracks>,
}

/// `track` object of a `track.getInfo` response.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct TrackInfo {
    /// Plays by the requesting user
    #[serde(default, deserialize_with = "lenient_count")]
    pub userplaycount: u64,
    /// Plays across all of Last.fm
    #[serde(default, deserialize_with = "lenient_count")]
    pub playcount: u64,
}

/// `track.getInfo` response.
#[derive(Deserialize, Debug, Default)]
pub struct TrackInfoResponse {
    /// Track details
    #[serde(default)]
    pub track: Option<TrackInfo>,
}

/// Error body Last.fm sends alongside a non-2xx status.
#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    /// Last.fm error code
    pub error: u32,
    /// Error description
    #[serde(default)]
    pub message: String,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<RecentTrack>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<RecentTrack>),
        One(Box<RecentTrack>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(tracks)) => tracks,
        Some(OneOrMany::One(track)) => vec![*track],
        None => Vec::new(),
    })
}

// Counts come back as "12", 12, "" or null depending on the endpoint.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Count>::deserialize(deserializer)? {
        Some(Count::Number(n)) => n,
        Some(Count::Text(s)) => s.trim().parse().unwrap_or(0),
        Some(Count::Other(_)) | None => 0,
    })
}
