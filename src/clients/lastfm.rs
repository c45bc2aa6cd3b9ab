use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{
    entities::{ApiErrorBody, RecentTrack, RecentTracksResponse, TrackInfo, TrackInfoResponse},
    errors::{Error, Result},
};

/// Public Last.fm REST endpoint.
pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Tracks from `user.getrecenttracks` plus the username Last.fm echoed back.
#[derive(Debug, Default)]
pub struct RecentTracksPage {
    /// Newest first, a now-playing track included
    pub tracks: Vec<RecentTrack>,
    /// `@attr.user` of the response
    pub user: Option<String>,
}

/// Read-only client for the two Last.fm methods this service needs.
#[derive(Debug, Clone)]
pub struct LastFmClient {
    http: Client,
    api_url: String,
    api_key: String,
    username: String,
}

impl LastFmClient {
    /// Build a client for `username` against the API rooted at `api_url`.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        username: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(LastFmClient {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
            username: username.into(),
        })
    }

    /// User whose history is read
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fetch one page of the user's scrobble history, newest first.
    /// A currently playing track, if any, is included at the top.
    pub async fn recent_tracks(&self, page: u32) -> Result<RecentTracksPage> {
        let page = page.to_string();
        let response: RecentTracksResponse = self
            .call(
                "user.getrecenttracks",
                &[("user", self.username.as_str()), ("page", page.as_str())],
            )
            .await?;

        let recent = response.recenttracks.unwrap_or_default();
        debug!(
            "Fetched {} recent tracks for {} (page {page})",
            recent.track.len(),
            self.username
        );
        Ok(RecentTracksPage {
            tracks: recent.track,
            user: recent.attr.and_then(|a| a.user),
        })
    }

    /// Fetch track metadata including the configured user's play count
    pub async fn track_info(&self, artist: &str, track: &str) -> Result<TrackInfo> {
        let response: TrackInfoResponse = self
            .call(
                "track.getInfo",
                &[
                    ("artist", artist),
                    ("track", track),
                    ("username", self.username.as_str()),
                ],
            )
            .await?;
        Ok(response.track.unwrap_or_default())
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> Result<T> {
        debug!("Calling Last.fm {method}");
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("method", method)])
            .query(params)
            .query(&[("api_key", self.api_key.as_str()), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

// Last.fm reports failures as `{"error": code, "message": ...}`, usually with a
// 4xx status but occasionally with 200.
fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(Error::LastFMUnexpectedResponse(format!("HTTP {status}")));
        }
        Err(e) => return Err(Error::from(e)),
    };

    if value.get("error").is_some() {
        let err: ApiErrorBody = serde_json::from_value(value)?;
        return Err(Error::LastFMApiError {
            code: err.error,
            message: err.message,
        });
    }
    if !status.is_success() {
        return Err(Error::LastFMUnexpectedResponse(format!(
            "HTTP {status}: {body}"
        )));
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_body_wins_over_status() {
        let res: Result<TrackInfoResponse> = parse_response(
            StatusCode::BAD_REQUEST,
            r#"{"error": 6, "message": "Track not found", "links": []}"#,
        );
        match res {
            Err(Error::LastFMApiError { code, message }) => {
                assert_eq!(code, 6);
                assert_eq!(message, "Track not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn api_error_with_ok_status_is_still_an_error() {
        let res: Result<RecentTracksResponse> =
            parse_response(StatusCode::OK, r#"{"error": 10, "message": "Invalid API key"}"#);
        assert!(matches!(res, Err(Error::LastFMApiError { code: 10, .. })));
    }

    #[test]
    fn non_json_failure_is_unexpected_response() {
        let res: Result<RecentTracksResponse> =
            parse_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(res, Err(Error::LastFMUnexpectedResponse(_))));
    }

    #[test]
    fn non_json_success_is_deserialization_error() {
        let res: Result<RecentTracksResponse> = parse_response(StatusCode::OK, "not json");
        assert!(matches!(res, Err(Error::JsonError(_))));
    }

    #[test]
    fn success_body_is_deserialized() {
        let res: Result<TrackInfoResponse> =
            parse_response(StatusCode::OK, r#"{"track": {"userplaycount": "3"}}"#);
        assert_eq!(res.unwrap().track.unwrap().userplaycount, 3);
    }
}
