use serde::{Deserialize, Serialize};

pub const UNTITLED_TRACK: &str = "Untitled Track";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A song record as returned by the catalog search endpoint. Field names
/// follow the API's camelCase so persisted favorites keep the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub track_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url100: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_genre_name: Option<String>,
}

impl Track {
    pub fn title(&self) -> &str {
        match self.track_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNTITLED_TRACK,
        }
    }

    pub fn artist(&self) -> &str {
        match self.artist_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_ARTIST,
        }
    }

    pub fn genre(&self) -> Option<&str> {
        self.primary_genre_name
            .as_deref()
            .filter(|genre| !genre.is_empty())
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn same_track(&self, other: &Track) -> bool {
        self.track_id == other.track_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_record() {
        let json = r#"{
            "wrapperType": "track",
            "trackId": 1440833098,
            "trackName": "Walking on Sunshine",
            "artistName": "Katrina & The Waves",
            "artworkUrl100": "https://is1-ssl.mzstatic.com/image/100x100bb.jpg",
            "previewUrl": "https://audio-ssl.itunes.apple.com/preview.m4a",
            "primaryGenreName": "Pop",
            "trackPrice": 1.29
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.track_id, 1440833098);
        assert_eq!(track.title(), "Walking on Sunshine");
        assert_eq!(track.artist(), "Katrina & The Waves");
        assert_eq!(track.genre(), Some("Pop"));
        assert!(track.preview().is_some());
    }

    #[test]
    fn missing_fields_fall_back() {
        let track: Track = serde_json::from_str(r#"{"trackId": 7, "trackName": ""}"#).unwrap();
        assert_eq!(track.title(), UNTITLED_TRACK);
        assert_eq!(track.artist(), UNKNOWN_ARTIST);
        assert_eq!(track.genre(), None);
        assert_eq!(track.preview(), None);
    }

    #[test]
    fn only_empty_names_fall_back() {
        let track: Track =
            serde_json::from_str(r#"{"trackId": 8, "trackName": "  ", "artistName": " "}"#)
                .unwrap();
        assert_eq!(track.title(), "  ");
        assert_eq!(track.artist(), " ");
    }

    #[test]
    fn serializes_with_api_field_names() {
        let track = Track {
            track_id: 42,
            track_name: Some("Answer".into()),
            artist_name: None,
            artwork_url100: Some("art".into()),
            preview_url: None,
            primary_genre_name: None,
        };
        let value = serde_json::to_value(&track).unwrap();
        assert_eq!(value["trackId"], 42);
        assert_eq!(value["artworkUrl100"], "art");
        assert!(value.get("previewUrl").is_none());
    }
}
