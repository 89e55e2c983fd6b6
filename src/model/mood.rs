use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Chill,
    Focus,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Chill,
        Mood::Focus,
    ];

    /// Value reported upward by the selector and shown in the playlist header.
    pub const fn value(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Energetic => "Energetic",
            Mood::Chill => "Chill",
            Mood::Focus => "Focus",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "😊 Happy",
            Mood::Sad => "😢 Sad",
            Mood::Energetic => "💃 Energetic",
            Mood::Chill => "😌 Chill",
            Mood::Focus => "🎯 Focus",
        }
    }

    /// Canned search phrase used to bias catalog relevance.
    pub const fn search_phrase(&self) -> &'static str {
        match self {
            Mood::Happy => "feel good upbeat pop",
            Mood::Sad => "melancholy piano ballad",
            Mood::Energetic => "dance workout edm",
            Mood::Chill => "lofi chillhop acoustic",
            Mood::Focus => "instrumental study beats",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.value() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Resolves a mood value to its search phrase. Unmapped values are searched
/// verbatim.
pub fn search_term(mood: &str) -> &str {
    match mood.parse::<Mood>() {
        Ok(known) => known.search_phrase(),
        Err(_) => mood,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_moods_map_to_their_phrase() {
        assert_eq!(search_term("Happy"), "feel good upbeat pop");
        assert_eq!(search_term("Sad"), "melancholy piano ballad");
        assert_eq!(search_term("Energetic"), "dance workout edm");
        assert_eq!(search_term("Chill"), "lofi chillhop acoustic");
        assert_eq!(search_term("Focus"), "instrumental study beats");
    }

    #[test]
    fn unknown_mood_is_searched_verbatim() {
        assert_eq!(search_term("Nostalgic"), "Nostalgic");
        assert_eq!(search_term("happy"), "happy");
    }

    #[test]
    fn values_parse_back() {
        for mood in Mood::ALL {
            assert_eq!(mood.value().parse::<Mood>(), Ok(mood));
            assert!(mood.label().ends_with(mood.value()));
        }
        assert!("Angry".parse::<Mood>().is_err());
    }
}
