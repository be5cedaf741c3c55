use serde::Deserialize;

/// Human-readable handle of a YouTube channel, e.g. its custom URL slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReference(String);

impl ChannelReference {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One timed caption line of a video.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptionEntry {
    pub text: String,
    #[serde(default)]
    pub start: f64,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>, start: f64) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }
}

/// Full caption text of a video: entries joined by single spaces, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn from_entries(entries: &[CaptionEntry]) -> Self {
        let text = entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Binary moderation decision for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Delete,
}

impl Verdict {
    /// Strict parse: `Some` only when the answer is an integer in {0, 1}.
    pub fn try_parse(answer: &str) -> Option<Self> {
        match answer.trim().parse::<i64>() {
            Ok(0) => Some(Verdict::Keep),
            Ok(1) => Some(Verdict::Delete),
            _ => None,
        }
    }

    /// Fail-open parse of the classifier's answer. Anything that is not a
    /// clean 0 or 1 keeps the message.
    pub fn parse(answer: &str) -> Self {
        Self::try_parse(answer).unwrap_or(Verdict::Keep)
    }
}

/// A text channel as seen from one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChannel {
    pub id: u64,
    pub guild_id: u64,
    pub name: String,
}

/// Inbound chat message, already stripped down to what the flows need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub author_id: u64,
    /// Written by this bot's own account.
    pub from_self: bool,
    pub content: String,
}

impl IncomingMessage {
    /// Direct messages carry no guild.
    pub fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_accepts_only_zero_and_one() {
        assert_eq!(Verdict::parse("1"), Verdict::Delete);
        assert_eq!(Verdict::parse(" 1\n"), Verdict::Delete);
        assert_eq!(Verdict::parse("0"), Verdict::Keep);
        assert_eq!(Verdict::parse("2"), Verdict::Keep);
        assert_eq!(Verdict::parse("-1"), Verdict::Keep);
        assert_eq!(Verdict::parse(""), Verdict::Keep);
        assert_eq!(Verdict::parse("1 - the message mocks Messi"), Verdict::Keep);
        assert_eq!(Verdict::parse("yes"), Verdict::Keep);
    }

    #[test]
    fn strict_parse_distinguishes_garbage_from_zero() {
        assert_eq!(Verdict::try_parse("0"), Some(Verdict::Keep));
        assert_eq!(Verdict::try_parse("7"), None);
        assert_eq!(Verdict::try_parse("zero"), None);
    }

    #[test]
    fn transcript_joins_with_single_spaces_in_order() {
        let entries: Vec<CaptionEntry> =
            serde_json::from_str(r#"[{"text":"Hello"},{"text":"world"}]"#).unwrap();
        assert_eq!(Transcript::from_entries(&entries).as_str(), "Hello world");
    }

    #[test]
    fn transcript_keeps_duplicates() {
        let entries = vec![
            CaptionEntry::new("here we go", 0.0),
            CaptionEntry::new("here we go", 1.5),
        ];
        assert_eq!(
            Transcript::from_entries(&entries).as_str(),
            "here we go here we go"
        );
    }

    #[test]
    fn empty_captions_give_empty_transcript() {
        assert!(Transcript::from_entries(&[]).is_empty());
    }
}
