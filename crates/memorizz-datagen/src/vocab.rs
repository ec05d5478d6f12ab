use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Book label stamped on every generated paragraph.
pub const BOOK: &str = "LOTR";

pub const PARAGRAPHS: [&str; 20] = [
    "The morning sun cast long shadows across the empty street, painting everything in hues of gold and amber.",
    "She couldn't shake the feeling that something was about to change, something profound and irreversible.",
    "The old man sat on the bench, feeding breadcrumbs to the pigeons, lost in memories of days gone by.",
    "Thunder rolled across the darkening sky, promising a storm that would wash away the dust of summer.",
    "In the quiet moments between heartbeats, she found herself wondering if this was all there was to life.",
    "The letter arrived on a Tuesday, unremarkable except for the foreign postmark and the familiar handwriting.",
    "Children's laughter echoed through the park, a reminder of simpler times and uncomplicated joy.",
    "He stared at the blank canvas, brush in hand, waiting for inspiration to strike like lightning.",
    "The coffee shop hummed with conversation, each table a small island of human connection.",
    "Night fell like a velvet curtain, bringing with it the promise of dreams and the fear of nightmares.",
    "The train whistle pierced the silence, announcing arrivals and departures, hellos and goodbyes.",
    "She walked through the autumn leaves, each step a small symphony of crunches and whispers.",
    "The library stood silent and imposing, a fortress of knowledge waiting to be explored.",
    "Rain tapped against the window like tiny fingers, demanding attention and offering comfort.",
    "The photograph yellowed with age told stories that words could never capture.",
    "In the garden, flowers bloomed defiantly against the approaching winter.",
    "The clock on the wall ticked relentlessly, marking time's inexorable march forward.",
    "Waves crashed against the shore, eternal and unchanging, yet never quite the same.",
    "The empty chair at the dinner table spoke volumes about loss and remembrance.",
    "Stars emerged one by one, pinpricks of light in the vast canvas of night.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    FrodoBaggins,
    GandalfTheGrey,
    Aragorn,
    Legolas,
    Gimli,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::FrodoBaggins,
        Persona::GandalfTheGrey,
        Persona::Aragorn,
        Persona::Legolas,
        Persona::Gimli,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Persona::FrodoBaggins => "Frodo Baggins",
            Persona::GandalfTheGrey => "Gandalf the Grey",
            Persona::Aragorn => "Aragorn",
            Persona::Legolas => "Legolas",
            Persona::Gimli => "Gimli",
        }
    }

    /// Lowercased name with spaces replaced by underscores, e.g. `gandalf_the_grey`.
    pub fn slug(self) -> String {
        self.name().to_lowercase().replace(' ', "_")
    }

    pub fn from_name(name: &str) -> Option<Persona> {
        Persona::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Sad,
    Angry,
    Happy,
    Excited,
    Surprised,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown emotion: {0}")]
pub struct UnknownEmotion(pub String);

impl Emotion {
    /// Report order for per-emotion statistics.
    pub const ALL: [Emotion; 5] = [
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Happy,
        Emotion::Excited,
        Emotion::Surprised,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Happy => "happy",
            Emotion::Excited => "excited",
            Emotion::Surprised => "surprised",
        }
    }

    /// Justification templates; `{level}` is replaced with the emotion level.
    pub(crate) fn templates(self) -> [&'static str; 3] {
        match self {
            Emotion::Sad => [
                "The melancholic tone suggests a level {level} sadness.",
                "There's an underlying sorrow that reaches intensity {level}.",
                "The narrative conveys a profound sadness at level {level}.",
            ],
            Emotion::Angry => [
                "The tension in the text indicates anger at level {level}.",
                "There's palpable frustration reaching intensity {level}.",
                "The aggressive undertones suggest level {level} anger.",
            ],
            Emotion::Happy => [
                "The joyful atmosphere indicates happiness at level {level}.",
                "There's a clear sense of contentment at intensity {level}.",
                "The positive tone suggests level {level} happiness.",
            ],
            Emotion::Excited => [
                "The energetic pace shows excitement at level {level}.",
                "There's obvious enthusiasm reaching intensity {level}.",
                "The dynamic narrative indicates level {level} excitement.",
            ],
            Emotion::Surprised => [
                "The unexpected elements create surprise at level {level}.",
                "There's a sense of astonishment at intensity {level}.",
                "The sudden revelations suggest level {level} surprise.",
            ],
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}
