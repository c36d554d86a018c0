/// Discrete reaction shown next to the name field, picked from the trimmed
/// length of the input.
#[derive(uniffi::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Neutral,
    MildPositive,
    Positive,
    Happy,
    Excited,
}

// Lower bound (inclusive) of each band above `MildPositive`.
const POSITIVE_FROM: u32 = 5;
const HAPPY_FROM: u32 = 8;
const EXCITED_FROM: u32 = 15;

impl Mood {
    pub fn for_len(len: u32) -> Self {
        match len {
            0 => Mood::Neutral,
            n if n < POSITIVE_FROM => Mood::MildPositive,
            n if n < HAPPY_FROM => Mood::Positive,
            n if n < EXCITED_FROM => Mood::Happy,
            _ => Mood::Excited,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Neutral => "\u{1F642}",      // 🙂
            Mood::MildPositive => "\u{1F604}", // 😄
            Mood::Positive => "\u{1F603}",     // 😃
            Mood::Happy => "\u{1F601}",        // 😁
            Mood::Excited => "\u{1F929}",      // 🤩
        }
    }
}

/// Strips surrounding whitespace, including the zero-width no-break space
/// (U+FEFF) that `str::trim` keeps. Every name comparison goes through this.
pub fn trim_name(input: &str) -> &str {
    input.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Length of `input` after [`trim_name`], counted in UTF-16 code units so
/// emoji and other astral characters count twice.
pub fn trimmed_len(input: &str) -> u32 {
    u32::try_from(trim_name(input).encode_utf16().count()).unwrap_or(u32::MAX)
}

pub fn mood_for_input(input: &str) -> Mood {
    Mood::for_len(trimmed_len(input))
}
