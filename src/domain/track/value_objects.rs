use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref MUSICAL_KEY_REGEX: regex::Regex = regex::Regex::new(r"^[A-G](#|b)?m?$").unwrap();
}

/// Track title, 1-120 characters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrackTitle {
    #[validate(length(min = 1, max = 120))]
    pub value: String,
}

impl TrackTitle {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let title = Self { value };
        title.validate()?;
        Ok(title)
    }
}

/// Tempo in BPM. 0 means "unknown"; anything above 400 is rejected as noise.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Bpm {
    #[validate(range(min = 0, max = 400))]
    pub value: i32,
}

impl Bpm {
    pub fn new(value: i32) -> Result<Self, validator::ValidationErrors> {
        let bpm = Self { value };
        bpm.validate()?;
        Ok(bpm)
    }
}

/// Musical key in short notation: note letter, optional accidental, optional
/// minor marker ("C", "F#", "Bbm"). Empty means "unknown" and is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MusicalKey {
    #[validate(regex(path = *MUSICAL_KEY_REGEX))]
    pub value: String,
}

impl MusicalKey {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let key = Self { value };
        if key.value.is_empty() {
            return Ok(key);
        }
        key.validate()?;
        Ok(key)
    }
}
