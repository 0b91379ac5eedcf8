use ddd_es_domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 故事点，取值为斐波那契刻度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StoryPoints {
    #[default]
    Zero,
    One,
    Two,
    Three,
    Five,
    Eight,
    Thirteen,
    TwentyOne,
}

impl StoryPoints {
    pub const ALL: [StoryPoints; 8] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Five,
        Self::Eight,
        Self::Thirteen,
        Self::TwentyOne,
    ];

    pub const fn value(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Five => 5,
            Self::Eight => 8,
            Self::Thirteen => 13,
            Self::TwentyOne => 21,
        }
    }
}

impl TryFrom<u8> for StoryPoints {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|points| points.value() == value)
            .ok_or_else(|| {
                DomainError::validation(format!("{value} is not on the story point scale"))
            })
    }
}

impl From<StoryPoints> for u8 {
    fn from(points: StoryPoints) -> Self {
        points.value()
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
