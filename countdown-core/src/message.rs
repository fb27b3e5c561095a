//! Status message selection by remaining-time bucket.

use serde::{Deserialize, Serialize};

use crate::units::TimeUnits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMessage {
    AlmostThere,
    FinalHours,
    LessThanADay,
    OneDay,
    FinalWeek,
    TimeRemaining,
    Completed,
}

impl StatusMessage {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::AlmostThere => "Almost there! Just minutes to go! ⏰",
            Self::FinalHours => "Final hours approaching! 🚀",
            Self::LessThanADay => "Less than a day remaining! 🎯",
            Self::OneDay => "Just one more day to go! 📅",
            Self::FinalWeek => "Final week countdown! 📆",
            Self::TimeRemaining => "Time remaining until the big day! ✨",
            Self::Completed => "The countdown has ended! 🎉",
        }
    }
}

/// Pick the message for a running countdown.
///
/// The buckets overlap, so rules are checked in order and the first match
/// wins. Seconds never influence the choice.
#[must_use]
pub const fn select_message(units: &TimeUnits) -> StatusMessage {
    let TimeUnits {
        days,
        hours,
        minutes,
        ..
    } = *units;
    if days == 0 && hours == 0 && minutes < 10 {
        StatusMessage::AlmostThere
    } else if days == 0 && hours < 2 {
        StatusMessage::FinalHours
    } else if days == 0 {
        StatusMessage::LessThanADay
    } else if days == 1 {
        StatusMessage::OneDay
    } else if days <= 7 {
        StatusMessage::FinalWeek
    } else {
        StatusMessage::TimeRemaining
    }
}
