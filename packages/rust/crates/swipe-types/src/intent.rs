//! Intent vocabulary: the four outcomes of a classified swipe and their
//! persistence-facing names.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::CurationError;

/// Discrete outcome of a resolved gesture.
///
/// The set is closed: the geometry classifier maps each axis direction onto
/// exactly one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Add the item to the user's private calendar (swipe right).
    PrivateCalendar,
    /// Add the item to the shared/public calendar (swipe up).
    PublicCalendar,
    /// Keep the item for later (swipe down).
    SaveLater,
    /// Not interested (swipe left).
    Dismiss,
}

impl Intent {
    /// All intents in a fixed order, for iteration and tabulation.
    pub const ALL: [Self; 4] = [
        Self::PrivateCalendar,
        Self::PublicCalendar,
        Self::SaveLater,
        Self::Dismiss,
    ];

    /// String form used in logs and event payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrivateCalendar => "PRIVATE_CALENDAR",
            Self::PublicCalendar => "PUBLIC_CALENDAR",
            Self::SaveLater => "SAVE_LATER",
            Self::Dismiss => "DISMISS",
        }
    }

    /// Whether this intent adds the item to a calendar-like destination.
    #[must_use]
    pub const fn is_calendar_directed(self) -> bool {
        matches!(self, Self::PrivateCalendar | Self::PublicCalendar)
    }

    /// Canonical swipe direction for this intent.
    #[must_use]
    pub const fn direction(self) -> SwipeDirection {
        match self {
            Self::PrivateCalendar => SwipeDirection::Right,
            Self::PublicCalendar => SwipeDirection::Up,
            Self::SaveLater => SwipeDirection::Down,
            Self::Dismiss => SwipeDirection::Left,
        }
    }

    /// Persistence action name for this intent.
    #[must_use]
    pub const fn action(self) -> SwipeAction {
        match self {
            Self::PrivateCalendar => SwipeAction::GoingPrivate,
            Self::PublicCalendar => SwipeAction::GoingShared,
            Self::SaveLater => SwipeAction::MaybeLater,
            Self::Dismiss => SwipeAction::NotInterested,
        }
    }

    /// Calendar the item lands in, if any.
    #[must_use]
    pub const fn calendar_type(self) -> Option<CalendarType> {
        match self {
            Self::PrivateCalendar => Some(CalendarType::Private),
            Self::PublicCalendar => Some(CalendarType::Shared),
            Self::SaveLater | Self::Dismiss => None,
        }
    }

    /// Visibility applied when the caller does not pick one.
    #[must_use]
    pub const fn default_visibility(self) -> VisibilityLevel {
        match self {
            Self::PublicCalendar => VisibilityLevel::Friends,
            Self::PrivateCalendar | Self::SaveLater | Self::Dismiss => VisibilityLevel::Private,
        }
    }

    /// Inverse of [`Intent::direction`].
    #[must_use]
    pub const fn from_direction(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Right => Self::PrivateCalendar,
            SwipeDirection::Up => Self::PublicCalendar,
            SwipeDirection::Down => Self::SaveLater,
            SwipeDirection::Left => Self::Dismiss,
        }
    }

    /// Inverse of [`Intent::action`].
    #[must_use]
    pub const fn from_action(action: SwipeAction) -> Self {
        match action {
            SwipeAction::GoingPrivate => Self::PrivateCalendar,
            SwipeAction::GoingShared => Self::PublicCalendar,
            SwipeAction::MaybeLater => Self::SaveLater,
            SwipeAction::NotInterested => Self::Dismiss,
        }
    }

    /// Resolve a direction/action pair, rejecting pairs that disagree.
    ///
    /// # Errors
    /// Returns [`CurationError::InvalidRecord`] when the action does not
    /// belong to the direction.
    pub fn from_pair(direction: SwipeDirection, action: SwipeAction) -> Result<Self, CurationError> {
        let intent = Self::from_direction(direction);
        if intent.action() == action {
            Ok(intent)
        } else {
            Err(CurationError::InvalidRecord(format!(
                "action {} does not match direction {}",
                action.as_str(),
                direction.as_str()
            )))
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = CurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CurationError::Unknown(format!("intent '{s}'")))
    }
}

/// Physical swipe direction as stored by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Rightward swipe.
    Right,
    /// Leftward swipe.
    Left,
    /// Upward swipe.
    Up,
    /// Downward swipe.
    Down,
}

impl SwipeDirection {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl FromStr for SwipeDirection {
    type Err = CurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(CurationError::Unknown(format!("swipe direction '{s}'"))),
        }
    }
}

/// Action name as stored by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    /// Going, private calendar.
    GoingPrivate,
    /// Going, shared with friends.
    GoingShared,
    /// Not interested.
    NotInterested,
    /// Maybe later.
    MaybeLater,
}

impl SwipeAction {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoingPrivate => "going_private",
            Self::GoingShared => "going_shared",
            Self::NotInterested => "not_interested",
            Self::MaybeLater => "maybe_later",
        }
    }
}

impl FromStr for SwipeAction {
    type Err = CurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "going_private" => Ok(Self::GoingPrivate),
            "going_shared" => Ok(Self::GoingShared),
            "not_interested" => Ok(Self::NotInterested),
            "maybe_later" => Ok(Self::MaybeLater),
            _ => Err(CurationError::Unknown(format!("swipe action '{s}'"))),
        }
    }
}

/// Calendar an accepted item is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CalendarType {
    /// Only the user sees it.
    Private,
    /// Shared with friends.
    Shared,
    /// Publicly listed.
    Public,
}

/// Audience of an attendance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityLevel {
    /// Only the user.
    Private,
    /// The user's friends.
    Friends,
    /// Everyone.
    Public,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip_is_total() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_direction(intent.direction()), intent);
            assert_eq!(Intent::from_action(intent.action()), intent);
        }
    }

    #[test]
    fn test_only_calendar_intents_are_calendar_directed() {
        let directed: Vec<Intent> = Intent::ALL
            .into_iter()
            .filter(|i| i.is_calendar_directed())
            .collect();
        assert_eq!(
            directed,
            vec![Intent::PrivateCalendar, Intent::PublicCalendar]
        );
    }

    #[test]
    fn test_from_pair_rejects_mismatch() {
        assert_eq!(
            Intent::from_pair(SwipeDirection::Up, SwipeAction::GoingShared).ok(),
            Some(Intent::PublicCalendar)
        );
        assert!(Intent::from_pair(SwipeDirection::Up, SwipeAction::GoingPrivate).is_err());
    }

    #[test]
    fn test_intent_wire_names() {
        let value = serde_json::to_value(Intent::SaveLater).expect("serialize intent");
        assert_eq!(value, "SAVE_LATER");
        assert_eq!("dismiss".parse::<Intent>().ok(), Some(Intent::Dismiss));
        assert!("maybe".parse::<Intent>().is_err());
    }

    #[test]
    fn test_shared_calendar_defaults_to_friends() {
        assert_eq!(
            Intent::PublicCalendar.default_visibility(),
            VisibilityLevel::Friends
        );
        assert_eq!(
            Intent::PublicCalendar.calendar_type(),
            Some(CalendarType::Shared)
        );
        assert_eq!(Intent::Dismiss.calendar_type(), None);
    }
}
