// SPDX-License-Identifier: MPL-2.0
//! Gesture state slice: the state type, its actions, and the reducer.
//!
//! The reducer is a total function: any action value, including ones that
//! arrived through deserialization with a tag this build has never heard of,
//! maps to a well-defined next state. Unrecognized actions return the input
//! state untouched, and callers can detect that no-op through the returned
//! [`Cow`] without comparing values.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Label assigned when a single-hand gesture was recognized.
pub const SINGLE_HAND_GESTURE: &str = "SINGLE_HAND_GESTURE";
/// Label assigned when an eye gesture was recognized.
pub const EYE_GESTURE: &str = "EYE_GESTURE";

/// Current interpreted gesture.
///
/// `label` is always exactly one of: the empty string (no gesture seen yet),
/// [`SINGLE_HAND_GESTURE`], or [`EYE_GESTURE`]. The state is replaced
/// wholesale by the reducer, never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureState {
    pub label: String,
}

impl GestureState {
    fn with_label(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

/// A serializable description of a gesture state transition.
///
/// Actions carry only their discriminator tag, so a persisted dispatch log
/// can be replayed bit-for-bit later. The `Unrecognized` arm exists because
/// actions cross a serialization boundary: a log written by a newer build
/// (or a hand-edited one) can carry tags this build does not know, and those
/// must reduce as no-ops rather than fail to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GestureAction {
    SingleHandDetected,
    EyeDetected,
    #[default]
    #[serde(other)]
    Unrecognized,
}

impl GestureAction {
    /// The discriminator tag, matching the serialized `type` field.
    pub fn tag(self) -> &'static str {
        match self {
            GestureAction::SingleHandDetected => "single-hand-detected",
            GestureAction::EyeDetected => "eye-detected",
            GestureAction::Unrecognized => "unrecognized",
        }
    }
}

/// Builds a well-formed single-hand action without hand-authoring the tag.
pub fn single_hand_detected() -> GestureAction {
    GestureAction::SingleHandDetected
}

/// Builds a well-formed eye-gesture action.
pub fn eye_detected() -> GestureAction {
    GestureAction::EyeDetected
}

/// Computes the next gesture state for a dispatched action.
///
/// `None` is the uninitialized marker: the store passes it exactly once to
/// obtain the initial state, and the action is ignored for that call.
/// Recognized actions yield a freshly constructed state; anything else
/// returns `Cow::Borrowed` over the input so the caller can treat the
/// dispatch as a no-op by identity.
pub fn reduce<'a>(state: Option<&'a GestureState>, action: &GestureAction) -> Cow<'a, GestureState> {
    let Some(state) = state else {
        return Cow::Owned(GestureState::default());
    };

    match action {
        GestureAction::SingleHandDetected => {
            Cow::Owned(GestureState::with_label(SINGLE_HAND_GESTURE))
        }
        GestureAction::EyeDetected => Cow::Owned(GestureState::with_label(EYE_GESTURE)),
        GestureAction::Unrecognized => Cow::Borrowed(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_marker_yields_default_state() {
        for action in [
            single_hand_detected(),
            eye_detected(),
            GestureAction::Unrecognized,
        ] {
            let state = reduce(None, &action);
            assert_eq!(state.label, "");
            assert!(matches!(state, Cow::Owned(_)));
        }
    }

    #[test]
    fn single_hand_sets_label_from_any_state() {
        for start in ["", SINGLE_HAND_GESTURE, EYE_GESTURE] {
            let current = GestureState::with_label(start);
            let next = reduce(Some(&current), &single_hand_detected());
            assert_eq!(next.label, SINGLE_HAND_GESTURE);
            assert!(matches!(next, Cow::Owned(_)));
        }
    }

    #[test]
    fn eye_sets_label_from_any_state() {
        for start in ["", SINGLE_HAND_GESTURE, EYE_GESTURE] {
            let current = GestureState::with_label(start);
            let next = reduce(Some(&current), &eye_detected());
            assert_eq!(next.label, EYE_GESTURE);
        }
    }

    #[test]
    fn unrecognized_action_returns_input_by_identity() {
        let current = GestureState::with_label(EYE_GESTURE);
        let next = reduce(Some(&current), &GestureAction::Unrecognized);
        match next {
            Cow::Borrowed(returned) => assert!(std::ptr::eq(returned, &current)),
            Cow::Owned(_) => panic!("no-op dispatch must not allocate a new state"),
        }
    }

    #[test]
    fn recognized_dispatch_does_not_alias_prior_state() {
        let current = GestureState::with_label(SINGLE_HAND_GESTURE);
        let next = reduce(Some(&current), &single_hand_detected());
        // Value-idempotent, but always a fresh instance.
        assert_eq!(*next, current);
        assert!(matches!(next, Cow::Owned(_)));
    }

    #[test]
    fn repeated_dispatch_is_value_idempotent() {
        let start = GestureState::default();
        let once = reduce(Some(&start), &eye_detected()).into_owned();
        let twice = reduce(Some(&once), &eye_detected()).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn impostor_tag_deserializes_to_unrecognized() {
        let action: GestureAction =
            serde_json::from_str(r#"{ "type": "UNKNOWN_TAG" }"#).expect("catch-all should parse");
        assert_eq!(action, GestureAction::Unrecognized);

        let current = GestureState::with_label(EYE_GESTURE);
        let next = reduce(Some(&current), &action);
        assert!(matches!(next, Cow::Borrowed(_)));
    }

    #[test]
    fn tags_match_the_serialized_type_field() {
        let json = serde_json::to_string(&eye_detected()).expect("serialize");
        assert!(json.contains(eye_detected().tag()));
        assert_eq!(GestureAction::Unrecognized.tag(), "unrecognized");
    }

    #[test]
    fn recognized_tags_round_trip_through_serde() {
        let json = serde_json::to_string(&single_hand_detected()).expect("serialize");
        assert!(json.contains("single-hand-detected"));
        let back: GestureAction = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, single_hand_detected());

        let eye: GestureAction =
            serde_json::from_str(r#"{"type":"eye-detected"}"#).expect("deserialize");
        assert_eq!(eye, eye_detected());
    }
}
