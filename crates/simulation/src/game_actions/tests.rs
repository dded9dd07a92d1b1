use super::*;
use crate::placement::PlacementError;
use crate::tiles::TileType;

#[test]
fn test_game_action_serialization() {
    let action = GameAction::SetRefreshRate { millis: 750 };
    let json = serde_json::to_string(&action).unwrap();
    let decoded: GameAction = serde_json::from_str(&json).unwrap();
    assert_eq!(action, decoded);

    let action = GameAction::PlaceTile {
        x: 10,
        y: 20,
        tile: TileType::ResidentialApartments,
    };
    let json = serde_json::to_string(&action).unwrap();
    let decoded: GameAction = serde_json::from_str(&json).unwrap();
    assert_eq!(action, decoded);
}

#[test]
fn test_action_parses_from_agent_json() {
    let decoded: GameAction =
        serde_json::from_str(r#"{"PlaceTile":{"x":3,"y":4,"tile":"Road"}}"#).unwrap();
    assert_eq!(
        decoded,
        GameAction::PlaceTile {
            x: 3,
            y: 4,
            tile: TileType::Road
        }
    );
    let decoded: GameAction = serde_json::from_str(r#""TriggerHyperSpeed""#).unwrap();
    assert_eq!(decoded, GameAction::TriggerHyperSpeed);
}

#[test]
fn test_action_result_serialization() {
    let res = ActionResult::Success;
    let json = serde_json::to_string(&res).unwrap();
    let decoded: ActionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(res, decoded);

    let res = ActionResult::Error(ActionError::InsufficientFunds {
        cost: 100,
        available: 5,
    });
    let json = serde_json::to_string(&res).unwrap();
    let decoded: ActionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(res, decoded);
}

#[test]
fn test_placement_error_conversion() {
    assert_eq!(
        ActionError::from(PlacementError::LevelLocked {
            required: 4,
            current: 1
        }),
        ActionError::LevelLocked {
            required: 4,
            current: 1
        }
    );
    assert_eq!(
        ActionError::from(PlacementError::OutOfBounds { x: 900, y: 0 }),
        ActionError::OutOfBounds
    );
}

#[test]
fn test_warning_accessors() {
    let res = ActionResult::SuccessWithWarning("clamped".into());
    assert!(res.is_success());
    assert_eq!(res.warning(), Some("clamped"));
    assert!(!ActionResult::Error(ActionError::OutOfBounds).is_success());
}
