use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use skyward_sim::InputState;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameAction {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    /// Held to orbit the camera (left mouse drag).
    OrbitDrag,
    /// Mouse motion driving the camera orbit.
    #[actionlike(DualAxis)]
    Orbit,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<GameAction>::default());

    app.register_type::<GameAction>();

    app.insert_resource(default_input_map());
    app.insert_resource(ActionState::<GameAction>::default());
}

fn default_input_map() -> InputMap<GameAction> {
    InputMap::new([
        (GameAction::Forward, KeyCode::KeyW),
        (GameAction::Forward, KeyCode::ArrowUp),
        (GameAction::Back, KeyCode::KeyS),
        (GameAction::Back, KeyCode::ArrowDown),
        (GameAction::Left, KeyCode::KeyA),
        (GameAction::Left, KeyCode::ArrowLeft),
        (GameAction::Right, KeyCode::KeyD),
        (GameAction::Right, KeyCode::ArrowRight),
        (GameAction::Jump, KeyCode::Space),
    ])
    .with(GameAction::OrbitDrag, MouseButton::Left)
    .with_dual_axis(GameAction::Orbit, MouseMove::default())
}

/// The held state of every action, sampled once per tick.
pub fn input_snapshot(actions: &ActionState<GameAction>) -> InputState {
    InputState {
        forward: actions.pressed(&GameAction::Forward),
        back: actions.pressed(&GameAction::Back),
        left: actions.pressed(&GameAction::Left),
        right: actions.pressed(&GameAction::Right),
        jump: actions.pressed(&GameAction::Jump),
    }
}
