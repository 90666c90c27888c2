use bevy::prelude::*;
use skyward_sim::PLAYER_VISUAL_DROP;

use crate::game::{Game, GameSystems, LastTick, init_simulation, to_quat, to_vec3};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Startup,
        spawn_player_visual
            .after(init_simulation)
            .run_if(resource_exists::<Game>),
    );
    app.add_systems(Update, sync_player_visual.in_set(GameSystems::Sync));
}

/// Visual proxy of the player body. Its origin sits at the feet of the cube.
#[derive(Component)]
pub struct PlayerVisual;

fn spawn_player_visual(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    game: Res<Game>,
) {
    let side = game.0.settings().player_half_extent * 2.0;
    let start = match game.0.player_translation() {
        Ok(t) => to_vec3(t) - Vec3::Y * PLAYER_VISUAL_DROP,
        Err(err) => {
            warn!("player body missing at startup: {err}");
            Vec3::ZERO
        }
    };

    let body_mat = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.9, 0.8),
        ..default()
    });
    let eye_mesh = meshes.add(Mesh::from(Sphere { radius: 0.1 }));
    let eye_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 1.0, 1.0),
        ..default()
    });

    // The visual yaw is offset by a quarter turn, so the face points along +X in model space.
    let eye = |z: f32| {
        (
            Mesh3d(eye_mesh.clone()),
            MeshMaterial3d(eye_mat.clone()),
            Transform::from_xyz(side * 0.5, side * 0.7, z),
        )
    };

    commands.spawn((
        Name::new("Player"),
        PlayerVisual,
        Transform::from_translation(start),
        Visibility::default(),
        children![
            (
                Mesh3d(meshes.add(Cuboid::new(side, side, side))),
                MeshMaterial3d(body_mat),
                Transform::from_xyz(0.0, PLAYER_VISUAL_DROP, 0.0),
            ),
            eye(-0.2),
            eye(0.2),
        ],
    ));
}

fn sync_player_visual(
    last: Res<LastTick>,
    mut visual: Query<&mut Transform, With<PlayerVisual>>,
) {
    let Some(report) = &last.0 else {
        return;
    };
    let Ok(mut tf) = visual.single_mut() else {
        return;
    };
    tf.translation = to_vec3(report.player_visual.translation);
    tf.rotation = to_quat(report.player_visual.rotation);
}
