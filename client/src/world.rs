use bevy::prelude::*;

use crate::game::{Game, GameSystems, LastTick, init_simulation, to_vec3};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Startup,
        setup.after(init_simulation).run_if(resource_exists::<Game>),
    );
    app.add_systems(Update, follow_light.in_set(GameSystems::Sync));
}

/// Light position relative to the player.
const LIGHT_OFFSET: Vec3 = Vec3::new(5.0, 10.0, 5.0);

#[derive(Component)]
struct FollowLight;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    game: Res<Game>,
) {
    let [hx, hy, hz] = game.0.settings().floor_half_extents;
    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    let [px, py, pz] = game.0.settings().player_spawn;
    let player = Vec3::new(px, py, pz);
    commands.spawn((
        FollowLight,
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(player + LIGHT_OFFSET).looking_at(player, Vec3::Y),
    ));
}

fn follow_light(last: Res<LastTick>, mut light: Query<&mut Transform, With<FollowLight>>) {
    let Some(report) = &last.0 else {
        return;
    };
    let Ok(mut tf) = light.single_mut() else {
        return;
    };
    let target = to_vec3(report.player_visual.translation);
    *tf = Transform::from_translation(target + LIGHT_OFFSET).looking_at(target, Vec3::Y);
}
