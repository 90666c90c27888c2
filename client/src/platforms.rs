use bevy::{platform::collections::HashMap, prelude::*};
use skyward_sim::{PlatformEvent, PlatformId};

use crate::game::{Game, GameSystems, LastTick, init_simulation, to_vec3};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PlatformEntityMapping>();
    app.add_systems(
        Startup,
        spawn_initial_platforms
            .after(init_simulation)
            .run_if(resource_exists::<Game>),
    );
    app.add_systems(Update, apply_platform_events.in_set(GameSystems::Sync));
}

/// Ties a simulation platform to its visual entity.
#[derive(Resource, Default)]
pub struct PlatformEntityMapping(pub HashMap<PlatformId, Entity>);

/// Every platform shares one mesh and one material.
#[derive(Resource)]
struct PlatformAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

#[derive(Component)]
pub struct PlatformVisual;

fn spawn_initial_platforms(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut mapping: ResMut<PlatformEntityMapping>,
    game: Res<Game>,
) {
    let [hx, hy, hz] = game.0.settings().platform_half_extents;
    let assets = PlatformAssets {
        mesh: meshes.add(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb_u8(124, 144, 255),
            perceptual_roughness: 0.8,
            ..default()
        }),
    };

    for platform in game.0.platforms() {
        spawn_platform(
            &mut commands,
            &assets,
            &mut mapping,
            platform.id,
            to_vec3(platform.translation),
        );
    }
    commands.insert_resource(assets);
}

fn apply_platform_events(
    mut commands: Commands,
    last: Res<LastTick>,
    assets: Option<Res<PlatformAssets>>,
    mut mapping: ResMut<PlatformEntityMapping>,
) {
    let Some(report) = &last.0 else {
        return;
    };
    let Some(assets) = assets else {
        return;
    };

    for event in &report.platform_events {
        match *event {
            PlatformEvent::Spawned { id, translation } => {
                spawn_platform(&mut commands, &assets, &mut mapping, id, to_vec3(translation));
            }
            PlatformEvent::Despawned { id } => {
                if let Some(entity) = mapping.0.remove(&id) {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

fn spawn_platform(
    commands: &mut Commands,
    assets: &PlatformAssets,
    mapping: &mut PlatformEntityMapping,
    id: PlatformId,
    translation: Vec3,
) {
    let entity = commands
        .spawn((
            Name::new(format!("Platform {}", id.0)),
            PlatformVisual,
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_translation(translation),
        ))
        .id();
    mapping.0.insert(id, entity);
}

#[cfg(test)]
mod tests {
    use nalgebra as na;
    use skyward_sim::{TickReport, VisualPose};

    use super::*;

    fn report(platform_events: Vec<PlatformEvent>) -> TickReport {
        TickReport {
            player_translation: na::Vector3::zeros(),
            player_visual: VisualPose {
                translation: na::Vector3::zeros(),
                rotation: na::UnitQuaternion::identity(),
            },
            elevation: 0,
            score: 0,
            score_changed: false,
            grounded: false,
            jumped: false,
            wrapped: false,
            platform_events,
        }
    }

    #[test]
    fn events_spawn_and_despawn_visuals() {
        let mut app = App::new();
        app.init_resource::<PlatformEntityMapping>();
        app.insert_resource(PlatformAssets {
            mesh: Handle::default(),
            material: Handle::default(),
        });
        app.add_systems(Update, apply_platform_events);

        let id = PlatformId(3);
        app.insert_resource(LastTick(Some(report(vec![PlatformEvent::Spawned {
            id,
            translation: na::Vector3::new(1.0, 22.0, 2.0),
        }]))));
        app.update();

        let entity = app.world().resource::<PlatformEntityMapping>().0[&id];
        let tf = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(tf.translation, Vec3::new(1.0, 22.0, 2.0));
        assert!(app.world().get::<PlatformVisual>(entity).is_some());

        app.insert_resource(LastTick(Some(report(vec![PlatformEvent::Despawned { id }]))));
        app.update();

        assert!(app.world().resource::<PlatformEntityMapping>().0.is_empty());
        assert!(app.world().get_entity(entity).is_err());
    }

    #[test]
    fn unknown_despawn_is_ignored() {
        let mut app = App::new();
        app.init_resource::<PlatformEntityMapping>();
        app.insert_resource(PlatformAssets {
            mesh: Handle::default(),
            material: Handle::default(),
        });
        app.add_systems(Update, apply_platform_events);
        app.insert_resource(LastTick(Some(report(vec![PlatformEvent::Despawned {
            id: PlatformId(99),
        }]))));
        app.update();
        assert!(app.world().resource::<PlatformEntityMapping>().0.is_empty());
    }
}
