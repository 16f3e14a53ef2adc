use crate::engine::error::ViewerError;
use crate::engine::host::{ViewerEntities, ViewerModel};
use crate::engine::loading::bounds::ModelBounds;
use crate::engine::session::{LoadOutcome, LoadTicket};
use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::scene::SceneInstanceReady;

/// Frames to wait for mesh AABBs before measuring with whatever is available.
const MAX_MEASURE_WAIT_FRAMES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadStage {
    Fetching,
    Instancing(Entity),
    Measuring { model: Entity, waited: u32 },
}

struct PendingModel {
    ticket: LoadTicket,
    path: String,
    handle: Handle<Gltf>,
    stage: LoadStage,
}

/// Tracks the single in-flight model load and its finished outcome.
#[derive(Resource, Default)]
pub struct ModelLoadTracker {
    pending: Option<PendingModel>,
    outcome: Option<LoadOutcome>,
}

impl ModelLoadTracker {
    pub fn begin(&mut self, ticket: LoadTicket, path: &str, handle: Handle<Gltf>) {
        self.pending = Some(PendingModel {
            ticket,
            path: path.to_string(),
            handle,
            stage: LoadStage::Fetching,
        });
    }

    /// Drop the in-flight load, if any. The asset handle is released with it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take_outcome(&mut self) -> Option<LoadOutcome> {
        self.outcome.take()
    }

    fn finish(&mut self, result: Result<ModelBounds, ViewerError>) {
        if let Some(pending) = self.pending.take() {
            self.outcome = Some((pending.ticket, result));
        }
    }

    fn stage(&self) -> Option<LoadStage> {
        self.pending.as_ref().map(|pending| pending.stage)
    }

    fn set_stage(&mut self, stage: LoadStage) {
        if let Some(pending) = self.pending.as_mut() {
            pending.stage = stage;
        }
    }

    fn instance_ready(&mut self, entity: Entity) {
        if self.stage() == Some(LoadStage::Instancing(entity)) {
            self.set_stage(LoadStage::Measuring {
                model: entity,
                waited: 0,
            });
        }
    }
}

/// Wait for the glTF asset, then spawn its scene hidden under the viewer root.
pub fn poll_model_asset(
    mut commands: Commands,
    mut tracker: ResMut<ModelLoadTracker>,
    mut entities: ResMut<ViewerEntities>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
) {
    let Some(pending) = tracker.pending.as_ref() else {
        return;
    };
    if pending.stage != LoadStage::Fetching {
        return;
    }
    let path = pending.path.clone();
    let handle = pending.handle.clone();

    match asset_server.load_state(handle.id()) {
        LoadState::Failed(error) => {
            tracker.finish(Err(ViewerError::AssetLoad {
                path,
                reason: error.to_string(),
            }));
        }
        LoadState::Loaded => {
            let Some(gltf) = gltfs.get(&handle) else {
                return;
            };
            let Some(scene) = gltf
                .default_scene
                .clone()
                .or_else(|| gltf.scenes.first().cloned())
            else {
                tracker.finish(Err(ViewerError::EmptyModel { path }));
                return;
            };

            let mut model = commands.spawn((
                Name::new("viewer_model"),
                SceneRoot(scene),
                Transform::default(),
                Visibility::Hidden,
                ViewerModel,
            ));
            if let Some(root) = entities.root {
                model.insert(ChildOf(root));
            }
            let model = model.id();
            entities.model = Some(model);
            tracker.set_stage(LoadStage::Instancing(model));
            debug!("Model asset {} fetched, instancing scene", path);
        }
        _ => {}
    }
}

pub fn on_model_instance_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut tracker: ResMut<ModelLoadTracker>,
) {
    tracker.instance_ready(trigger.target());
}

/// Accumulate world bounds over every mesh in the instanced model.
pub fn measure_model_bounds(
    mut tracker: ResMut<ModelLoadTracker>,
    children: Query<&Children>,
    meshes: Query<(Option<&Aabb>, &GlobalTransform), With<Mesh3d>>,
) {
    let Some(LoadStage::Measuring { model, waited }) = tracker.stage() else {
        return;
    };

    let mut bounds = ModelBounds::empty();
    let mut missing = 0;
    for entity in children.iter_descendants(model) {
        let Ok((aabb, transform)) = meshes.get(entity) else {
            continue;
        };
        match aabb {
            Some(aabb) => bounds.include_aabb(aabb, transform),
            None => missing += 1,
        }
    }

    if missing > 0 && waited < MAX_MEASURE_WAIT_FRAMES {
        tracker.set_stage(LoadStage::Measuring {
            model,
            waited: waited + 1,
        });
        return;
    }
    if missing > 0 {
        warn!("{} model meshes had no bounds, centring on the rest", missing);
    }
    tracker.finish(Ok(bounds));
}
