use anyhow::{Context, Result};
use crossbeam_channel::{select, unbounded, Receiver, Sender};
use glam::Vec3;
use log::{debug, info};
use rayon::ThreadPoolBuilder;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::config::WorldConfig;
use crate::world::{ChunkCoord, MaterialRegistry, MeshUpdate, World};

/// Inbound message from the rendering collaborator: the viewer moved.
/// No acknowledgment is sent.
#[derive(Debug, Clone, Copy)]
pub struct ViewerUpdate {
    pub position: Vec3,
}

/// The background generation context. Owns the world and a generation
/// thread pool; talks to the foreground exclusively through the two
/// message channels. Each viewer update schedules one independent task per
/// missing chunk coordinate, so a slow generation never blocks the rest.
pub struct VoxelEngine {
    world: Arc<World>,
    viewer_queue: Sender<ViewerUpdate>,
    dispatcher: Option<JoinHandle<()>>,
    stop: Sender<()>,
}

impl VoxelEngine {
    /// Builds the world, both protocol channels and the dispatcher thread.
    /// Returns the engine plus the receiving end of the mesh-update
    /// channel, which the rendering collaborator consumes.
    pub fn new(config: WorldConfig) -> Result<(Self, Receiver<MeshUpdate>)> {
        let materials = Arc::new(MaterialRegistry::with_defaults());
        let (update_sender, update_receiver) = unbounded();
        let world = Arc::new(World::new(config.clone(), materials, update_sender)?);

        let (viewer_sender, viewer_receiver) = unbounded::<ViewerUpdate>();
        let (stop_sender, stop_receiver) = unbounded::<()>();
        let generation_pool = ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .context("Failed to create generation pool")?;

        let dispatcher = std::thread::spawn({
            let world = world.clone();
            let radius = config.view_radius;
            move || {
                loop {
                    // The stop channel wakes the thread even while viewer
                    // sender clones are still alive out in the renderer.
                    select! {
                        recv(stop_receiver) -> _ => break,
                        recv(viewer_receiver) -> message => {
                            let Ok(update) = message else { break };
                            let center = ChunkCoord::from_world_pos(update.position);
                            for coord in coords_in_radius(center, radius) {
                                if world.registry().contains(coord) {
                                    continue;
                                }
                                debug!("Scheduling generation of chunk {:?}", coord);
                                let world = world.clone();
                                generation_pool.spawn(move || {
                                    world.get_or_create(coord);
                                });
                            }
                        }
                    }
                }
                // Dropping the pool drains every scheduled task; once a
                // creation is queued it always completes.
                info!("Chunk dispatcher stopped");
            }
        });

        Ok((
            Self {
                world,
                viewer_queue: viewer_sender,
                dispatcher: Some(dispatcher),
                stop: stop_sender,
            },
            update_receiver,
        ))
    }

    /// Inbound endpoint handed to the rendering collaborator.
    pub fn viewer_sender(&self) -> Sender<ViewerUpdate> {
        self.viewer_queue.clone()
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Stops accepting viewer updates and joins the dispatcher. Already
    /// scheduled chunk creations still run to completion. Viewer sender
    /// clones still held by the collaborator do not delay the join.
    pub fn shutdown(mut self) {
        let _ = self.stop.send(());
        drop(self.viewer_queue);
        if let Some(handle) = self.dispatcher.take() {
            let _ = handle.join();
        }
    }
}

/// Chunk coordinates within the horizontal Chebyshev radius of `center`,
/// on the viewer's own chunk layer.
fn coords_in_radius(center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    let mut coords = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            coords.push(ChunkCoord::new(
                center.x() + dx,
                center.y(),
                center.z() + dz,
            ));
        }
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorKind;
    use std::collections::HashSet;
    use std::time::Duration;

    fn flat_config() -> WorldConfig {
        WorldConfig {
            generator: GeneratorKind::Flat,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn test_coords_in_radius_is_square() {
        let coords = coords_in_radius(ChunkCoord::new(0, 1, 0), 2);
        assert_eq!(coords.len(), 25);
        assert!(coords.contains(&ChunkCoord::new(-2, 1, 2)));
        assert!(coords.iter().all(|coord| coord.y() == 1));
    }

    #[test]
    fn test_viewer_update_materializes_radius() {
        let (engine, updates) = VoxelEngine::new(flat_config()).unwrap();
        let viewer = engine.viewer_sender();

        viewer
            .send(ViewerUpdate {
                position: Vec3::new(8.0, 8.0, 8.0),
            })
            .unwrap();

        // 25 chunks plus neighbor refreshes; wait until every coordinate
        // in the square has reported at least once.
        let expected: HashSet<_> = coords_in_radius(ChunkCoord::new(0, 0, 0), 2)
            .into_iter()
            .collect();
        let mut seen = HashSet::new();
        while seen.len() < expected.len() {
            let update = updates
                .recv_timeout(Duration::from_secs(10))
                .expect("mesh updates dried up before the radius was covered");
            assert!(!update.faces.is_empty());
            assert!(!update.occupied.is_empty());
            seen.insert(update.coord);
        }
        assert_eq!(seen, expected);
        assert_eq!(engine.world().registry().len(), 25);

        engine.shutdown();
    }

    #[test]
    fn test_repeat_viewer_update_schedules_nothing() {
        let (engine, updates) = VoxelEngine::new(flat_config()).unwrap();
        let viewer = engine.viewer_sender();
        let position = Vec3::ZERO;

        viewer.send(ViewerUpdate { position }).unwrap();
        while engine.world().registry().len() < 25 {
            std::thread::sleep(Duration::from_millis(10));
        }
        while updates.recv_timeout(Duration::from_millis(200)).is_ok() {}

        viewer.send(ViewerUpdate { position }).unwrap();
        assert!(updates.recv_timeout(Duration::from_millis(300)).is_err());
        assert_eq!(engine.world().registry().len(), 25);

        engine.shutdown();
    }

    #[test]
    fn test_shutdown_joins_dispatcher() {
        let (engine, _updates) = VoxelEngine::new(flat_config()).unwrap();
        engine.shutdown();
    }

    #[test]
    fn test_shutdown_returns_while_viewer_sender_alive() {
        let (engine, _updates) = VoxelEngine::new(flat_config()).unwrap();
        let viewer = engine.viewer_sender();

        let (done_sender, done_receiver) = unbounded();
        std::thread::spawn(move || {
            engine.shutdown();
            let _ = done_sender.send(());
        });

        done_receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("shutdown must not wait on outstanding viewer senders");
        drop(viewer);
    }
}
