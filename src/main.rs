use anyhow::Result;
use glam::Vec3;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::time::Duration;

use blockfield::{ViewerUpdate, VoxelEngine, WorldConfig};

/// Headless demo: walks a viewer east across the world and drains the mesh
/// updates a renderer would consume.
fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    info!("Starting blockfield demo world");

    let (engine, updates) = VoxelEngine::new(WorldConfig::default())?;
    let viewer = engine.viewer_sender();

    for step in 0..6 {
        viewer.send(ViewerUpdate {
            position: Vec3::new(step as f32 * 16.0, 24.0, 0.0),
        })?;
    }

    let mut messages = 0usize;
    let mut faces = 0usize;
    while let Ok(update) = updates.recv_timeout(Duration::from_millis(500)) {
        messages += 1;
        faces = faces.saturating_add(update.faces.len());
        info!(
            "Chunk {:?}: {} faces, {} occupied cells (revision {})",
            update.coord,
            update.faces.len(),
            update.occupied.len(),
            update.revision
        );
    }

    info!(
        "Done: {} chunks generated, {} mesh updates, {} faces total",
        engine.world().registry().len(),
        messages,
        faces
    );
    engine.shutdown();
    Ok(())
}
