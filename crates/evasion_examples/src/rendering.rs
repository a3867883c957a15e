//! PNG rendering of an arena snapshot: pillars, debug gizmos and trails.
use std::path::Path;

use evasion::prelude::*;
use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};

use crate::world::ArenaWorld;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image size in pixels.
    pub image_size: (u32, u32),
    /// World half extent mapped onto the image.
    pub half_extent: f32,
    pub background: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), half_extent: f32) -> Self {
        Self {
            image_size,
            half_extent,
            background: [235, 235, 235],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    fn to_px(&self, p: Vec2) -> (i32, i32) {
        let (w, h) = self.image_size;
        let u = (p.x + self.half_extent) / (2.0 * self.half_extent);
        let v = (p.y + self.half_extent) / (2.0 * self.half_extent);
        ((u * w as f32) as i32, ((1.0 - v) * h as f32) as i32)
    }

    fn scale(&self, world_len: f32) -> i32 {
        ((world_len / (2.0 * self.half_extent)) * self.image_size.0 as f32)
            .round()
            .max(1.0) as i32
    }
}

/// Everything drawn into one image.
#[derive(Default)]
pub struct Scene<'a> {
    pub world: Option<&'a ArenaWorld>,
    pub gizmos: Vec<DebugGizmo>,
    pub agent_trail: Vec<Vec3>,
    pub threat_trail: Vec<Vec3>,
    /// Plain 2D points, for sampler-only renders.
    pub points: Vec<(Vec2, f32)>,
}

fn fill_circle(img: &mut RgbImage, (cx, cy): (i32, i32), r: i32, color: [u8; 3]) {
    let (w, h) = img.dimensions();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                img.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }
}

fn gizmo_color(role: GizmoRole) -> [u8; 3] {
    match role {
        GizmoRole::Sampled => [180, 180, 180],
        GizmoRole::Valid => [40, 160, 60],
        GizmoRole::Target => [210, 40, 40],
    }
}

pub fn render_scene_to_png(
    scene: &Scene<'_>,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    if let Some(world) = scene.world {
        for pillar in &world.pillars {
            fill_circle(
                &mut img,
                config.to_px(pillar.center),
                config.scale(pillar.radius),
                [90, 90, 110],
            );
        }
    }

    for &(p, radius) in &scene.points {
        fill_circle(&mut img, config.to_px(p), config.scale(radius), [30, 90, 200]);
    }

    for gizmo in &scene.gizmos {
        let p = Vec2::new(gizmo.position.x, gizmo.position.z);
        fill_circle(
            &mut img,
            config.to_px(p),
            config.scale(gizmo.radius),
            gizmo_color(gizmo.role),
        );
    }

    for (trail, color) in [
        (&scene.agent_trail, [30, 90, 200]),
        (&scene.threat_trail, [20, 20, 20]),
    ] {
        for p in trail {
            fill_circle(&mut img, config.to_px(Vec2::new(p.x, p.z)), 1, color);
        }
    }

    img.save(path.as_ref())?;
    tracing::info!("Wrote {}", path.as_ref().display());
    Ok(())
}
