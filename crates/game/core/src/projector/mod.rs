//! Mode7-style perspective projection of the ground plane.
//!
//! Each screen scanline below the horizon maps to a fixed distance in front of
//! the camera. Each column on that scanline is rotated by the camera yaw into
//! world space and sampled from a [`TerrainTexture`], then blended toward the
//! sky color with distance. Rows above the horizon show a vertical sky
//! gradient.
//!
//! The projector is a pure function of camera state; it never touches the
//! battle or encounter flow.
mod texture;

pub use texture::{Rgb, TerrainTexture, TextureImage};

use std::f32::consts::TAU;

use crate::config::GameConfig;

/// Camera state in world (texel) units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    /// Yaw in radians, kept in `[0, 2π)`.
    pub yaw: f32,
    pub height: f32,
    /// Camera-to-screen distance.
    pub focal_distance: f32,
}

impl Camera {
    pub const DEFAULT_HEIGHT: f32 = 100.0;
    pub const DEFAULT_FOCAL_DISTANCE: f32 = 200.0;

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            yaw: 0.0,
            height: Self::DEFAULT_HEIGHT,
            focal_distance: Self::DEFAULT_FOCAL_DISTANCE,
        }
    }
}

/// World-space sample point of one ground pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundSample {
    pub world_x: f32,
    pub world_y: f32,
    pub distance: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projector {
    screen_width: u32,
    screen_height: u32,
    horizon: u32,
    map_width: f32,
    map_height: f32,
    camera: Camera,
}

impl Projector {
    pub const SKY_TOP: Rgb = Rgb::new(135, 206, 235);
    pub const SKY_HORIZON: Rgb = Rgb::new(100, 149, 237);
    /// Color distant ground fades into.
    pub const FOG_COLOR: Rgb = Self::SKY_TOP;

    const FALLBACK_GRASS: Rgb = Rgb::new(94, 170, 60);
    const FALLBACK_WATER: Rgb = Rgb::new(30, 77, 139);
    const FALLBACK_TILE: f32 = 16.0;

    /// Projector for a screen of the given size over a map of the given size
    /// (in world units). The horizon sits a third of the way down and the
    /// camera starts at the map centre.
    pub fn new(screen_width: u32, screen_height: u32, map_width: u32, map_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            horizon: screen_height / 3,
            map_width: map_width.max(1) as f32,
            map_height: map_height.max(1) as f32,
            camera: Camera::at(map_width as f32 / 2.0, map_height as f32 / 2.0),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Turns the camera, keeping yaw in `[0, 2π)`.
    pub fn rotate(&mut self, delta: f32) {
        self.camera.yaw = wrap_coordinate(self.camera.yaw + delta, TAU);
    }

    /// Moves along the view direction, wrapping onto the map.
    pub fn move_forward(&mut self, amount: f32) {
        let (sin, cos) = self.camera.yaw.sin_cos();
        self.camera.x = wrap_coordinate(self.camera.x + sin * amount, self.map_width);
        self.camera.y = wrap_coordinate(self.camera.y + cos * amount, self.map_height);
    }

    /// Inverse-perspective lookup for a screen pixel. `None` above the horizon.
    pub fn ground_sample(&self, x: u32, y: u32) -> Option<GroundSample> {
        if y < self.horizon {
            return None;
        }
        let camera = &self.camera;
        let distance = (camera.height * camera.focal_distance) / (y - self.horizon + 1) as f32;
        let scale = distance / camera.focal_distance;

        let screen_x = (x as f32 - self.screen_width as f32 / 2.0) * scale;
        let screen_y = distance;
        let (sin, cos) = camera.yaw.sin_cos();

        Some(GroundSample {
            world_x: camera.x + (screen_x * cos - screen_y * sin),
            world_y: camera.y + (screen_x * sin + screen_y * cos),
            distance,
        })
    }

    /// Fog blend factor for a ground distance.
    pub fn fog_factor(distance: f32) -> f32 {
        (distance / GameConfig::FOG_DISTANCE).clamp(0.0, GameConfig::FOG_MAX)
    }

    pub fn sky_color(&self, y: u32) -> Rgb {
        if self.horizon == 0 {
            return Self::SKY_HORIZON;
        }
        let t = y.min(self.horizon) as f32 / self.horizon as f32;
        Self::SKY_TOP.lerp(Self::SKY_HORIZON, t)
    }

    /// Color of one screen pixel. Without a texture the ground falls back to a
    /// procedural checker of grass and water.
    pub fn pixel(&self, x: u32, y: u32, texture: Option<&dyn TerrainTexture>) -> Rgb {
        let Some(sample) = self.ground_sample(x, y) else {
            return self.sky_color(y);
        };

        let base = texture
            .and_then(|texture| {
                let map_x = wrap_coordinate(sample.world_x.trunc(), self.map_width) as i64;
                let map_y = wrap_coordinate(sample.world_y.trunc(), self.map_height) as i64;
                texture.sample(map_x, map_y)
            })
            .unwrap_or_else(|| Self::fallback_color(sample.world_x, sample.world_y));

        base.lerp(Self::FOG_COLOR, Self::fog_factor(sample.distance))
    }

    /// Renders the whole screen into a row-major buffer.
    pub fn render(&self, texture: Option<&dyn TerrainTexture>) -> Vec<Rgb> {
        let mut buffer = vec![Rgb::default(); self.screen_width as usize * self.screen_height as usize];
        self.render_into(texture, &mut buffer);
        buffer
    }

    /// Renders into an existing buffer. Pixels past the buffer end are skipped.
    pub fn render_into(&self, texture: Option<&dyn TerrainTexture>, buffer: &mut [Rgb]) {
        let width = self.screen_width as usize;
        if width == 0 {
            return;
        }
        for (row, line) in buffer.chunks_mut(width).enumerate().take(self.screen_height as usize) {
            for (column, pixel) in line.iter_mut().enumerate() {
                *pixel = self.pixel(column as u32, row as u32, texture);
            }
        }
    }

    /// Flat procedural ground used when no texture is available: 16-unit
    /// tiles, water wherever the tile indices sum to a multiple of five.
    pub fn fallback_color(world_x: f32, world_y: f32) -> Rgb {
        let tile_x = (world_x / Self::FALLBACK_TILE) as i32 % 16;
        let tile_y = (world_y / Self::FALLBACK_TILE) as i32 % 16;
        if (tile_x + tile_y) % 5 == 0 {
            Self::FALLBACK_WATER
        } else {
            Self::FALLBACK_GRASS
        }
    }
}

/// `rem_euclid` can round up to exactly `extent` for tiny negative inputs.
fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}
