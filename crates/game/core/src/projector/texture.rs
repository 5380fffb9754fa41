use crate::world::{TerrainTable, TileGrid};

/// 24-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    /// Channels are truncated, not rounded.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).clamp(0.0, 255.0) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Ground texture the projector samples from.
pub trait TerrainTexture {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Color at an in-range texel.
    fn texel(&self, x: u32, y: u32) -> Rgb;

    /// Color at any coordinate, wrapped onto the texture.
    fn sample(&self, x: i64, y: i64) -> Option<Rgb> {
        let (width, height) = (self.width() as i64, self.height() as i64);
        if width == 0 || height == 0 {
            return None;
        }
        Some(self.texel(x.rem_euclid(width) as u32, y.rem_euclid(height) as u32))
    }
}

/// In-memory row-major texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl TextureImage {
    /// Wraps a pixel buffer. `None` if the buffer does not match the size.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Bakes a tile grid into a texture, one `tile_size × tile_size` block
    /// per tile, colored from the terrain table (or the default palette).
    pub fn from_grid(grid: &TileGrid, table: &TerrainTable, tile_size: u32) -> Self {
        let tile_size = tile_size.max(1);
        let dims = grid.dimensions();
        let width = dims.width * tile_size;
        let height = dims.height * tile_size;

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for py in 0..height {
            for px in 0..width {
                let terrain = grid.terrain_at((px / tile_size) as i32, (py / tile_size) as i32);
                pixels.push(table.color(terrain));
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

impl TerrainTexture for TextureImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[(y * self.width + x) as usize]
    }
}
