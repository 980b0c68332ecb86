//! Layered visual-novel characters.
//!
//! A character is a stack of groups (body, face, ...). Each group holds the
//! variants exported for it and shows one at a time; drawing composites the
//! current variant of every group in group order.

use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::assets::{ImageHandle, ResourceCache, asset_key};
use crate::config::{ConfigError, read_json};
use crate::geometry::Rect;
use crate::renderer::{Color, Surface};

/// Layered image export describing where every layer file sits.
///
/// ```json
/// { "width": 640, "height": 480,
///   "layers": [ { "name": "morshu_001.png", "index": 1,
///                 "offset_x": 250, "offset_y": 120, "width": 96, "height": 64 } ] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LayeredImage {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub offset_x: u32,
    #[serde(default)]
    pub offset_y: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl LayeredImage {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }
}

/// Which layer files belong to one group.
#[derive(Debug, Clone, Copy)]
pub struct GroupMapping {
    pub name: &'static str,
    pub assets: &'static [&'static str],
}

pub const MORSHU_GROUPS: &[GroupMapping] = &[
    GroupMapping { name: "body", assets: &["morshu_090.png"] },
    GroupMapping { name: "facial", assets: &["morshu_001.png", "morshu_002.png"] },
];

pub const ENDOU_GROUPS: &[GroupMapping] = &[
    GroupMapping {
        name: "body",
        assets: &["endou_044.png", "endou_047.png", "endou_050.png", "endou_053.png"],
    },
    GroupMapping {
        name: "facial",
        assets: &[
            "endou_001.png", "endou_002.png", "endou_003.png", "endou_004.png", "endou_005.png",
            "endou_006.png", "endou_007.png", "endou_008.png", "endou_009.png", "endou_010.png",
            "endou_011.png", "endou_012.png", "endou_013.png", "endou_014.png", "endou_015.png",
            "endou_016.png", "endou_017.png", "endou_018.png", "endou_019.png", "endou_020.png",
            "endou_021.png", "endou_022.png", "endou_023.png", "endou_024.png", "endou_025.png",
            "endou_026.png", "endou_027.png", "endou_028.png", "endou_029.png", "endou_030.png",
            "endou_031.png", "endou_032.png", "endou_033.png", "endou_034.png", "endou_035.png",
            "endou_036.png", "endou_037.png", "endou_038.png", "endou_039.png", "endou_040.png",
        ],
    },
];

// ── Groups ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SpriteVariant {
    pub name: String,
    /// Top-left corner inside the character canvas.
    pub offset: Vec2,
    /// Exported size; the image's own size wins once it is loaded.
    pub size: Vec2,
    pub image: ImageHandle,
}

impl SpriteVariant {
    pub fn draw_size(&self) -> Vec2 {
        match self.image.size() {
            Some((w, h)) => Vec2::new(w as f32, h as f32),
            None => self.size,
        }
    }
}

/// Variants of one group. Never empty.
#[derive(Debug, Clone)]
pub struct SpriteGroup {
    pub name: String,
    variants: Vec<SpriteVariant>,
    current: usize,
}

impl SpriteGroup {
    pub fn variants(&self) -> &[SpriteVariant] {
        &self.variants
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &SpriteVariant {
        &self.variants[self.current]
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.variants.len();
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.variants.len() - 1) % self.variants.len();
    }
}

// ── Pose ─────────────────────────────────────────────────────────────────────

/// Offset and scale applied around the centre of the character canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self { offset: Vec2::ZERO, scale: 1.0 }
    }
}

impl Pose {
    /// Idle bob: a slow breathing scale plus a faster vertical bounce.
    pub fn idle(tick: u64) -> Self {
        let t = tick as f32;
        Self {
            offset: Vec2::new(0.0, (t / 16.0).sin() * 10.0),
            scale: 0.975 + (t / 72.0).sin() * 0.025,
        }
    }
}

// ── VnCharacter ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct VnCharacter {
    pub name: String,
    /// Canvas size from the descriptor.
    pub size: Vec2,
    pub pose: Pose,
    groups: Vec<SpriteGroup>,
}

impl VnCharacter {
    /// Read a layered-image descriptor and build `mapping`'s groups from it.
    /// Layer files resolve relative to the descriptor and load through the cache.
    pub fn load(
        path: impl AsRef<Path>,
        name: &str,
        mapping: &[GroupMapping],
        resources: &mut ResourceCache,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let image = LayeredImage::load(path)?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::from_layers(name, &image, mapping, |file| resources.image(&asset_key(&dir.join(file)))))
    }

    /// Variants keep the descriptor's layer order. Groups that match no layer
    /// are dropped.
    pub fn from_layers(
        name: &str,
        image: &LayeredImage,
        mapping: &[GroupMapping],
        mut load: impl FnMut(&str) -> ImageHandle,
    ) -> Self {
        let mut groups = Vec::with_capacity(mapping.len());
        for group in mapping {
            let variants: Vec<SpriteVariant> = image
                .layers
                .iter()
                .filter(|layer| group.assets.contains(&layer.name.as_str()))
                .map(|layer| SpriteVariant {
                    name: layer.name.clone(),
                    offset: Vec2::new(layer.offset_x as f32, layer.offset_y as f32),
                    size: Vec2::new(layer.width as f32, layer.height as f32),
                    image: load(&layer.name),
                })
                .collect();
            if variants.is_empty() {
                log::warn!("{name}: no layers for group '{}'", group.name);
                continue;
            }
            groups.push(SpriteGroup { name: group.name.to_string(), variants, current: 0 });
        }

        Self {
            name: name.to_string(),
            size: Vec2::new(image.width as f32, image.height as f32),
            pose: Pose::default(),
            groups,
        }
    }

    pub fn groups(&self) -> &[SpriteGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&SpriteGroup> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut SpriteGroup> {
        self.groups.get_mut(index)
    }

    /// Screen rectangle of a layer at `offset` with natural `size`, after the pose.
    pub fn layer_rect(&self, offset: Vec2, size: Vec2) -> Rect {
        let center = self.size * 0.5;
        let pos = (offset - center + self.pose.offset) * self.pose.scale + center;
        Rect::from_pos_size(pos, size * self.pose.scale)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for group in &self.groups {
            let sprite = group.current();
            let dst = self.layer_rect(sprite.offset, sprite.draw_size());
            surface.draw_image(&sprite.image, None, dst, Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> LayeredImage {
        serde_json::from_str(
            r#"{ "width": 200, "height": 100, "layers": [
                { "name": "morshu_002.png", "offset_x": 10, "offset_y": 20, "width": 30, "height": 10 },
                { "name": "morshu_090.png", "width": 200, "height": 100 },
                { "name": "stray.png" },
                { "name": "morshu_001.png", "offset_x": 10, "offset_y": 20, "width": 30, "height": 10 }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn groups_follow_the_mapping_and_variants_the_layer_order() {
        let c = VnCharacter::from_layers("Morshu", &descriptor(), MORSHU_GROUPS, |_| ImageHandle::missing());
        let names: Vec<_> = c.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["body", "facial"]);
        let facial: Vec<_> = c.groups()[1].variants().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(facial, ["morshu_002.png", "morshu_001.png"]);
    }

    #[test]
    fn unmatched_groups_are_dropped() {
        let c = VnCharacter::from_layers("Endou", &descriptor(), ENDOU_GROUPS, |_| ImageHandle::missing());
        assert!(c.groups().is_empty());
    }

    #[test]
    fn variant_cycling_wraps_both_ways() {
        let mut c = VnCharacter::from_layers("Morshu", &descriptor(), MORSHU_GROUPS, |_| ImageHandle::missing());
        let facial = c.group_mut(1).unwrap();
        facial.prev();
        assert_eq!(facial.current_index(), 1);
        facial.next();
        assert_eq!(facial.current_index(), 0);
    }

    #[test]
    fn pose_scales_around_the_canvas_centre() {
        let mut c = VnCharacter::from_layers("Morshu", &descriptor(), MORSHU_GROUPS, |_| ImageHandle::missing());
        c.pose = Pose { offset: Vec2::new(0.0, 4.0), scale: 0.5 };
        let r = c.layer_rect(Vec2::ZERO, Vec2::new(200.0, 100.0));
        assert_eq!(r, Rect::new(50.0, 27.0, 100.0, 50.0));
    }

    #[test]
    fn idle_pose_stays_near_rest() {
        for tick in [0, 17, 500, 10_000] {
            let pose = Pose::idle(tick);
            assert!((0.95..=1.0).contains(&pose.scale));
            assert!(pose.offset.y.abs() <= 10.0);
        }
    }
}
