//! Demo scenes: a spinning cube under each effect

pub mod cube;

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::config::RenderConfig;
use crate::effects::{ColorEffect, PhongEffect, SolidEffect, TextureEffect};
use crate::error::Error;
use crate::rasterizer::{
    wrap_angle, Color, DepthBuffer, DrawStats, Effect, Framebuffer, Mat4, Mesh, Pipeline, Texture, Vec3,
};

/// Face colors of the solid cube, in face order
pub const FACE_PALETTE: [Color; 6] = [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW, Color::CYAN, Color::MAGENTA];

/// Something that can be animated and drawn into a frame
pub trait Scene {
    fn name(&self) -> &str;

    /// Advance the animation by `dt` seconds
    fn update(&mut self, dt: f32);

    fn draw(&self, fb: &mut Framebuffer, depth: &mut DepthBuffer) -> DrawStats;
}

/// Which scene to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum SceneKind {
    #[default]
    SolidCube,
    ColorCube,
    TexturedCube,
    PhongCube,
}

impl SceneKind {
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::SolidCube => "solid-cube",
            SceneKind::ColorCube => "color-cube",
            SceneKind::TexturedCube => "textured-cube",
            SceneKind::PhongCube => "phong-cube",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Effects whose model transform a scene can rebind between frames
pub trait BindWorld {
    fn bind_world(&mut self, world: Mat4);
}

impl BindWorld for SolidEffect {
    fn bind_world(&mut self, world: Mat4) {
        SolidEffect::bind_world(self, world);
    }
}

impl BindWorld for ColorEffect {
    fn bind_world(&mut self, world: Mat4) {
        ColorEffect::bind_world(self, world);
    }
}

impl BindWorld for TextureEffect {
    fn bind_world(&mut self, world: Mat4) {
        TextureEffect::bind_world(self, world);
    }
}

impl BindWorld for PhongEffect {
    fn bind_world(&mut self, world: Mat4) {
        PhongEffect::bind_world(self, world);
    }
}

/// A cube at a fixed position spinning about its x and y axes
pub struct CubeScene<E: Effect> {
    name: &'static str,
    mesh: Mesh<E::Vertex>,
    pipeline: Pipeline<E>,
    position: Vec3,
    angles: Vec3,
    angular_speed: f32,
}

impl<E: Effect + BindWorld> CubeScene<E> {
    pub fn new(name: &'static str, mesh: Mesh<E::Vertex>, effect: E, position: Vec3, config: &RenderConfig) -> Self {
        let mut scene = Self {
            name,
            mesh,
            pipeline: Pipeline::new(effect),
            position,
            angles: config.initial_angles,
            angular_speed: config.angular_speed,
        };
        scene.rebind();
        scene
    }

    pub fn angles(&self) -> Vec3 {
        self.angles
    }

    pub fn effect(&self) -> &E {
        &self.pipeline.effect
    }

    /// `translation * rx * ry * rz`
    pub fn world(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_x(self.angles.x)
            * Mat4::rotation_y(self.angles.y)
            * Mat4::rotation_z(self.angles.z)
    }

    fn rebind(&mut self) {
        let world = self.world();
        self.pipeline.effect.bind_world(world);
    }
}

impl<E: Effect + BindWorld> Scene for CubeScene<E> {
    fn name(&self) -> &str {
        self.name
    }

    fn update(&mut self, dt: f32) {
        let step = self.angular_speed * dt;
        self.angles.x = wrap_angle(self.angles.x + step);
        self.angles.y = wrap_angle(self.angles.y + step);
        self.rebind();
    }

    fn draw(&self, fb: &mut Framebuffer, depth: &mut DepthBuffer) -> DrawStats {
        self.pipeline.draw(&self.mesh, fb, depth)
    }
}

/// Texture for the textured cube: the configured image or a checkerboard
fn scene_texture(config: &RenderConfig) -> Result<Texture, Error> {
    match &config.texture {
        Some(path) => Ok(Texture::from_file(path)?),
        None => {
            log::debug!("No texture configured, using checkerboard");
            Ok(Texture::checkerboard(64, 64, 8, Color::WHITE, Color::new(40, 40, 40)))
        }
    }
}

/// Construct the scene named by `config.scene`
pub fn build_scene(config: &RenderConfig) -> Result<Box<dyn Scene>, Error> {
    let viewport = config.viewport();
    let projection = config.projection();
    let at = Vec3::new(0.0, 0.0, -2.0);

    if config.texture.is_some() && config.scene != SceneKind::TexturedCube {
        log::warn!("Texture is only used by the {} scene, ignoring it", SceneKind::TexturedCube);
    }

    let scene: Box<dyn Scene> = match config.scene {
        SceneKind::SolidCube => {
            let mut effect = SolidEffect::new(viewport);
            effect.bind_projection(projection);
            effect.set_face_colors(FACE_PALETTE.to_vec());
            Box::new(CubeScene::new(SceneKind::SolidCube.name(), cube::positions(1.0), effect, at, config))
        }
        SceneKind::ColorCube => {
            let mut effect = ColorEffect::new(viewport);
            effect.bind_projection(projection);
            Box::new(CubeScene::new(SceneKind::ColorCube.name(), cube::colored(1.0), effect, at, config))
        }
        SceneKind::TexturedCube => {
            let mut effect = TextureEffect::new(viewport, scene_texture(config)?);
            effect.bind_projection(projection);
            Box::new(CubeScene::new(SceneKind::TexturedCube.name(), cube::textured(1.0), effect, at, config))
        }
        SceneKind::PhongCube => {
            let mut effect = PhongEffect::new(viewport);
            effect.bind_projection(projection);
            let at = Vec3::new(0.0, 0.0, -2.5);
            Box::new(CubeScene::new(SceneKind::PhongCube.name(), cube::with_normals(1.0), effect, at, config))
        }
    };

    log::info!("Built {} scene ({}x{})", scene.name(), config.width, config.height);
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::f32::consts::{FRAC_PI_4, TAU};

    fn render(config: &RenderConfig) -> Framebuffer {
        let scene = build_scene(config).unwrap();
        let mut fb = Framebuffer::new(config.width, config.height);
        let mut depth = DepthBuffer::new(config.width, config.height);
        fb.clear(config.clear_color);
        scene.draw(&mut fb, &mut depth);
        fb
    }

    fn covered(fb: &Framebuffer) -> usize {
        let clear = Color::BLACK.to_u32();
        fb.pixels().iter().filter(|&&p| p != clear).count()
    }

    #[test]
    fn test_face_on_cube_is_square() {
        let config = RenderConfig { initial_angles: Vec3::ZERO, ..RenderConfig::default() };
        let fb = render(&config);

        // Front face at distance 1.5 spans 266 pixel centers on each axis:
        // x in 267..533, y in 167..433. Everything else lies behind it.
        let clear = Color::BLACK.to_u32();
        for (i, &p) in fb.pixels().iter().enumerate() {
            let (x, y) = (i % fb.width(), i / fb.width());
            let inside = (267..533).contains(&x) && (167..433).contains(&y);
            if !inside {
                assert_eq!(p, clear, "({x}, {y}) outside the face");
            }
        }
        assert_eq!(covered(&fb), 266 * 266);
        assert_eq!(fb.get_pixel(266, 300), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(267, 300), Some(FACE_PALETTE[1]));
        assert_eq!(fb.get_pixel(532, 300), Some(FACE_PALETTE[1]));
        assert_eq!(fb.get_pixel(533, 300), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(400, 166), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(400, 167), Some(FACE_PALETTE[1]));

        let front = fb.pixels().iter().filter(|&&p| p == FACE_PALETTE[1].to_u32()).count();
        assert_eq!(front, 266 * 266, "front face color must fill the whole square");
    }

    #[test]
    fn test_rotated_cube_has_no_gap_along_shared_edge() {
        let config = RenderConfig::default();
        assert_eq!(config.initial_angles, Vec3::new(0.0, FRAC_PI_4, 0.0));
        let fb = render(&config);

        let clear = Color::BLACK.to_u32();
        let mut colors = HashSet::new();
        for y in 0..fb.height() {
            let row = &fb.pixels()[y * fb.width()..(y + 1) * fb.width()];
            let hits: Vec<usize> = (0..row.len()).filter(|&x| row[x] != clear).collect();
            if let (Some(&first), Some(&last)) = (hits.first(), hits.last()) {
                assert_eq!(hits.len(), last - first + 1, "gap in row {y}");
                colors.extend(row[first..=last].iter().copied());
            }
        }
        assert!(colors.len() >= 2, "expected two faces, saw {colors:?}");
        assert!(colors.contains(&FACE_PALETTE[1].to_u32()));
    }

    #[test]
    fn test_update_spins_and_wraps() {
        let config = RenderConfig { initial_angles: Vec3::ZERO, angular_speed: 2.0, ..RenderConfig::default() };
        let mut scene = CubeScene::new("test", cube::positions(1.0), SolidEffect::new(config.viewport()), Vec3::ZERO, &config);
        scene.update(0.25);
        assert!((scene.angles().x - 0.5).abs() < 1e-6);
        assert!((scene.angles().y - 0.5).abs() < 1e-6);
        assert_eq!(scene.angles().z, 0.0);

        for _ in 0..20 {
            scene.update(0.5);
        }
        assert!(scene.angles().x >= 0.0 && scene.angles().x < TAU);
        assert_eq!(scene.effect().transforms().world(), scene.world());
    }

    #[test]
    fn test_every_scene_draws_something() {
        for kind in [SceneKind::SolidCube, SceneKind::ColorCube, SceneKind::TexturedCube, SceneKind::PhongCube] {
            let config = RenderConfig { width: 160, height: 120, scene: kind, ..RenderConfig::default() };
            let scene = build_scene(&config).unwrap();
            assert_eq!(scene.name(), kind.name());
            let mut fb = Framebuffer::new(160, 120);
            fb.clear(Color::BLACK);
            let mut depth = DepthBuffer::new(160, 120);
            let stats = scene.draw(&mut fb, &mut depth);
            assert_eq!(stats.triangles, 12);
            assert!(stats.pixels_shaded > 0, "{kind} shaded nothing");
            assert!(covered(&fb) > 0);
        }
    }

    #[test]
    fn test_missing_texture_is_an_error() {
        let config = RenderConfig {
            scene: SceneKind::TexturedCube,
            texture: Some("/definitely/not/here.png".into()),
            ..RenderConfig::default()
        };
        assert!(matches!(build_scene(&config), Err(Error::Texture(_))));
    }
}
