//! Per-pixel Phong lighting from a single point light
//!
//! Lighting is computed in the space the world matrix maps into, with the
//! viewer at the origin. Normals and positions are interpolated
//! perspective-correct and the normal is renormalized per pixel.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Color, Effect, Mat4, Transforms, Varying, Vec3, Vec4, Viewport};

/// Mesh vertex with a surface normal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalVertex {
    pub pos: Vec3,
    pub normal: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongOut {
    pub pos: Vec4,
    pub world_pos: Vec3,
    pub normal: Vec3,
}

crate::impl_attributes!(PhongOut { pos, world_pos, normal });

impl Varying for PhongOut {
    fn position(&self) -> Vec4 {
        self.pos
    }
}

/// Point light and material parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongLight {
    /// Light position in model space, moved by the world matrix
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub material: Vec3,
    pub quadratic_attenuation: f32,
    pub linear_attenuation: f32,
    pub constant_attenuation: f32,
    pub diffuse_coeff: f32,
    pub specular_coeff: f32,
    pub specular_power: f32,
}

impl Default for PhongLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.5),
            ambient: Vec3::new(0.1, 0.1, 0.1),
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            material: Vec3::new(0.8, 0.85, 1.0),
            quadratic_attenuation: 2.619,
            linear_attenuation: 1.0,
            constant_attenuation: 0.382,
            diffuse_coeff: 1.0,
            specular_coeff: 0.6,
            specular_power: 60.0,
        }
    }
}

impl PhongLight {
    fn attenuation(&self, dist: f32) -> f32 {
        1.0 / (self.quadratic_attenuation * dist * dist + self.linear_attenuation * dist + self.constant_attenuation)
    }
}

#[derive(Debug, Clone)]
pub struct PhongEffect {
    viewport: Viewport,
    transforms: Transforms,
    light: PhongLight,
    /// `light.position` after the world transform
    light_pos: Vec3,
}

impl PhongEffect {
    pub fn new(viewport: Viewport) -> Self {
        let mut effect = Self {
            viewport,
            transforms: Transforms::default(),
            light: PhongLight::default(),
            light_pos: Vec3::ZERO,
        };
        effect.refresh_light();
        effect
    }

    pub fn bind_world(&mut self, world: Mat4) {
        self.transforms.bind_world(world);
        self.refresh_light();
    }

    pub fn bind_projection(&mut self, projection: Mat4) {
        self.transforms.bind_projection(projection);
    }

    pub fn set_light(&mut self, light: PhongLight) {
        self.light = light;
        self.refresh_light();
    }

    pub fn light(&self) -> &PhongLight {
        &self.light
    }

    /// Light position as seen by the pixel shader
    pub fn light_position(&self) -> Vec3 {
        self.light_pos
    }

    fn refresh_light(&mut self) {
        self.light_pos = self.transforms.world().transform_point(self.light.position).xyz();
    }

    fn shade(&self, world_pos: Vec3, normal: Vec3) -> Vec3 {
        let light = &self.light;
        let n = normal.normalize();
        let to_light = self.light_pos - world_pos;
        let dist = to_light.len();
        let dir = to_light.normalize();
        let att = light.attenuation(dist);

        let diffuse = light.diffuse * (light.diffuse_coeff * att * dir.dot(n).max(0.0));

        let r = (n * (2.0 * to_light.dot(n)) - to_light).normalize();
        let v = (-world_pos).normalize();
        let specular = light.specular * (light.specular_coeff * att * r.dot(v).max(0.0).powf(light.specular_power));

        light.material.hadamard(light.ambient + diffuse + specular).saturate()
    }
}

impl Effect for PhongEffect {
    type Vertex = NormalVertex;
    type VsOut = PhongOut;
    type GsOut = PhongOut;

    fn vertex_shader(&self, vertex: &NormalVertex) -> PhongOut {
        let world = self.transforms.world();
        PhongOut {
            pos: self.transforms.proj_world().transform_point(vertex.pos),
            world_pos: world.transform_point(vertex.pos).xyz(),
            normal: world.transform_vector(vertex.normal),
        }
    }

    fn geometry_shader(&self, v0: &PhongOut, v1: &PhongOut, v2: &PhongOut, _triangle_index: usize) -> [PhongOut; 3] {
        [*v0, *v1, *v2]
    }

    fn screen_transform(&self, vertex: &PhongOut) -> PhongOut {
        let pos = self.viewport.to_screen(vertex.pos);
        PhongOut {
            pos,
            world_pos: vertex.world_pos * pos.w,
            normal: vertex.normal * pos.w,
        }
    }

    fn pixel_shader(&self, vertex: &PhongOut) -> Color {
        let w = 1.0 / vertex.pos.w;
        Color::from_unit_rgb(self.shade(vertex.world_pos * w, vertex.normal * w))
    }
}
