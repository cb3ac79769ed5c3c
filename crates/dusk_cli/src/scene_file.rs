//! JSON scene descriptions.
//!
//! A scene file names its materials once and lets spheres refer to them,
//! so many spheres can share one material:
//!
//! ```json
//! {
//!   "camera": { "look_from": [-2, 2, 1], "look_at": [0, 0, -1], "vfov": 40 },
//!   "materials": {
//!     "ground": { "type": "diffuse", "albedo": [0.8, 0.8, 0.0] },
//!     "glass": { "type": "dielectric", "refraction_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
//!     { "center": [0, 0, -1], "radius": 0.5, "material": "glass" }
//!   ]
//! }
//! ```

use crate::scenes::{CameraSpec, SceneSetup};
use anyhow::{bail, Context, Result};
use dusk_renderer::{
    CameraSettings, Color, Dielectric, DiffuseModel, Material, Point3, RenderConfig, Scene, Sphere,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

fn clear_glass() -> Color {
    Color::ONE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MaterialDesc {
    Diffuse {
        albedo: Color,
        #[serde(default)]
        model: DiffuseModel,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    Dielectric {
        refraction_index: f64,
        #[serde(default = "clear_glass")]
        tint: Color,
    },
}

impl MaterialDesc {
    pub fn to_material(&self) -> Material {
        match *self {
            MaterialDesc::Diffuse { albedo, model } => Material::diffuse_with(albedo, model),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDesc::Dielectric {
                refraction_index,
                tint,
            } => Material::Dielectric(Dielectric::tinted(refraction_index, tint)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    pub material: String,
}

/// Top-level scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraSettings,
    /// Render settings stored with the scene; command-line flags win
    #[serde(default)]
    pub render: Option<RenderConfig>,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

impl SceneFile {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("failed to parse scene file {}", path.display()))
    }

    /// Resolve material names and build the scene.
    pub fn build(&self) -> Result<SceneSetup> {
        let materials: BTreeMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), Arc::new(desc.to_material())))
            .collect();

        let mut world = Scene::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let Some(material) = materials.get(sphere.material.as_str()) else {
                bail!(
                    "sphere {} uses unknown material '{}'",
                    index,
                    sphere.material
                );
            };
            if sphere.radius == 0.0 || !sphere.radius.is_finite() {
                bail!("sphere {} has invalid radius {}", index, sphere.radius);
            }
            world.add(Box::new(Sphere::new(
                sphere.center,
                sphere.radius,
                Arc::clone(material),
            )));
        }

        log::info!(
            "Scene file: {} materials, {} spheres",
            materials.len(),
            world.len()
        );

        Ok(SceneSetup {
            world,
            camera: CameraSpec::Oriented(self.camera.clone()),
            render: self.render.clone(),
        })
    }
}
