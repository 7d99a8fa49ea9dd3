/// Shader binding strategies.
///
/// A ShaderBinder selects and feeds the program used for each draw. The
/// viewport only knows that a standard and a depth-only variant exist and
/// that full-screen passes look programs up by name and variation bits;
/// shader internals stay behind this trait.

use bitflags::bitflags;
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::engine_error;
use crate::graphics_device::{CommandList, ProgramHandle};
use crate::scene::RenderableObject;

/// Push constant offset of the model matrix
pub const MODEL_MATRIX_OFFSET: u32 = 0;

/// Push constant offset of the light evaluation point
pub const LIGHT_POSITION_OFFSET: u32 = 64;

/// Program variant for object draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramVariant {
    /// Lit, textured draw
    Standard,
    /// Shadow cascade depth pass
    DepthOnly,
}

bitflags! {
    /// Compile-time variation bits of a named program
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderVariation: u32 {
        /// Screen texture is multisampled
        const ENABLE_MSAA = 1 << 0;
        /// Screen texture is floating point (tone mapping)
        const ENABLE_HDR  = 1 << 1;
    }
}

/// Strategy for binding programs and per-draw uniforms.
///
/// Stateless: one binder serves every viewport.
pub trait ShaderBinder: Send + Sync {
    /// Make the object's program current and return it.
    fn bind_object_program(
        &self,
        cmd: &mut dyn CommandList,
        object: &dyn RenderableObject,
        variant: ProgramVariant,
    ) -> Result<ProgramHandle>;

    /// Per-object transform uniforms.
    fn bind_mesh_uniforms(
        &self,
        cmd: &mut dyn CommandList,
        program: ProgramHandle,
        object: &dyn RenderableObject,
    ) -> Result<()>;

    /// Material parameters and textures.
    fn bind_material_uniforms(
        &self,
        cmd: &mut dyn CommandList,
        program: ProgramHandle,
        object: &dyn RenderableObject,
    ) -> Result<()>;

    /// Lights affecting a draw located at `position`.
    fn bind_light_uniforms(
        &self,
        _cmd: &mut dyn CommandList,
        _program: ProgramHandle,
        _position: Vec3,
    ) -> Result<()> {
        Ok(())
    }

    /// Make a named program current (full-screen passes).
    fn use_program(
        &self,
        cmd: &mut dyn CommandList,
        name: &str,
        variation: ShaderVariation,
    ) -> Result<ProgramHandle>;
}

/// Forward binder: one standard and one depth-only program for every
/// object, model matrix and light position as push constants.
#[derive(Debug, Clone)]
pub struct ForwardShaderBinder {
    standard: ProgramHandle,
    depth_only: ProgramHandle,
    programs: FxHashMap<(String, ShaderVariation), ProgramHandle>,
}

impl ForwardShaderBinder {
    pub fn new(standard: ProgramHandle, depth_only: ProgramHandle) -> Self {
        Self {
            standard,
            depth_only,
            programs: FxHashMap::default(),
        }
    }

    /// Register a named program for one set of variation bits.
    pub fn register_program(&mut self, name: &str, variation: ShaderVariation, program: ProgramHandle) {
        self.programs.insert((name.to_string(), variation), program);
    }

    /// Program for `name` with exactly `variation`, falling back to the
    /// variation-less program.
    pub fn program(&self, name: &str, variation: ShaderVariation) -> Option<ProgramHandle> {
        self.programs
            .get(&(name.to_string(), variation))
            .or_else(|| self.programs.get(&(name.to_string(), ShaderVariation::empty())))
            .copied()
    }
}

impl ShaderBinder for ForwardShaderBinder {
    fn bind_object_program(
        &self,
        cmd: &mut dyn CommandList,
        _object: &dyn RenderableObject,
        variant: ProgramVariant,
    ) -> Result<ProgramHandle> {
        let program = match variant {
            ProgramVariant::Standard => self.standard,
            ProgramVariant::DepthOnly => self.depth_only,
        };
        cmd.bind_program(program)?;
        Ok(program)
    }

    fn bind_mesh_uniforms(
        &self,
        cmd: &mut dyn CommandList,
        _program: ProgramHandle,
        object: &dyn RenderableObject,
    ) -> Result<()> {
        cmd.push_constants(MODEL_MATRIX_OFFSET, bytemuck::bytes_of(object.world_matrix()))
    }

    fn bind_material_uniforms(
        &self,
        cmd: &mut dyn CommandList,
        _program: ProgramHandle,
        object: &dyn RenderableObject,
    ) -> Result<()> {
        match object.material() {
            Some(material) => cmd.bind_material(material),
            None => Ok(()),
        }
    }

    fn bind_light_uniforms(
        &self,
        cmd: &mut dyn CommandList,
        _program: ProgramHandle,
        position: Vec3,
    ) -> Result<()> {
        cmd.push_constants(LIGHT_POSITION_OFFSET, bytemuck::bytes_of(&position))
    }

    fn use_program(
        &self,
        cmd: &mut dyn CommandList,
        name: &str,
        variation: ShaderVariation,
    ) -> Result<ProgramHandle> {
        let Some(program) = self.program(name, variation) else {
            engine_error!("orion::ForwardShaderBinder",
                "No program '{}' for variation {:?}", name, variation);
            return Err(Error::InvalidResource(format!("program '{}'", name)));
        };
        cmd.bind_program(program)?;
        Ok(program)
    }
}

#[cfg(test)]
#[path = "shader_binder_tests.rs"]
mod tests;
