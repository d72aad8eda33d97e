/// Transform: translation, rotation and scale of a game object.

use glam::{Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    pub fn with_rotation(self, rotation: Quat) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_scale(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    /// Local-to-world matrix (scale, then rotation, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Move by `delta` in world space.
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Turn by `yaw` around world Y, then `pitch` around the local X axis
    /// (radians).
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.rotation = (Quat::from_rotation_y(yaw) * self.rotation * Quat::from_rotation_x(pitch)).normalize();
    }

    /// Local -Z axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
