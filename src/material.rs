//! Phong reflectance parameters with saturating, step-wise editing.

use glam::Vec4;

/// Amount added to or removed from a colour channel per edit.
pub const CHANNEL_STEP: f32 = 0.1;
/// Factor applied to the shininess exponent per edit.
pub const SHININESS_FACTOR: f32 = 1.5;
/// Lowest shininess exponent a material can hold.
pub const MIN_SHININESS: f32 = 1.0;

/// Which reflectance term of a [`Material`] an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialChannel {
    Ambient,
    Diffuse,
    Specular,
}

/// Colour component within a reflectance term. Alpha is never edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorAxis {
    Red,
    Green,
    Blue,
}

impl ColorAxis {
    fn index(self) -> usize {
        match self {
            ColorAxis::Red => 0,
            ColorAxis::Green => 1,
            ColorAxis::Blue => 2,
        }
    }
}

/// Ambient, diffuse and specular reflectance plus a shininess exponent.
///
/// Every channel stays in `[0, 1]` and shininess never drops below
/// [`MIN_SHININESS`], whatever sequence of edits is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
    shininess: f32,
}

impl Default for Material {
    /// The reset tuple: dim grey ambient, light grey diffuse, faint specular.
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.7, 0.7, 0.7, 1.0),
            specular: Vec4::new(0.2, 0.2, 0.2, 1.0),
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Creates a material, clamping every value into range.
    pub fn new(ambient: Vec4, diffuse: Vec4, specular: Vec4, shininess: f32) -> Self {
        let mut material = Self::default();
        material.set_ambient(ambient);
        material.set_diffuse(diffuse);
        material.set_specular(specular);
        material.set_shininess(shininess);
        material
    }

    pub fn ambient(&self) -> Vec4 {
        self.ambient
    }

    pub fn diffuse(&self) -> Vec4 {
        self.diffuse
    }

    pub fn specular(&self) -> Vec4 {
        self.specular
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Returns the colour of one reflectance term.
    pub fn channel(&self, channel: MaterialChannel) -> Vec4 {
        match channel {
            MaterialChannel::Ambient => self.ambient,
            MaterialChannel::Diffuse => self.diffuse,
            MaterialChannel::Specular => self.specular,
        }
    }

    pub fn set_ambient(&mut self, ambient: Vec4) {
        self.ambient = ambient.clamp(Vec4::ZERO, Vec4::ONE);
    }

    pub fn set_diffuse(&mut self, diffuse: Vec4) {
        self.diffuse = diffuse.clamp(Vec4::ZERO, Vec4::ONE);
    }

    pub fn set_specular(&mut self, specular: Vec4) {
        self.specular = specular.clamp(Vec4::ZERO, Vec4::ONE);
    }

    pub fn set_shininess(&mut self, shininess: f32) {
        self.shininess = shininess.max(MIN_SHININESS);
    }

    /// Raises one colour component by [`CHANNEL_STEP`], saturating at 1.
    pub fn increase(&mut self, channel: MaterialChannel, axis: ColorAxis) {
        let value = self.component_mut(channel, axis);
        *value = (*value + CHANNEL_STEP).min(1.0);
    }

    /// Lowers one colour component by [`CHANNEL_STEP`], saturating at 0.
    pub fn decrease(&mut self, channel: MaterialChannel, axis: ColorAxis) {
        let value = self.component_mut(channel, axis);
        *value = (*value - CHANNEL_STEP).max(0.0);
    }

    /// Multiplies shininess by [`SHININESS_FACTOR`]. There is no upper bound.
    pub fn increase_shininess(&mut self) {
        self.shininess *= SHININESS_FACTOR;
    }

    /// Divides shininess by [`SHININESS_FACTOR`], never going below [`MIN_SHININESS`].
    pub fn decrease_shininess(&mut self) {
        self.shininess = (self.shininess / SHININESS_FACTOR).max(MIN_SHININESS);
    }

    /// Restores the fixed default tuple regardless of the current state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn component_mut(&mut self, channel: MaterialChannel, axis: ColorAxis) -> &mut f32 {
        let color = match channel {
            MaterialChannel::Ambient => &mut self.ambient,
            MaterialChannel::Diffuse => &mut self.diffuse,
            MaterialChannel::Specular => &mut self.specular,
        };
        &mut color[axis.index()]
    }
}
