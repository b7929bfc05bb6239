use glam::{Mat4, Vec3};

/// Step applied to azimuth or elevation per command (5 degrees).
const ANGLE_STEP: f32 = 5.0 * std::f32::consts::PI / 180.0;
/// Step applied to the orbit radius per command.
const RADIUS_STEP: f32 = 0.1;
/// Keeps elevation strictly inside (-90°, +90°) so the up vector never
/// aligns with the view direction.
const ELEVATION_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
/// Smallest orbit radius any limit configuration allows.
const MIN_DISTANCE_FLOOR: f32 = 0.01;

/// Discrete orbit adjustments, one per key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraCommand {
    /// Decrease azimuth (clockwise seen from above).
    RotateCw,
    /// Increase azimuth (counterclockwise seen from above).
    RotateCcw,
    Raise,
    Lower,
    /// Move closer to the target.
    ZoomIn,
    /// Move away from the target.
    ZoomOut,
    /// Restore the default orbit.
    Reset,
}

/// A camera that orbits a fixed target point on a sphere.
///
/// # Example
/// ```
/// use umbra::{CameraCommand, OrbitCamera};
///
/// let mut orbit = OrbitCamera::new().distance(4.0).elevation(0.5);
///
/// // Input handling:
/// orbit.keyboard_delta(CameraCommand::RotateCcw);
///
/// // Once per frame, before reading matrices:
/// orbit.update_camera();
/// let view = orbit.view_matrix();
/// let proj = orbit.projection_matrix(false);
/// # let _ = (view, proj);
/// ```
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// World up direction used to build the view matrix.
    pub up: Vec3,
    /// Distance from target.
    pub distance: f32,
    /// Horizontal angle in radians (yaw).
    pub azimuth: f32,
    /// Vertical angle in radians (pitch), clamped to avoid gimbal lock.
    pub elevation: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Half-height of the orthographic view volume.
    pub ortho_scale: f32,
    min_distance: f32,
    max_distance: f32,
    home: Orbit,
    eye: Vec3,
    view: Mat4,
    perspective: Mat4,
    orthographic: Mat4,
}

/// The orbit parameters restored by [`CameraCommand::Reset`].
#[derive(Clone, Copy, Debug, PartialEq)]
struct Orbit {
    distance: f32,
    azimuth: f32,
    elevation: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let home = Orbit {
            distance: 4.0,
            azimuth: 0.0,
            elevation: 30.0_f32.to_radians(),
        };

        let mut camera = Self {
            target: Vec3::ZERO,
            up: Vec3::Y,
            distance: home.distance,
            azimuth: home.azimuth,
            elevation: home.elevation,
            fov: 45.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
            ortho_scale: 1.5,
            min_distance: 0.5,
            max_distance: 100.0,
            home,
            eye: Vec3::ZERO,
            view: Mat4::IDENTITY,
            perspective: Mat4::IDENTITY,
            orthographic: Mat4::IDENTITY,
        };
        camera.update_camera();
        camera
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target point to orbit around.
    pub fn target(mut self, target: impl Into<Vec3>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the distance from target. Also becomes the reset distance.
    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.home.distance = self.distance;
        self
    }

    /// Set the field of view in degrees.
    pub fn fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    /// Set the initial azimuth (horizontal angle) in radians.
    pub fn azimuth(mut self, azimuth: f32) -> Self {
        self.azimuth = azimuth;
        self.home.azimuth = azimuth;
        self
    }

    /// Set the initial elevation (vertical angle) in radians.
    pub fn elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
        self.home.elevation = self.elevation;
        self
    }

    /// Set distance limits.
    ///
    /// `min` is raised to 0.01 and `max` to at least `min`.
    pub fn distance_limits(mut self, min: f32, max: f32) -> Self {
        let min = min.max(MIN_DISTANCE_FLOOR);
        let max = max.max(min);
        self.min_distance = min;
        self.max_distance = max;
        self.distance = self.distance.clamp(min, max);
        self.home.distance = self.home.distance.clamp(min, max);
        self
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Applies one discrete orbit adjustment.
    pub fn keyboard_delta(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::RotateCw => self.azimuth -= ANGLE_STEP,
            CameraCommand::RotateCcw => self.azimuth += ANGLE_STEP,
            CameraCommand::Raise => self.elevation += ANGLE_STEP,
            CameraCommand::Lower => self.elevation -= ANGLE_STEP,
            CameraCommand::ZoomIn => self.distance -= RADIUS_STEP,
            CameraCommand::ZoomOut => self.distance += RADIUS_STEP,
            CameraCommand::Reset => {
                self.distance = self.home.distance;
                self.azimuth = self.home.azimuth;
                self.elevation = self.home.elevation;
            }
        }

        self.elevation = self.elevation.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Recomputes the cached eye position and matrices.
    ///
    /// Call once per frame before reading [`view_matrix`](Self::view_matrix) or
    /// [`projection_matrix`](Self::projection_matrix). Calling it again without
    /// changing the orbit yields the same values.
    pub fn update_camera(&mut self) {
        // Spherical to Cartesian conversion
        let offset = Vec3::new(
            self.distance * self.elevation.cos() * self.azimuth.sin(),
            self.distance * self.elevation.sin(),
            self.distance * self.elevation.cos() * self.azimuth.cos(),
        );

        self.eye = self.target + offset;
        self.view = Mat4::look_at_rh(self.eye, self.target, self.up);
        self.perspective = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);

        let half_h = self.ortho_scale;
        let half_w = self.ortho_scale * self.aspect;
        self.orthographic =
            Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far);
    }

    /// Eye position as of the last [`update_camera`](Self::update_camera).
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Perspective projection, or the orthographic alternative when
    /// `orthographic` is set. Both share near, far and aspect.
    pub fn projection_matrix(&self, orthographic: bool) -> Mat4 {
        if orthographic {
            self.orthographic
        } else {
            self.perspective
        }
    }
}
