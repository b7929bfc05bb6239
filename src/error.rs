//! Error types for the viewer.

use thiserror::Error;

use crate::geometry::GeometryError;

/// Errors that stop the viewer from starting or running.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The event loop could not be created or exited abnormally.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation errors
    #[error("Window error: {0}")]
    Window(#[from] winit::error::OsError),

    /// The window could not be turned into a drawing surface.
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter is compatible with the surface.
    #[error("Adapter error: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// Logical device creation failed.
    #[error("Device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The surface reports no usable texture format.
    #[error("Surface is not supported by the selected adapter")]
    UnsupportedSurface,

    /// Mesh loading errors
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Result type alias using the viewer's error type.
pub type Result<T> = std::result::Result<T, ViewerError>;
