//! Window, event loop and per-frame driving of the viewer.
//!
//! [`run`] opens the window, loads the startup mesh and then turns every window
//! event into scene edits. Each redraw composes the scene through
//! [`compose_frame`] into the [`PhongPass`].

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::command::{Command, HELP, MeshVariant};
use crate::composer::compose_frame;
use crate::error::{Result, ViewerError};
use crate::geometry::MeshData;
use crate::gpu::GpuContext;
use crate::input::{Input, InputAction};
use crate::mesh::GpuMesh;
use crate::phong_pass::{PhongPass, SceneMeshes};
use crate::scene::Scene;

/// Startup settings for the viewer window.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Directory holding the loadable `.off` meshes.
    pub assets_dir: PathBuf,
    pub initial_mesh: MeshVariant,
    pub orthographic: bool,
    pub clear_color: wgpu::Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Umbra".to_string(),
            width: 600,
            height: 600,
            assets_dir: PathBuf::from("assets"),
            initial_mesh: MeshVariant::Sphere,
            orthographic: false,
            clear_color: wgpu::Color {
                r: 0.3,
                g: 0.3,
                b: 0.3,
                a: 1.0,
            },
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from command-line arguments (program name excluded).
    ///
    /// The first argument, when present, is the assets directory.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let config = Self::default();
        match args.next() {
            Some(dir) => config.assets_dir(dir),
            None => config,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn initial_mesh(mut self, variant: MeshVariant) -> Self {
        self.initial_mesh = variant;
        self
    }

    pub fn orthographic(mut self, orthographic: bool) -> Self {
        self.orthographic = orthographic;
        self
    }

    pub fn clear_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.clear_color = wgpu::Color { r, g, b, a: 1.0 };
        self
    }

    /// Path of a mesh variant inside the assets directory.
    pub fn mesh_path(&self, variant: MeshVariant) -> PathBuf {
        self.assets_dir.join(variant.file_name())
    }
}

/// Opens the viewer window and runs until it is closed.
pub fn run(config: ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    println!("{HELP}");

    let mut app = ViewerApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        ViewerApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

enum ViewerApp {
    Pending { config: ViewerConfig },
    Running(Box<Viewer>),
    Failed(ViewerError),
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let ViewerApp::Pending { config } = self {
            *self = match Viewer::new(event_loop, config) {
                Ok(viewer) => ViewerApp::Running(Box::new(viewer)),
                Err(err) => {
                    event_loop.exit();
                    ViewerApp::Failed(err)
                }
            };
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ViewerApp::Running(viewer) = self else {
            return;
        };

        match viewer.input.handle_event(&event) {
            Some(InputAction::Command(command)) => viewer.handle_command(event_loop, command),
            Some(InputAction::PointerPress(cursor)) => {
                let viewport = Vec2::new(viewer.gpu.width() as f32, viewer.gpu.height() as f32);
                viewer.scene.place_light(cursor, viewport);
            }
            None => {}
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                viewer.gpu.resize(size.width, size.height);
                viewer.scene.camera.set_aspect(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                viewer.render();
                viewer.window.request_redraw();
            }
            _ => {}
        }
    }
}

struct Viewer {
    config: ViewerConfig,
    window: Arc<Window>,
    gpu: GpuContext,
    phong: PhongPass,
    meshes: SceneMeshes,
    scene: Scene,
    input: Input,
}

impl Viewer {
    fn new(event_loop: &ActiveEventLoop, config: &ViewerConfig) -> Result<Self> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;
        let phong = PhongPass::new(&gpu);

        let mut scene = Scene::new(startup_mesh(config));
        scene.orthographic = config.orthographic;
        scene.camera.set_aspect(gpu.width(), gpu.height());

        let meshes = SceneMeshes {
            plane: GpuMesh::new(&gpu, &scene.plane.mesh),
            object: GpuMesh::new(&gpu, &scene.object.mesh),
        };

        Ok(Self {
            config: config.clone(),
            window,
            gpu,
            phong,
            meshes,
            scene,
            input: Input::new(),
        })
    }

    fn handle_command(&mut self, event_loop: &ActiveEventLoop, command: Command) {
        match command {
            Command::Exit => event_loop.exit(),
            Command::Help => println!("{HELP}"),
            Command::LoadMesh(variant) => self.load_mesh(variant),
            other => {
                self.scene.apply(other);
            }
        }
    }

    /// Swaps the displayed object. A failed load keeps the current mesh.
    fn load_mesh(&mut self, variant: MeshVariant) {
        let path = self.config.mesh_path(variant);
        match self.scene.reload_object(&path) {
            Ok(()) => {
                info!(
                    path = %path.display(),
                    triangles = self.scene.object.mesh.len() / 3,
                    "loaded mesh"
                );
                self.meshes.object = GpuMesh::new(&self.gpu, &self.scene.object.mesh);
                self.window
                    .set_title(&format!("{} - {}", self.config.title, variant.file_name()));
            }
            Err(err) => {
                error!(path = %path.display(), %err, "failed to load mesh");
                self.window.set_title(&format!(
                    "{} - could not load {}",
                    self.config.title,
                    variant.file_name()
                ));
            }
        }
    }

    fn render(&mut self) {
        self.phong.ensure_depth_size(&self.gpu);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
                return;
            }
            Err(err) => {
                warn!(%err, "skipping frame");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.phong.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut recorder = self.phong.begin(&self.gpu, &mut render_pass, &self.meshes);
            compose_frame(&mut self.scene, &mut recorder);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

/// Loads the configured startup mesh, falling back to a generated sphere.
fn startup_mesh(config: &ViewerConfig) -> MeshData {
    let path = config.mesh_path(config.initial_mesh);
    match MeshData::load(&path) {
        Ok(mesh) => {
            info!(path = %path.display(), triangles = mesh.len() / 3, "loaded mesh");
            mesh
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "using generated sphere");
            MeshData::uv_sphere(32, 16)
        }
    }
}
