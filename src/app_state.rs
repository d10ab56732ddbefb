use crate::canvas::{CanvasTransform, Uniforms};
use crate::click::ClickTracker;
use crate::config::BoardConfig;
use crate::controller::{BoardController, Viewport};
use crate::drawing::MeshSurface;
use crate::error::BoardError;
use crate::frame_rate::FrameRateCounter;
use crate::state::{Canvas, GeometryBuffers, GpuContext, UiScreenBuffers, UiScreenUniforms};
use crate::ui::UiRenderer;
use crate::vertex::Vertex;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub struct State {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    pub gpu: GpuContext,
    pub canvas: Canvas,
    pub geometry: GeometryBuffers,
    pub ui_geo: GeometryBuffers,
    pub ui_screen: UiScreenBuffers,

    pub controller: BoardController,
    pub surface: MeshSurface,
    pub clicks: ClickTracker,
    pub frame_rate: FrameRateCounter,
    pub ui_renderer: UiRenderer,
    pub mouse_pos: [f32; 2],
}

fn context_error(what: &str, err: impl std::fmt::Display) -> BoardError {
    BoardError::MissingDrawingContext(format!("{what}: {err}"))
}

/// A single vertex-stage uniform buffer at binding 0.
fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

/// Triangle-list pipeline over [`Vertex`] with `vs_main`/`fs_main` entry points.
fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} Layout")),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

impl State {
    pub async fn new(window: Arc<Window>, config: BoardConfig) -> Result<State, BoardError> {
        let mut size = window.inner_size();

        #[cfg(target_arch = "wasm32")]
        {
            // no layout yet; the board is populated on the first real resize
            if size.width == 0 || size.height == 0 {
                size = PhysicalSize::new(1920, 1080);
            }
        }
        size.width = size.width.max(1);
        size.height = size.height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| context_error("surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| context_error("adapter", e))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| context_error("device", e))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| context_error("surface", "adapter reports no formats"))?;

        let config_surface = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config_surface);

        let mut uniforms = Uniforms::new();
        uniforms.update_projection((size.width as f32, size.height as f32));

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout = uniform_layout(&device, "uniform_bind_group_layout");

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../data/shaders/draw_shader.wgsl").into(),
            ),
        });

        let render_pipeline = create_pipeline(
            &device,
            "Render Pipeline",
            &uniform_bind_group_layout,
            &shader,
            config_surface.format,
            None,
        );

        let ui_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("UI Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../data/shaders/ui_shader.wgsl").into(),
            ),
        });

        let ui_uniform_bind_group_layout = uniform_layout(&device, "ui_uniform_bind_group_layout");

        // the overlay backdrop is translucent
        let ui_render_pipeline = create_pipeline(
            &device,
            "UI Render Pipeline",
            &ui_uniform_bind_group_layout,
            &ui_shader,
            config_surface.format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );

        let ui_screen_uniforms = UiScreenUniforms {
            screen_size: [size.width as f32, size.height as f32],
            _padding: [0.0, 0.0],
        };

        let ui_screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("UI Screen Uniform Buffer"),
            contents: bytemuck::cast_slice(&[ui_screen_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let ui_screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &ui_uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ui_screen_uniform_buffer.as_entire_binding(),
            }],
            label: Some("ui_screen_bind_group"),
        });

        let gpu = GpuContext {
            surface,
            device,
            queue,
            config: config_surface,
            render_pipeline,
            ui_render_pipeline,
        };

        let device_pixel_ratio = window.scale_factor() as f32;
        let canvas = Canvas {
            transform: CanvasTransform::from_device_pixel_ratio(device_pixel_ratio),
            uniform: uniforms,
            uniform_buffer,
            uniform_bind_group,
        };

        let ui_screen = UiScreenBuffers {
            uniform: ui_screen_uniform_buffer,
            bind_group: ui_screen_bind_group,
        };

        let client_size = [
            size.width as f32 / device_pixel_ratio,
            size.height as f32 / device_pixel_ratio,
        ];
        let mut surface = MeshSurface::new(config.background_color);
        surface.set_extent(client_size);

        let clicks = ClickTracker::new(config.double_click_interval, config.double_click_distance);
        let mut frame_rate = FrameRateCounter::new(config.fps_refresh_interval);
        frame_rate.start();

        let controller =
            BoardController::new(config, Viewport::new(client_size, device_pixel_ratio));

        Ok(Self {
            window,
            size,
            gpu,
            canvas,
            geometry: GeometryBuffers::empty(),
            ui_geo: GeometryBuffers::empty(),
            ui_screen,
            controller,
            surface,
            clicks,
            frame_rate,
            ui_renderer: UiRenderer::new(),
            mouse_pos: [0.0; 2],
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}
