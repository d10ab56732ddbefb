use crate::app_state::State;
use crate::config::BoardConfig;
use crate::error::BoardError;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use winit::event_loop::EventLoopProxy;

struct App {
    config: BoardConfig,
    state: Option<State>,
    window_requested: bool,
    error: Option<BoardError>,
    #[cfg(target_arch = "wasm32")]
    canvas: Option<web_sys::HtmlCanvasElement>,
    #[cfg(target_arch = "wasm32")]
    proxy: Option<EventLoopProxy<State>>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: BoardError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler<State> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_requested {
            return;
        }
        self.window_requested = true;

        #[allow(unused_mut)]
        let mut window_attributes =
            Window::default_attributes().with_title(&self.config.window_title);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;
            window_attributes = window_attributes.with_canvas(self.canvas.take());
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, BoardError::MissingRootElement(e.to_string()));
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        {
            let Some(proxy) = self.proxy.take() else {
                return;
            };
            let config = self.config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match State::new(window, config).await {
                    Ok(state) => {
                        if proxy.send_event(state).is_err() {
                            log::error!("Event loop closed before the board was ready");
                        }
                    }
                    Err(e) => {
                        log::error!("{e}");
                        wasm_bindgen::throw_str(&e.to_string());
                    }
                }
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        match pollster::block_on(State::new(window, self.config.clone())) {
            Ok(mut state) => {
                let size = state.window().inner_size();
                state.resize(size);
                state.window().request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        };
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, mut state: State) {
        // the canvas may have been laid out while the GPU was initializing
        let size = state.window().inner_size();
        state.resize(size);
        state.window().request_redraw();
        self.state = Some(state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(state) = &mut self.state {
            if window_id == state.window().id() {
                if !state.input(&event) {
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    state: ElementState::Pressed,
                                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                                    ..
                                },
                            ..
                        } => event_loop.exit(),
                        WindowEvent::Resized(physical_size) => {
                            log::info!(
                                "WindowEvent::Resized: {}x{}",
                                physical_size.width,
                                physical_size.height
                            );
                            state.resize(physical_size);
                        }
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            log::info!("WindowEvent::ScaleFactorChanged: {}", scale_factor);
                            let size = state.window().inner_size();
                            state.resize(size);
                        }
                        WindowEvent::RedrawRequested => {
                            state.update();
                            match state.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    log::warn!("Surface lost, reconfiguring");
                                    state.resize(state.size)
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                                Err(e) => log::warn!("{:?}", e),
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // one redraw per animation frame keeps the frame-rate counter sampling
        if let Some(state) = &self.state {
            state.window().request_redraw();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::<State>::with_user_event().build()?;
    let mut app = App {
        config: BoardConfig::default(),
        state: None,
        window_requested: false,
        error: None,
    };

    event_loop.run_app(&mut app)?;

    match app.error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    use crate::mount::{mount, web::DomHost};
    use winit::platform::web::EventLoopExtWebSys;

    fn to_js(err: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Info).map_err(to_js)?;

    let config = BoardConfig::default();
    let host = DomHost::new().map_err(to_js)?;
    let canvas = mount(&host, &config.root_element_id).map_err(to_js)?;

    let event_loop = EventLoop::<State>::with_user_event().build().map_err(to_js)?;
    let proxy = event_loop.create_proxy();
    event_loop.spawn_app(App {
        config,
        state: None,
        window_requested: false,
        error: None,
        canvas: Some(canvas),
        proxy: Some(proxy),
    });

    Ok(())
}
