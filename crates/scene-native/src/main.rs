mod render;

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::{spawn_interval, BoatMesh, SceneState};
use std::sync::{Arc, Mutex};
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

const ROTATE_SENSITIVITY: f32 = 0.002;
const ZOOM_SENSITIVITY: f32 = 0.01;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let model_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/origami_boat.glb".to_string());

    // Decode the model off the main thread; the scene runs without the boat
    // until it lands.
    let pending_mesh: Arc<Mutex<Option<BoatMesh>>> = Arc::new(Mutex::new(None));
    {
        let pending = pending_mesh.clone();
        std::thread::spawn(move || match std::fs::read(&model_path) {
            Ok(bytes) => match BoatMesh::from_gltf_bytes(&bytes) {
                Ok(mesh) => {
                    if let Ok(mut slot) = pending.lock() {
                        *slot = Some(mesh);
                    }
                }
                Err(e) => log::error!("model decode error: {e}"),
            },
            Err(e) => log::error!("model read error ({model_path}): {e}"),
        });
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("origami-scene")
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(render::GpuState::new(&window))?;
    let mut scene = SceneState::new();

    let start_instant = Instant::now();
    let mut rng = StdRng::from_entropy();
    let mut next_ripple = start_instant;

    let mut pointer_down = false;
    let mut last_cursor: Option<(f64, f64)> = None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(new_size) => gpu.resize(new_size),
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    pointer_down = state == ElementState::Pressed;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if pointer_down {
                    if let Some((lx, ly)) = last_cursor {
                        let dx = (position.x - lx) as f32;
                        let dy = (position.y - ly) as f32;
                        scene
                            .camera
                            .rotate(-dx * ROTATE_SENSITIVITY, -dy * ROTATE_SENSITIVITY);
                    }
                }
                last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * 20.0,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                scene.camera.zoom(-amount * ZOOM_SENSITIVITY);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if now >= next_ripple {
                    let elapsed = start_instant.elapsed().as_secs_f32();
                    scene.ripples.spawn(elapsed);
                    next_ripple = now + spawn_interval(&mut rng);
                }

                if scene.boat_anchor.is_none() {
                    let mesh = pending_mesh.lock().ok().and_then(|mut slot| slot.take());
                    if let Some(mesh) = mesh {
                        gpu.upload_boat(&mesh);
                        scene.set_boat_loaded();
                        log::info!("boat model loaded");
                    }
                }

                let elapsed = start_instant.elapsed().as_secs_f32();
                scene.frame(elapsed);
                match gpu.render(&scene, elapsed) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = gpu.window.inner_size();
                        gpu.resize(size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of GPU memory");
                        elwt.exit();
                    }
                    Err(e) => log::warn!("surface error: {:?}", e),
                }
            }
            _ => {}
        },
        Event::AboutToWait => gpu.window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}
