#![cfg(target_arch = "wasm32")]
mod assets;
mod dom;
mod frame;
mod input;
mod render;

use frame::FrameContext;
use instant::Instant;
use scene_core::{BoatMesh, SceneState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas_el = document
        .get_element_by_id("scene-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    dom::wire_resize_listener(&canvas);

    // Leak a canvas clone to satisfy the 'static lifetime of the surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let gpu = render::GpuState::new(leaked_canvas).await?;

    let scene = Rc::new(RefCell::new(SceneState::new()));
    input::wire_pointer_handlers(&canvas, scene.clone());

    let start_instant = Instant::now();
    frame::schedule_ripples(scene.clone(), start_instant);

    let ctx = Rc::new(RefCell::new(FrameContext {
        scene: scene.clone(),
        gpu,
        canvas,
        start_instant,
    }));

    // Async model load; the scene runs without the boat until this lands,
    // and keeps running without it if the load fails.
    {
        let ctx = ctx.clone();
        let scene = scene.clone();
        spawn_local(async move {
            match assets::fetch_bytes(assets::MODEL_URL).await {
                Ok(bytes) => match BoatMesh::from_gltf_bytes(&bytes) {
                    Ok(mesh) => {
                        ctx.borrow_mut().gpu.upload_boat(&mesh);
                        scene.borrow_mut().set_boat_loaded();
                        log::info!("boat model loaded");
                    }
                    Err(e) => log::error!("model decode error: {e}"),
                },
                Err(e) => log::error!("model fetch error: {:?}", e),
            }
        });
    }

    frame::start_loop(ctx);
    Ok(())
}
