//! Pointer wiring for the orbit camera: drag rotates, wheel zooms.

use scene_core::SceneState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const ROTATE_SENSITIVITY: f32 = 0.002; // radians of input per pixel dragged
const ZOOM_SENSITIVITY: f32 = 0.01;

#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, scene: Rc<RefCell<SceneState>>) {
    let pointer = Rc::new(RefCell::new(PointerState::default()));

    {
        let pointer = pointer.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut p = pointer.borrow_mut();
            p.down = true;
            p.x = ev.client_x() as f32;
            p.y = ev.client_y() as f32;
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let pointer = pointer.clone();
        let scene = scene.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut p = pointer.borrow_mut();
            let x = ev.client_x() as f32;
            let y = ev.client_y() as f32;
            if p.down {
                let dx = x - p.x;
                let dy = y - p.y;
                scene
                    .borrow_mut()
                    .camera
                    .rotate(-dx * ROTATE_SENSITIVITY, -dy * ROTATE_SENSITIVITY);
            }
            p.x = x;
            p.y = y;
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let pointer = pointer.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            pointer.borrow_mut().down = false;
        }) as Box<dyn FnMut(_)>);
        let _ =
            canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let scene = scene.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            scene
                .borrow_mut()
                .camera
                .zoom(ev.delta_y() as f32 * ZOOM_SENSITIVITY);
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
