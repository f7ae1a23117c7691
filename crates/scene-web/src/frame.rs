use crate::render;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::SceneState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<SceneState>>,
    pub gpu: render::GpuState<'static>,
    pub canvas: web::HtmlCanvasElement,
    pub start_instant: Instant,
}

impl FrameContext {
    /// One display frame: advance scene state, push uniforms, draw.
    pub fn frame(&mut self) {
        let elapsed = self.start_instant.elapsed().as_secs_f32();
        self.scene.borrow_mut().frame(elapsed);

        let scene = self.scene.borrow();
        let w = self.canvas.width();
        let h = self.canvas.height();
        self.gpu.resize_if_needed(w, h);
        if let Err(e) = self.gpu.render(&scene, elapsed) {
            log::error!("render error: {:?}", e);
        }
    }
}

/// Frame loop driven by requestAnimationFrame; runs until the page unloads.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Self re-arming ripple spawner: record a ripple into the shared set, then
/// sleep a random 0.5-2.5 s before the next one.
pub fn schedule_ripples(scene: Rc<RefCell<SceneState>>, start_instant: Instant) {
    let timer: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let timer_clone = timer.clone();
    let mut rng = StdRng::from_entropy();
    *timer.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = start_instant.elapsed().as_secs_f32();
        scene.borrow_mut().ripples.spawn(now);
        let delay = scene_core::spawn_interval(&mut rng);
        if let Some(w) = web::window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                timer_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
                delay.as_millis() as i32,
            );
        }
    }) as Box<dyn FnMut()>));
    // First ripple lands on the next timer tick
    if let Some(w) = web::window() {
        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            timer.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
            0,
        );
    }
}
