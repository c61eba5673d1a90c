use crate::audio::WebAudioInput;
use crate::constants::STATUS_INTERVAL_SEC;
use crate::overlay;
use crate::render::CanvasTarget;
use crate::video::WebcamSource;
use instant::Instant;
use starry_core::{FrameLoop, FrameOutcome, Settings};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flags flipped by input handlers and honoured at the next frame boundary.
pub struct LoopControl {
    pub paused: Cell<bool>,
    pub running: Cell<bool>,
    pub clear_requested: Cell<bool>,
}

impl Default for LoopControl {
    fn default() -> Self {
        Self {
            paused: Cell::new(false),
            running: Cell::new(true),
            clear_requested: Cell::new(false),
        }
    }
}

pub struct FrameContext {
    pub sim: FrameLoop,
    pub video: WebcamSource,
    pub audio: Rc<RefCell<WebAudioInput>>,
    pub target: CanvasTarget,
    pub settings: Rc<RefCell<Settings>>,
    pub control: Rc<LoopControl>,
    pub document: web::Document,
    pub camera_error: Option<String>,

    pub last_status: Instant,
    pub frames_since_status: u32,
    pub released: bool,
}

impl FrameContext {
    /// Run one iteration. Returns false once the loop has been stopped.
    pub fn frame(&mut self) -> bool {
        if !self.control.running.get() {
            self.release();
            return false;
        }
        // copy so panel edits cannot land mid-iteration
        let settings = *self.settings.borrow();
        if self.control.clear_requested.replace(false) {
            self.target.clear(settings.particles.palette.fade_color());
        }
        if self.control.paused.get() {
            return true;
        }

        let outcome = {
            let mut audio = self.audio.borrow_mut();
            self.sim
                .tick(&mut self.video, &mut *audio, &settings, &mut self.target)
        };
        self.frames_since_status += 1;
        self.update_status(outcome, &settings);
        true
    }

    fn update_status(&mut self, outcome: FrameOutcome, settings: &Settings) {
        let elapsed = self.last_status.elapsed().as_secs_f32();
        if elapsed < STATUS_INTERVAL_SEC {
            return;
        }
        let text = match (outcome, &self.camera_error) {
            (FrameOutcome::NotReady, Some(err)) => format!("Camera unavailable: {}", err),
            (FrameOutcome::NotReady, None) => "Waiting for camera…".to_string(),
            (FrameOutcome::Rendered(_), _) => {
                let fps = self.frames_since_status as f32 / elapsed;
                let audio = if self.audio.borrow().is_connected() {
                    "audio on"
                } else {
                    "no audio"
                };
                format!(
                    "{:.0} fps · {} particles · {} · {}",
                    fps,
                    self.sim.particles.len(),
                    settings.particles.palette.label(),
                    audio
                )
            }
        };
        overlay::set_status(&self.document, &text);
        self.last_status = Instant::now();
        self.frames_since_status = 0;
    }

    /// Release camera and microphone. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.video.stop();
        self.audio.borrow_mut().stop();
        overlay::set_status(&self.document, "Stopped. Reload to start again.");
        log::info!("[frame] loop stopped");
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow_mut().frame() {
            return;
        }
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }

    // Leaving the page releases the devices even if no frame runs again
    let frame_ctx_hide = frame_ctx;
    let on_hide = Closure::wrap(Box::new(move || {
        let mut ctx = frame_ctx_hide.borrow_mut();
        ctx.control.running.set(false);
        ctx.release();
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    }
    on_hide.forget();
}
