use super::keys::{action_for_key, KeyAction};
use crate::controls::{self, Binding};
use crate::frame::LoopControl;
use crate::overlay;
use starry_core::Settings;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct KeyboardWiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub settings: Rc<RefCell<Settings>>,
    pub control: Rc<LoopControl>,
}

// Keys typed into the settings panel belong to the panel
fn from_form_field(ev: &web::KeyboardEvent) -> bool {
    ev.target().is_some_and(|t| {
        t.dyn_ref::<web::HtmlInputElement>().is_some()
            || t.dyn_ref::<web::HtmlSelectElement>().is_some()
    })
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &KeyboardWiring) {
    if from_form_field(ev) {
        return;
    }
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::Palette(mode) => {
            let mut s = w.settings.borrow_mut();
            s.particles.palette = mode;
            controls::sync_input(&w.document, Binding::Palette, &s);
            log::info!("[keys] palette={}", mode);
        }
        KeyAction::TogglePause => {
            let paused = !w.control.paused.get();
            w.control.paused.set(paused);
            log::info!("[keys] paused={}", paused);
            ev.prevent_default();
        }
        KeyAction::TogglePanel => overlay::toggle(&w.document),
        KeyAction::ToggleFullscreen => {
            if w.document.fullscreen_element().is_some() {
                w.document.exit_fullscreen();
            } else {
                _ = w.canvas.request_fullscreen();
            }
            ev.prevent_default();
        }
        KeyAction::ClearCanvas => w.control.clear_requested.set(true),
        KeyAction::Stop => {
            if w.document.fullscreen_element().is_some() {
                w.document.exit_fullscreen();
            } else {
                w.control.running.set(false);
                log::info!("[keys] stopping");
            }
        }
    }
}

pub fn wire_global_keydown(wiring: KeyboardWiring) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &wiring);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
