//! Settings panel: range inputs and the palette `<select>` write straight
//! into the shared [`Settings`] snapshot between frames.

mod bindings;

pub use bindings::*;

use crate::constants::CONTROLS_PANEL_ID;
use starry_core::Settings;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn input_value(el: &web::Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<web::HtmlSelectElement>().map(|s| s.value())
}

fn set_input_value(el: &web::Element, value: &str) {
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        select.set_value(value);
    }
}

/// Push the current value of one binding back into its element.
pub fn sync_input(document: &web::Document, binding: Binding, settings: &Settings) {
    if let Some(el) = document.get_element_by_id(id_for(binding)) {
        set_input_value(&el, &binding.current(settings));
    }
}

pub fn wire_controls(document: &web::Document, settings: Rc<RefCell<Settings>>) {
    let table = binding_table();
    {
        let s = settings.borrow();
        for (id, binding) in table.iter() {
            match document.get_element_by_id(id) {
                Some(el) => set_input_value(&el, &binding.current(&s)),
                None => log::warn!("[controls] missing #{}", id),
            }
        }
    }

    let Some(panel) = document.get_element_by_id(CONTROLS_PANEL_ID) else {
        log::warn!("[controls] no #{}; settings stay at defaults", CONTROLS_PANEL_ID);
        return;
    };
    // One delegated listener for every input inside the panel
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let id = el.id();
        let Some(binding) = table.get(id.as_str()).copied() else {
            return;
        };
        let Some(raw) = input_value(&el) else {
            return;
        };
        if !binding.apply(&mut settings.borrow_mut(), &raw) {
            log::warn!("[controls] ignoring #{}={:?}", id, raw);
        }
    }) as Box<dyn FnMut(_)>);
    for kind in ["input", "change"] {
        _ = panel.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
