#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use instant::Instant;
use starry_core::{FrameLoop, RenderTarget, Settings};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod video;

fn wire_audio_inputs(document: &web::Document, audio: &Rc<RefCell<audio::WebAudioInput>>) {
    if let Some(input) = document
        .get_element_by_id(AUDIO_FILE_INPUT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        let audio_file = audio.clone();
        let input_change = input.clone();
        let closure = Closure::wrap(Box::new(move || {
            let Some(file) = input_change.files().and_then(|files| files.get(0)) else {
                return;
            };
            if let Err(e) = audio_file.borrow_mut().play_file(&file) {
                log::error!("[audio] could not play {}: {:?}", file.name(), e);
            }
        }) as Box<dyn FnMut()>);
        _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let audio_mic = audio.clone();
    dom::add_click_listener(document, MIC_TOGGLE_ID, move || {
        if audio_mic.borrow().has_microphone() {
            audio_mic.borrow_mut().release_microphone();
            return;
        }
        let audio_req = audio_mic.clone();
        spawn_local(async move {
            if let Err(e) = audio::enable_microphone(audio_req).await {
                log::error!("[audio] microphone: {:?}", e);
            }
        });
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starry-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::set_status(&document, &format!("Failed to start: {}", e));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;
    dom::wire_canvas_resize(&canvas);

    let settings = Rc::new(RefCell::new(Settings::default()));
    controls::wire_controls(&document, settings.clone());

    let mut target = render::CanvasTarget::new(canvas.clone())?;
    target.clear(settings.borrow().particles.palette.fade_color());
    log::info!("[init] canvas {:?}", target.size());

    let audio = Rc::new(RefCell::new(audio::WebAudioInput::new()?));
    wire_audio_inputs(&document, &audio);

    let control = Rc::new(frame::LoopControl::default());
    events::wire_global_keydown(events::KeyboardWiring {
        document: document.clone(),
        canvas: canvas.clone(),
        settings: settings.clone(),
        control: control.clone(),
    });

    overlay::set_status(&document, "Waiting for camera…");
    let video_el: web::HtmlVideoElement = dom::element_by_id(&document, VIDEO_ID)?;
    let mut video = video::WebcamSource::new(&document, video_el)?;
    // A denied camera is not fatal: the loop idles until a reload
    let camera_error = match video.start().await {
        Ok(()) => None,
        Err(e) => {
            log::error!("[video] {:?}", e);
            Some(e.to_string())
        }
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        sim: FrameLoop::from_entropy(),
        video,
        audio,
        target,
        settings,
        control,
        document,
        camera_error,
        last_status: Instant::now(),
        frames_since_status: 0,
        released: false,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
