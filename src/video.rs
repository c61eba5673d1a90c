use crate::constants::*;
use starry_core::{VideoFrame, VideoSource, ANALYSIS_HEIGHT, ANALYSIS_WIDTH};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Webcam feed read back through a small off-screen canvas.
///
/// The browser does the downscale when the video is drawn at analysis
/// resolution, so `read_frame` hands the core a frame that already matches
/// the grid.
pub struct WebcamSource {
    video: web::HtmlVideoElement,
    scratch_ctx: web::CanvasRenderingContext2d,
    pixels: Vec<u8>,
    stream: Option<web::MediaStream>,
}

impl WebcamSource {
    pub fn new(document: &web::Document, video: web::HtmlVideoElement) -> anyhow::Result<Self> {
        let scratch: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        scratch.set_width(ANALYSIS_WIDTH as u32);
        scratch.set_height(ANALYSIS_HEIGHT as u32);

        let options = js_sys::Object::new();
        _ = js_sys::Reflect::set(&options, &"willReadFrequently".into(), &JsValue::TRUE);
        let scratch_ctx: web::CanvasRenderingContext2d = scratch
            .get_context_with_context_options("2d", &options)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context for analysis canvas"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        // mirror so moving left paints left
        _ = scratch_ctx.set_transform(-1.0, 0.0, 0.0, 1.0, ANALYSIS_WIDTH as f64, 0.0);

        video.set_muted(true);
        _ = video.set_attribute("playsinline", "");

        Ok(Self {
            video,
            scratch_ctx,
            pixels: Vec::with_capacity(ANALYSIS_WIDTH * ANALYSIS_HEIGHT * 4),
            stream: None,
        })
    }

    /// Ask for the camera and start playback. Permission denial is returned
    /// as an error; the source then simply never becomes ready.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| anyhow::anyhow!("mediaDevices unavailable: {:?}", e))?;

        let video_constraints = js_sys::Object::new();
        let ideal = |v: u32| {
            let o = js_sys::Object::new();
            _ = js_sys::Reflect::set(&o, &"ideal".into(), &JsValue::from(v));
            o
        };
        _ = js_sys::Reflect::set(&video_constraints, &"width".into(), &ideal(CAMERA_IDEAL_WIDTH));
        _ = js_sys::Reflect::set(&video_constraints, &"height".into(), &ideal(CAMERA_IDEAL_HEIGHT));
        _ = js_sys::Reflect::set(&video_constraints, &"facingMode".into(), &"user".into());
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&video_constraints);
        constraints.set_audio(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| anyhow::anyhow!("getUserMedia: {:?}", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("camera permission: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        self.video.set_src_object(Some(&stream));
        if let Ok(play) = self.video.play() {
            JsFuture::from(play)
                .await
                .map_err(|e| anyhow::anyhow!("video play: {:?}", e))?;
        }
        log::info!(
            "[video] camera streaming {}x{}",
            self.video.video_width(),
            self.video.video_height()
        );
        self.stream = Some(stream);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            stop_tracks(&stream);
            self.video.set_src_object(None);
            log::info!("[video] camera released");
        }
    }
}

impl VideoSource for WebcamSource {
    fn is_ready(&self) -> bool {
        self.stream.is_some()
            && self.video.ready_state() >= HAVE_CURRENT_DATA
            && self.video.video_width() > 0
    }

    fn read_frame(&mut self) -> Option<VideoFrame<'_>> {
        let (w, h) = (ANALYSIS_WIDTH as f64, ANALYSIS_HEIGHT as f64);
        self.scratch_ctx
            .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, w, h)
            .ok()?;
        let data = self.scratch_ctx.get_image_data(0.0, 0.0, w, h).ok()?;
        self.pixels = data.data().0;
        Some(VideoFrame {
            width: ANALYSIS_WIDTH,
            height: ANALYSIS_HEIGHT,
            rgba: &self.pixels,
        })
    }
}

pub fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}
