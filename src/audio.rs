use crate::constants::*;
use crate::video::stop_tracks;
use starry_core::{AudioData, AudioSource, FrequencyAnalyzer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// WebAudio graph feeding an `AnalyserNode`.
///
/// Two inputs can be attached: an audio file played through an `<audio>`
/// element (heard and analysed) and the microphone (analysed only).
pub struct WebAudioInput {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    bins: Vec<u8>,
    analyzer: FrequencyAnalyzer,
    player: Option<(web::HtmlAudioElement, web::MediaElementAudioSourceNode)>,
    object_url: Option<String>,
    mic: Option<(web::MediaStream, web::MediaStreamAudioSourceNode)>,
}

impl WebAudioInput {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let analyser = web::AnalyserNode::new(&ctx).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        Ok(Self {
            ctx,
            analyser,
            bins,
            analyzer: FrequencyAnalyzer::new(),
            player: None,
            object_url: None,
            mic: None,
        })
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.player.is_some() || self.mic.is_some()
    }

    pub fn has_microphone(&self) -> bool {
        self.mic.is_some()
    }

    /// Loop `file` through the speakers and the analyser, replacing any
    /// previously chosen file.
    pub fn play_file(&mut self, file: &web::File) -> anyhow::Result<()> {
        let url = web::Url::create_object_url_with_blob(file)
            .map_err(|e| anyhow::anyhow!("object url: {:?}", e))?;
        if self.player.is_none() {
            let element = web::HtmlAudioElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
            element.set_loop(true);
            let source = self
                .ctx
                .create_media_element_source(&element)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            source
                .connect_with_audio_node(&self.analyser)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            source
                .connect_with_audio_node(&self.ctx.destination())
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            self.player = Some((element, source));
        }
        if let Some(old) = self.object_url.replace(url.clone()) {
            _ = web::Url::revoke_object_url(&old);
        }
        if let Some((element, _)) = &self.player {
            element.set_src(&url);
            _ = element.play();
        }
        _ = self.ctx.resume();
        log::info!("[audio] playing {}", file.name());
        Ok(())
    }

    fn attach_microphone(&mut self, stream: web::MediaStream) -> anyhow::Result<()> {
        let source = self
            .ctx
            .create_media_stream_source(&stream)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        source
            .connect_with_audio_node(&self.analyser)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        _ = self.ctx.resume();
        self.mic = Some((stream, source));
        log::info!("[audio] microphone attached");
        Ok(())
    }

    pub fn release_microphone(&mut self) {
        if let Some((stream, source)) = self.mic.take() {
            _ = source.disconnect();
            stop_tracks(&stream);
            log::info!("[audio] microphone released");
        }
    }

    pub fn stop(&mut self) {
        self.release_microphone();
        if let Some((element, _)) = &self.player {
            _ = element.pause();
        }
        if let Some(url) = self.object_url.take() {
            _ = web::Url::revoke_object_url(&url);
        }
        _ = self.ctx.close();
    }
}

impl AudioSource for WebAudioInput {
    fn analysis(&mut self) -> AudioData {
        if !self.is_connected() {
            return AudioData::default();
        }
        self.analyser.get_byte_frequency_data(&mut self.bins);
        self.analyzer.analyze(&self.bins)
    }
}

/// Request the microphone and route it into the analyser. The borrow is
/// only taken once the permission prompt has resolved.
pub async fn enable_microphone(audio: Rc<RefCell<WebAudioInput>>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("mediaDevices unavailable: {:?}", e))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::FALSE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("getUserMedia: {:?}", e))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("microphone permission: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    audio.borrow_mut().attach_microphone(stream)
}
