// Host-side tests for one render-loop iteration.

mod common;

use common::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starry_core::*;

fn seeded_loop(seed: u64) -> FrameLoop<StdRng> {
    FrameLoop::new(ParticleSystem::new(StdRng::seed_from_u64(seed)))
}

fn settings(count: usize, palette: PaletteMode) -> Settings {
    Settings {
        particles: ParticleSettings {
            particle_count: count,
            palette,
            ..ParticleSettings::default()
        },
        audio: AudioSettings::default(),
    }
}

#[test]
fn idle_until_video_is_ready() {
    let mut sim = seeded_loop(1);
    let mut video = FakeVideo::solid(320, 240, Rgb::new(200, 100, 50));
    video.ready = false;
    let mut audio = FixedAudio(AudioData::default());
    let mut target = RecordingTarget::new(640.0, 480.0);
    let s = settings(1000, PaletteMode::StarryNight);

    for _ in 0..5 {
        assert_eq!(
            sim.tick(&mut video, &mut audio, &s, &mut target),
            FrameOutcome::NotReady
        );
    }
    assert!(target.fades.is_empty());
    assert!(target.strokes.is_empty());
    assert!(sim.particles.is_empty());
    assert!(!sim.buffer.is_populated());
    assert_eq!(sim.flow.time, 0.0);
}

#[test]
fn rendered_frame_fades_steps_and_advances_time() {
    let mut sim = seeded_loop(2);
    let mut video = FakeVideo::solid(320, 240, Rgb::new(200, 180, 160));
    let mut audio = FixedAudio(AudioData::default());
    let mut target = RecordingTarget::new(640.0, 480.0);
    let s = settings(300, PaletteMode::Sunflowers);

    let outcome = sim.tick(&mut video, &mut audio, &s, &mut target);
    let stats = match outcome {
        FrameOutcome::Rendered(stats) => stats,
        FrameOutcome::NotReady => panic!("frame should render"),
    };
    assert_eq!(target.fades, vec![(PaletteMode::Sunflowers.fade_color(), FADE_ALPHA)]);
    assert_eq!(sim.particles.len(), 300);
    assert_eq!(stats.drawn, 300, "every new particle paints once");
    assert_eq!(target.strokes.len(), stats.drawn + stats.highlights);
    assert!(sim.buffer.is_populated());
    assert_eq!(sim.buffer.color(0, 0), Rgb::new(200, 180, 160));
    assert!((sim.flow.time - FLOW_TIME_STEP).abs() < 1e-7);
}

#[test]
fn population_ramps_up_across_frames() {
    let mut sim = seeded_loop(3);
    let mut video = FakeVideo::solid(160, 120, Rgb::new(128, 128, 128));
    let mut audio = FixedAudio(AudioData::default());
    let mut target = RecordingTarget::new(800.0, 600.0);
    let s = settings(1200, PaletteMode::StarryNight);

    let mut sizes = Vec::new();
    for _ in 0..4 {
        sim.tick(&mut video, &mut audio, &s, &mut target);
        sizes.push(sim.particles.len());
    }
    assert_eq!(sizes, vec![500, 1000, 1200, 1200]);
    assert_eq!(target.fades.len(), 4);
}

#[test]
fn malformed_frame_is_skipped() {
    let mut sim = seeded_loop(4);
    let mut video = FakeVideo::solid(320, 240, Rgb::new(9, 9, 9));
    video.pixels.truncate(100);
    let mut audio = FixedAudio(AudioData::default());
    let mut target = RecordingTarget::new(640.0, 480.0);
    let s = settings(100, PaletteMode::Original);

    assert_eq!(
        sim.tick(&mut video, &mut audio, &s, &mut target),
        FrameOutcome::NotReady
    );
    assert!(target.fades.is_empty());
    assert!(sim.particles.is_empty());
}

#[test]
fn resumes_after_video_drops_out() {
    let mut sim = seeded_loop(5);
    let mut video = FakeVideo::solid(320, 240, Rgb::new(90, 90, 90));
    let mut audio = FixedAudio(AudioData::default());
    let mut target = RecordingTarget::new(640.0, 480.0);
    let s = settings(50, PaletteMode::StarryNight);

    assert!(matches!(
        sim.tick(&mut video, &mut audio, &s, &mut target),
        FrameOutcome::Rendered(_)
    ));
    video.ready = false;
    assert_eq!(
        sim.tick(&mut video, &mut audio, &s, &mut target),
        FrameOutcome::NotReady
    );
    video.ready = true;
    assert!(matches!(
        sim.tick(&mut video, &mut audio, &s, &mut target),
        FrameOutcome::Rendered(_)
    ));
    assert_eq!(target.fades.len(), 2);
    assert!((sim.flow.time - 2.0 * FLOW_TIME_STEP).abs() < 1e-6);
}

#[test]
fn sensitivity_scales_bass_before_sizing_strokes() {
    // identical seeds, differing only in sensitivity
    let bass_only = AudioData {
        bass: 100.0,
        mid: 0.0,
        treble: 0.0,
        average: 30.0,
    };
    let mut widths = Vec::new();
    for sensitivity in [0.0_f32, 2.0] {
        let mut sim = seeded_loop(6);
        let mut video = FakeVideo::solid(320, 240, Rgb::new(100, 100, 100));
        let mut audio = FixedAudio(bass_only);
        let mut target = RecordingTarget::new(640.0, 480.0);
        let mut s = settings(20, PaletteMode::StarryNight);
        s.audio.sensitivity = sensitivity;
        sim.tick(&mut video, &mut audio, &s, &mut target);
        assert_eq!(target.strokes.len(), 20);
        widths.push(target.strokes[0].width);
    }
    let bass_norm = 200.0 / 255.0;
    let expected = 1.0 + bass_norm * 0.5 * BASS_SIZE_GAIN;
    assert!((widths[1] / widths[0] - expected).abs() < 1e-4, "{widths:?}");
}

#[test]
fn changing_target_count_takes_effect_next_frame() {
    let mut sim = seeded_loop(7);
    let mut video = FakeVideo::solid(160, 120, Rgb::new(128, 128, 128));
    let mut audio = FixedAudio(AudioData::default());
    let mut target = RecordingTarget::new(800.0, 600.0);
    let mut s = settings(400, PaletteMode::SelfPortrait);

    sim.tick(&mut video, &mut audio, &s, &mut target);
    assert_eq!(sim.particles.len(), 400);
    s.particles.particle_count = 10;
    sim.tick(&mut video, &mut audio, &s, &mut target);
    assert_eq!(sim.particles.len(), 10);
    s.particles.particle_count = 0;
    let outcome = sim.tick(&mut video, &mut audio, &s, &mut target);
    assert_eq!(outcome, FrameOutcome::Rendered(StepStats::default()));
    assert!(sim.particles.is_empty());
}
