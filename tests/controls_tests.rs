// Host-side tests for the settings-panel bindings.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]

mod bindings {
    include!("../src/controls/bindings.rs");
}

use bindings::*;
use starry_core::{PaletteMode, Settings};

#[test]
fn ids_are_unique_and_table_is_complete() {
    let table = binding_table();
    assert_eq!(table.len(), CONTROL_IDS.len());
    for (id, binding) in CONTROL_IDS {
        assert_eq!(table.get(id), Some(&binding));
        assert_eq!(id_for(binding), id);
    }
    assert_eq!(table.get("not-a-control"), None);
}

#[test]
fn numeric_inputs_write_their_field() {
    let mut s = Settings::default();
    assert!(Binding::StrokeSize.apply(&mut s, "7.5"));
    assert!(Binding::StrokeLength.apply(&mut s, "90"));
    assert!(Binding::Opacity.apply(&mut s, "0.25"));
    assert!(Binding::FlowStrength.apply(&mut s, "2"));
    assert!(Binding::Turbulence.apply(&mut s, "0"));
    assert!(Binding::Saturation.apply(&mut s, " 1.8 "));
    assert!(Binding::BrightnessThreshold.apply(&mut s, "33"));
    assert!(Binding::Sensitivity.apply(&mut s, "2.5"));
    assert!(Binding::BassInfluence.apply(&mut s, "1"));
    assert!(Binding::TrebleInfluence.apply(&mut s, "0.1"));

    let p = s.particles;
    assert_eq!(p.stroke_size, 7.5);
    assert_eq!(p.stroke_length, 90.0);
    assert_eq!(p.opacity, 0.25);
    assert_eq!(p.flow_strength, 2.0);
    assert_eq!(p.turbulence, 0.0);
    assert_eq!(p.saturation, 1.8);
    assert_eq!(p.brightness_threshold, 33.0);
    assert_eq!(s.audio.sensitivity, 2.5);
    assert_eq!(s.audio.bass_influence, 1.0);
    assert_eq!(s.audio.treble_influence, 0.1);
}

#[test]
fn particle_count_rounds_and_floors_at_zero() {
    let mut s = Settings::default();
    assert!(Binding::ParticleCount.apply(&mut s, "1499.6"));
    assert_eq!(s.particles.particle_count, 1500);
    assert!(Binding::ParticleCount.apply(&mut s, "-20"));
    assert_eq!(s.particles.particle_count, 0);
}

#[test]
fn palette_select_parses_mode_ids() {
    let mut s = Settings::default();
    for mode in PaletteMode::ALL {
        assert!(Binding::Palette.apply(&mut s, mode.as_str()));
        assert_eq!(s.particles.palette, mode);
    }
    assert!(!Binding::Palette.apply(&mut s, "monet"));
    assert_eq!(s.particles.palette, PaletteMode::ALL[PaletteMode::ALL.len() - 1]);
}

#[test]
fn rejected_values_leave_settings_untouched() {
    let mut s = Settings::default();
    for raw in ["", "abc", "NaN", "inf", "-inf", "1,5"] {
        assert!(!Binding::Opacity.apply(&mut s, raw), "raw {raw:?}");
        assert!(!Binding::ParticleCount.apply(&mut s, raw), "raw {raw:?}");
    }
    assert_eq!(s, Settings::default());
}

#[test]
fn current_values_feed_back_into_apply() {
    let defaults = Settings::default();
    let mut s = Settings::default();
    s.particles.opacity = 0.1;
    s.particles.particle_count = 17;
    s.particles.palette = PaletteMode::Sunflowers;
    s.audio.bass_influence = 0.9;
    for (_, binding) in CONTROL_IDS {
        let mut restored = defaults;
        assert!(binding.apply(&mut restored, &binding.current(&s)));
        assert_eq!(binding.current(&restored), binding.current(&s), "{binding:?}");
    }
    assert_eq!(Binding::Palette.current(&defaults), "starry_night");
}
