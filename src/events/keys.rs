use starry_core::PaletteMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Palette(PaletteMode),
    TogglePause,
    TogglePanel,
    ToggleFullscreen,
    ClearCanvas,
    Stop,
}

#[inline]
pub fn palette_for_key(key: &str) -> Option<PaletteMode> {
    match key {
        "1" => Some(PaletteMode::Original),
        "2" => Some(PaletteMode::StarryNight),
        "3" => Some(PaletteMode::Sunflowers),
        "4" => Some(PaletteMode::SelfPortrait),
        _ => None,
    }
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    if let Some(mode) = palette_for_key(key) {
        return Some(KeyAction::Palette(mode));
    }
    match key {
        " " => Some(KeyAction::TogglePause),
        "h" | "H" => Some(KeyAction::TogglePanel),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "c" | "C" => Some(KeyAction::ClearCanvas),
        "Escape" => Some(KeyAction::Stop),
        _ => None,
    }
}
