use particles_core::{AudioSource, Rgb, ShapeType};

/// Colours cycled with `C`; the first is the default scene colour.
pub const PALETTE: [Rgb; 6] = [
    Rgb([0x3b, 0x82, 0xf6]),
    Rgb([0xec, 0x48, 0x99]),
    Rgb([0xf5, 0x9e, 0x0b]),
    Rgb([0x10, 0xb9, 0x81]),
    Rgb([0xa8, 0x55, 0xf7]),
    Rgb([0xff, 0xff, 0xff]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Shape(ShapeType),
    ToggleAudio(AudioSource),
    NextColor,
    Quit,
}

/// Map a typed character to a scene command.
#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "1" => Some(Command::Shape(ShapeType::Stars)),
        "2" => Some(Command::Shape(ShapeType::Heart)),
        "3" => Some(Command::Shape(ShapeType::Saturn)),
        "4" => Some(Command::Shape(ShapeType::Flower)),
        "5" => Some(Command::Shape(ShapeType::Fireworks)),
        "6" => Some(Command::Shape(ShapeType::Custom)),
        "m" | "M" => Some(Command::ToggleAudio(AudioSource::Microphone)),
        "s" | "S" => Some(Command::ToggleAudio(AudioSource::System)),
        "c" | "C" => Some(Command::NextColor),
        "q" | "Q" => Some(Command::Quit),
        _ => None,
    }
}

/// Palette entry after `current`, wrapping; unknown colours restart the cycle.
pub fn next_color(current: Rgb) -> Rgb {
    let next = PALETTE
        .iter()
        .position(|&c| c == current)
        .map_or(0, |i| (i + 1) % PALETTE.len());
    PALETTE[next]
}
