use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

use crate::series::{Direction, Endpoint};

// ---------------------------------------------------------------------------
// Fixed roles
// ---------------------------------------------------------------------------

pub const ORIGIN: Color32 = Color32::from_rgb(0, 0, 255);
pub const DESTINATION: Color32 = Color32::from_rgb(255, 0, 0);
pub const OCEAN: Color32 = Color32::from_rgb(147, 226, 255);
pub const GLOBE_BACKGROUND: Color32 = Color32::from_rgb(230, 230, 230);
pub const COASTLINE: Color32 = Color32::from_rgb(110, 110, 110);
pub const GRATICULE: Color32 = Color32::from_rgb(169, 169, 169);
pub const FEE_LINE: Color32 = Color32::from_rgb(0, 0, 255);

/// Arcs are drawn at half opacity.
const ARC_ALPHA: u8 = 128;

pub fn endpoint_color(endpoint: Endpoint) -> Color32 {
    match endpoint {
        Endpoint::Origin => ORIGIN,
        Endpoint::Destination => DESTINATION,
    }
}

pub fn direction_color(direction: Direction) -> Color32 {
    match direction {
        Direction::Incoming => Color32::from_rgb(0, 128, 0),
        Direction::Outgoing => Color32::from_rgb(255, 0, 0),
    }
}

// ---------------------------------------------------------------------------
// Arc colours
// ---------------------------------------------------------------------------

/// Plain arc colour: half-transparent blue.
pub fn arc_color() -> Color32 {
    with_alpha(ORIGIN, ARC_ALPHA)
}

/// Arc colour shaded by fee: pale blue for free transfers, deep blue for the
/// most expensive transfer of the view.
pub fn fee_shade(fee: f64, max_fee: f64) -> Color32 {
    let t = if max_fee > 0.0 {
        (fee / max_fee).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    let cheap: Hsl = Hsl::new(210.0, 0.85, 0.80);
    let expensive: Hsl = Hsl::new(235.0, 0.95, 0.30);
    with_alpha(hsl_to_color32(cheap.mix(expensive, t)), ARC_ALPHA + (t * 100.0) as u8)
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

fn with_alpha(c: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expensive_arcs_are_darker() {
        let cheap = fee_shade(0.0, 20_000_000.0);
        let dear = fee_shade(20_000_000.0, 20_000_000.0);
        let lum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(lum(dear) < lum(cheap));
    }

    #[test]
    fn zero_max_fee_does_not_divide() {
        assert_eq!(fee_shade(0.0, 0.0), fee_shade(5.0, 0.0));
    }

    #[test]
    fn endpoints_are_distinct() {
        assert_ne!(endpoint_color(Endpoint::Origin), endpoint_color(Endpoint::Destination));
    }
}
