use ratatui::style::Color;

/// Colour depth the terminal advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    TrueColor,
    Indexed256,
    Basic16,
}

impl Palette {
    /// Read `COLORTERM` and `TERM` the way most terminal apps do:
    /// `truecolor`/`24bit` in `COLORTERM` wins, then `256color` in `TERM`.
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    pub fn from_env(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if let Some(var) = colorterm {
            let lv = var.to_lowercase();
            if lv.contains("truecolor") || lv.contains("24bit") {
                return Palette::TrueColor;
            }
        }
        match term {
            Some(t) if t.contains("256color") || t.contains("direct") => Palette::Indexed256,
            _ => Palette::Basic16,
        }
    }
}

/// Map an RGB triple to a `ratatui::style::Color` for `palette`. Terminals
/// without a 256-colour palette get the supplied 16-colour `fallback`.
pub fn map_rgb_for(palette: Palette, rgb: (u8, u8, u8), fallback: Color) -> Color {
    match palette {
        Palette::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
        Palette::Indexed256 => Color::Indexed(rgb_to_xterm_index(rgb.0, rgb.1, rgb.2)),
        Palette::Basic16 => fallback,
    }
}

fn rgb_to_xterm_index(r: u8, g: u8, b: u8) -> u8 {
    // map to 6x6x6 cube (indices 16..231)
    let r6 = to_6cube(r) as i32;
    let g6 = to_6cube(g) as i32;
    let b6 = to_6cube(b) as i32;
    let cube_index = 16 + 36 * r6 + 6 * g6 + b6;
    let (cr, cg, cb) = from_6cube(r6 as u8, g6 as u8, b6 as u8);

    // also consider gray ramp 232..255
    let gray_index = rgb_to_gray_index(r, g, b) as i32;
    let (gr, gg, gb) = from_gray(gray_index as u8);

    let dist_cube = color_distance_sq((r, g, b), (cr, cg, cb));
    let dist_gray = color_distance_sq((r, g, b), (gr, gg, gb));

    if dist_gray < dist_cube {
        (232 + gray_index) as u8
    } else {
        cube_index as u8
    }
}

fn to_6cube(v: u8) -> u8 {
    ((v as u16 * 5 + 127) / 255) as u8
}

fn from_6cube(r6: u8, g6: u8, b6: u8) -> (u8, u8, u8) {
    let conv = |c: u8| match c {
        0 => 0u8,
        1 => 95u8,
        2 => 135u8,
        3 => 175u8,
        4 => 215u8,
        _ => 255u8,
    };
    (conv(r6), conv(g6), conv(b6))
}

fn rgb_to_gray_index(r: u8, g: u8, b: u8) -> u8 {
    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    ((avg as u16 * 23 + 127) / 255) as u8
}

fn from_gray(idx: u8) -> (u8, u8, u8) {
    let v = (8 + idx as u16 * 10).min(255) as u8;
    (v, v, v)
}

fn color_distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let dr = a.0 as i32 - b.0 as i32;
    let dg = a.1 as i32 - b.1 as i32;
    let db = a.2 as i32 - b.2 as i32;
    (dr * dr + dg * dg + db * db) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_detection_order() {
        assert_eq!(
            Palette::from_env(Some("truecolor"), Some("xterm")),
            Palette::TrueColor
        );
        assert_eq!(
            Palette::from_env(None, Some("xterm-256color")),
            Palette::Indexed256
        );
        assert_eq!(Palette::from_env(None, Some("linux")), Palette::Basic16);
        assert_eq!(Palette::from_env(None, None), Palette::Basic16);
    }

    #[test]
    fn basic_palette_uses_fallback() {
        let c = map_rgb_for(Palette::Basic16, (0, 128, 128), Color::Cyan);
        assert_eq!(c, Color::Cyan);
        let c = map_rgb_for(Palette::TrueColor, (0, 128, 128), Color::Cyan);
        assert_eq!(c, Color::Rgb(0, 128, 128));
    }

    #[test]
    fn xterm_index_hits_cube_and_gray_ramp() {
        // pure red lands on the cube corner
        assert_eq!(rgb_to_xterm_index(255, 0, 0), 196);
        // mid gray prefers the gray ramp
        let idx = rgb_to_xterm_index(128, 128, 128);
        assert!((232..=255).contains(&idx));
    }
}
