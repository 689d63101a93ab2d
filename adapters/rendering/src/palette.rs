//! Colour palettes for the built-in themes.

use contribution_canon_core::{HexColor, Level, Theme};

/// Colours used to paint one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Canvas background.
    pub background: HexColor,
    /// Header text.
    pub text: HexColor,
    /// Turret body.
    pub turret: HexColor,
    /// Projectiles and engine lights.
    pub projectile: HexColor,
    /// Explosion flash and sparks.
    pub explosion: HexColor,
    /// Backdrop behind the grid.
    pub grid_background: HexColor,
    /// Cell fills indexed by [`Level::index`].
    pub levels: [HexColor; Level::COUNT],
}

const fn hex(rgb: u32) -> HexColor {
    HexColor::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

const LIGHT: Palette = Palette {
    background: hex(0xffffff),
    text: hex(0x24292e),
    turret: hex(0x586069),
    projectile: hex(0xf9826c),
    explosion: hex(0xffdf5d),
    grid_background: hex(0xebedf0),
    levels: [
        hex(0xebedf0),
        hex(0xc6e48b),
        hex(0x7bc96f),
        hex(0x239a3b),
        hex(0x196127),
    ],
};

const DARK: Palette = Palette {
    background: hex(0x0d1117),
    text: hex(0xc9d1d9),
    turret: hex(0x8b949e),
    projectile: hex(0xf85149),
    explosion: hex(0xffd700),
    grid_background: hex(0x21262d),
    levels: [
        hex(0x161b22),
        hex(0x0e4429),
        hex(0x006d32),
        hex(0x26a641),
        hex(0x39d353),
    ],
};

const NEON: Palette = Palette {
    background: hex(0x000000),
    text: hex(0x00ff00),
    turret: hex(0xff00ff),
    projectile: hex(0x00ffff),
    explosion: hex(0xffff00),
    grid_background: hex(0x111111),
    levels: [
        hex(0x111111),
        hex(0x003300),
        hex(0x006600),
        hex(0x009900),
        hex(0x00cc00),
    ],
};

const RETRO: Palette = Palette {
    background: hex(0x2e2e2e),
    text: hex(0xf0f0f0),
    turret: hex(0xd2691e),
    projectile: hex(0xff6347),
    explosion: hex(0xffd700),
    grid_background: hex(0x404040),
    levels: [
        hex(0x404040),
        hex(0x8b4513),
        hex(0xa0522d),
        hex(0xcd853f),
        hex(0xdaa520),
    ],
};

impl Palette {
    /// Palette for `theme`.
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
            Theme::Neon => NEON,
            Theme::Retro => RETRO,
        }
    }

    /// Fill for cells at `level`.
    #[must_use]
    pub const fn level_color(&self, level: Level) -> HexColor {
        self.levels[level.index()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}
