use std::fmt;

/// Customisation preset addressed by a case-insensitive name.
///
/// Unknown names never fail: callers use [`NamedPreset::from_name_or_default`]
/// to fall back to the preset's default.
pub trait NamedPreset: Copy + Default + 'static {
    /// Every preset in declaration order.
    const ALL: &'static [Self];

    /// Canonical lowercase name of the preset.
    fn name(self) -> &'static str;

    /// Looks up a preset by name, ignoring case and surrounding whitespace.
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    /// Looks up a preset by name and substitutes the default when unknown.
    fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }
}

/// Named colour scheme applied to the whole document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Bright background with green intensity scale.
    #[default]
    Light,
    /// Dark background with green intensity scale.
    Dark,
    /// Black background with saturated neon accents.
    Neon,
    /// Warm greys and browns.
    Retro,
}

impl NamedPreset for Theme {
    const ALL: &'static [Self] = &[Self::Light, Self::Dark, Self::Neon, Self::Retro];

    fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Neon => "neon",
            Self::Retro => "retro",
        }
    }
}

/// Discrete projectile speed setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpeedPreset {
    /// Flights take one and a half times as long.
    Slow,
    /// Flights take exactly distance divided by velocity.
    #[default]
    Normal,
    /// Flights take seventy percent as long.
    Fast,
}

impl SpeedPreset {
    /// Multiplier applied to every flight duration.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Slow => 1.5,
            Self::Normal => 1.0,
            Self::Fast => 0.7,
        }
    }
}

impl NamedPreset for SpeedPreset {
    const ALL: &'static [Self] = &[Self::Slow, Self::Normal, Self::Fast];

    fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        }
    }
}

/// Static shape of the turret; every variant shares the same motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurretVariant {
    /// Wheeled field cannon.
    #[default]
    Classic,
    /// Tracked tank with a round turret.
    Tank,
    /// Wedge-shaped ship with pulsing engines.
    Spaceship,
}

impl NamedPreset for TurretVariant {
    const ALL: &'static [Self] = &[Self::Classic, Self::Tank, Self::Spaceship];

    fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Tank => "tank",
            Self::Spaceship => "spaceship",
        }
    }
}

/// Opaque RGB colour supplied as six hexadecimal digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl HexColor {
    /// Creates a colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `rrggbb` or `#rrggbb`.
    ///
    /// Returns `None` for anything else; callers treat that as "no override".
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |start: usize| u8::from_str_radix(&digits[start..start + 2], 16).ok();
        Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Customisation knobs accepted for a single document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    /// Colour scheme.
    pub theme: Theme,
    /// Projectile speed preset.
    pub speed: SpeedPreset,
    /// Turret shape.
    pub turret: TurretVariant,
    /// Replacement fill for the turret body, if a valid one was supplied.
    pub color_override: Option<HexColor>,
}

impl RenderOptions {
    /// Builds options from raw user input, defaulting anything unrecognised.
    #[must_use]
    pub fn from_raw(
        theme: Option<&str>,
        speed: Option<&str>,
        turret: Option<&str>,
        color: Option<&str>,
    ) -> Self {
        Self {
            theme: theme.map(Theme::from_name_or_default).unwrap_or_default(),
            speed: speed
                .map(SpeedPreset::from_name_or_default)
                .unwrap_or_default(),
            turret: turret
                .map(TurretVariant::from_name_or_default)
                .unwrap_or_default(),
            color_override: color.and_then(HexColor::parse),
        }
    }
}
