use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The closed set of colors the badge bar can be rendered in.
pub enum BackgroundColor {
    Red,
    Blue,
    Green,
    Orange,
    Grey,
    Yellow,
    Seafoam,
    Fuchsia,
}

impl BackgroundColor {
    pub const ALL: [BackgroundColor; 8] = [
        BackgroundColor::Red,
        BackgroundColor::Blue,
        BackgroundColor::Green,
        BackgroundColor::Orange,
        BackgroundColor::Grey,
        BackgroundColor::Yellow,
        BackgroundColor::Seafoam,
        BackgroundColor::Fuchsia,
    ];

    /// Returned for any name outside the closed set.
    pub const FALLBACK: BackgroundColor = BackgroundColor::Fuchsia;

    /// The configuration name of the color, e.g. `red`
    pub fn name(&self) -> &'static str {
        match self {
            BackgroundColor::Red => "red",
            BackgroundColor::Blue => "blue",
            BackgroundColor::Green => "green",
            BackgroundColor::Orange => "orange",
            BackgroundColor::Grey => "grey",
            BackgroundColor::Yellow => "yellow",
            BackgroundColor::Seafoam => "seafoam",
            BackgroundColor::Fuchsia => "fuchsia",
        }
    }

    /// The CSS hex code of the color, e.g. `#d7373f`
    pub fn hex_code(&self) -> &'static str {
        match self {
            BackgroundColor::Red => "#d7373f",
            BackgroundColor::Blue => "#1473e6",
            BackgroundColor::Green => "#268e6c",
            BackgroundColor::Orange => "#da7b11",
            BackgroundColor::Grey => "#747474",
            BackgroundColor::Yellow => "#dfbf00",
            BackgroundColor::Seafoam => "#1b959a",
            BackgroundColor::Fuchsia => "#c038cc",
        }
    }

    /// Resolve a configured color name. The match is exact and case-sensitive; unknown or missing
    /// names resolve to [`BackgroundColor::FALLBACK`].
    pub fn of(name: Option<&str>) -> BackgroundColor {
        name.and_then(|name| {
            BackgroundColor::ALL
                .into_iter()
                .find(|color| color.name() == name)
        })
        .unwrap_or(BackgroundColor::FALLBACK)
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
