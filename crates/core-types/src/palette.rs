use serde::Serialize;

pub const PALETTE_SIZE: usize = 8;

pub const DEFAULT_PALETTE: [&str; PALETTE_SIZE] = [
    "#2E5090", "#E8833A", "#4CAF50", "#9C27B0", "#F44336", "#00BCD4", "#795548", "#607D8B",
];

/// The colour palette handed to the chart renderer for one fund.
///
/// Passed explicitly with every chart request, so concurrent runs with different
/// palettes never observe each other's colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPalette {
    colors: Vec<String>,
}

impl ChartPalette {
    /// Builds a palette from a theme's colours: at most eight are kept, and a short list
    /// is padded from the default palette.
    pub fn from_theme(colors: Option<&[String]>) -> Self {
        let mut palette: Vec<String> = match colors {
            Some(c) if !c.is_empty() => c.iter().take(PALETTE_SIZE).cloned().collect(),
            _ => DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        };
        while palette.len() < PALETTE_SIZE {
            palette.push(DEFAULT_PALETTE[palette.len()].to_string());
        }
        Self { colors: palette }
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// The colour for series `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self::from_theme(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_theme_is_padded_from_defaults() {
        let theme = vec!["#000000".to_string(), "#111111".to_string()];
        let palette = ChartPalette::from_theme(Some(theme.as_slice()));
        assert_eq!(palette.colors().len(), PALETTE_SIZE);
        assert_eq!(palette.color(0), "#000000");
        assert_eq!(palette.color(1), "#111111");
        assert_eq!(palette.color(2), DEFAULT_PALETTE[2]);
        assert_eq!(palette.color(9), "#111111");
    }

    #[test]
    fn long_theme_is_truncated() {
        let theme: Vec<String> = (0..12).map(|i| format!("#0000{:02}", i)).collect();
        let palette = ChartPalette::from_theme(Some(theme.as_slice()));
        assert_eq!(palette.colors(), &theme[..PALETTE_SIZE]);
    }

    #[test]
    fn missing_or_empty_theme_uses_defaults() {
        assert_eq!(ChartPalette::from_theme(Some(&[][..])), ChartPalette::default());
        assert_eq!(ChartPalette::default().color(4), "#F44336");
    }
}
