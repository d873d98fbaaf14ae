use anyhow::Result;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};

pub fn hex_to_color(hex: &str) -> Color {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 { return Color::Reset; }
    let r = u8::from_str_radix(&h[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&h[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&h[4..6], 16).unwrap_or(0);
    Color::Rgb(r, g, b)
}

fn default_border_style() -> String { "rounded".to_owned() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    // Backgrounds
    pub bg_primary: String, pub bg_secondary: String, pub bg_popup: String,
    // Borders
    pub border_normal: String, pub border_focused: String,
    // Text
    pub text_primary: String, pub text_muted: String, pub text_accent: String,
    // Highlights
    pub today_bg: String, pub today_fg: String,
    pub selected_bg: String, pub selected_fg: String,
    // Day classes
    pub weekend_fg: String, pub outmonth_fg: String,
    /// Border style: "rounded" | "double" | "thick" | "plain"
    #[serde(default = "default_border_style")]
    pub border_style: String,
}

impl ThemeConfig {
    // ── Color accessors ───────────────────────────────────────────────────────
    pub fn bg(&self)            -> Color { hex_to_color(&self.bg_primary) }
    pub fn bg2(&self)           -> Color { hex_to_color(&self.bg_secondary) }
    pub fn popup_bg(&self)      -> Color { hex_to_color(&self.bg_popup) }
    pub fn border(&self)        -> Color { hex_to_color(&self.border_normal) }
    pub fn border_active(&self) -> Color { hex_to_color(&self.border_focused) }
    pub fn fg(&self)            -> Color { hex_to_color(&self.text_primary) }
    pub fn fg_dim(&self)        -> Color { hex_to_color(&self.text_muted) }
    pub fn accent(&self)        -> Color { hex_to_color(&self.text_accent) }
    pub fn weekend_color(&self) -> Color { hex_to_color(&self.weekend_fg) }
    pub fn out_month(&self)     -> Color { hex_to_color(&self.outmonth_fg) }

    pub fn today_highlight(&self)    -> (Color, Color) {
        (hex_to_color(&self.today_bg), hex_to_color(&self.today_fg))
    }
    pub fn selected_highlight(&self) -> (Color, Color) {
        (hex_to_color(&self.selected_bg), hex_to_color(&self.selected_fg))
    }

    pub fn border_type(&self) -> BorderType {
        match self.border_style.as_str() {
            "double" => BorderType::Double,
            "thick"  => BorderType::Thick,
            "plain"  => BorderType::Plain,
            _        => BorderType::Rounded,
        }
    }

    // ── Persistence ───────────────────────────────────────────────────────────
    pub fn load() -> Result<Self> {
        let path = crate::config::config_dir().join("theme.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            let t = ThemeConfig::default();
            t.save()?;
            Ok(t)
        }
    }

    pub fn save(&self) -> Result<()> {
        let dir = crate::config::config_dir();
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("theme.toml"), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    // ── Theme catalogue ───────────────────────────────────────────────────────
    pub fn all_themes() -> Vec<ThemeConfig> {
        vec![
            ThemeConfig::default(),    // Catppuccin Mocha
            ThemeConfig::nord(),
            ThemeConfig::gruvbox(),
            ThemeConfig::tokyo_night(),
            ThemeConfig::hacker(),
        ]
    }

    // ── Built-in themes ───────────────────────────────────────────────────────

    pub fn nord() -> Self { Self {
        name: "nord".into(),
        bg_primary: "#2e3440".into(), bg_secondary: "#3b4252".into(), bg_popup: "#434c5e".into(),
        border_normal: "#4c566a".into(), border_focused: "#88c0d0".into(),
        text_primary: "#eceff4".into(), text_muted: "#4c566a".into(), text_accent: "#88c0d0".into(),
        today_bg: "#88c0d0".into(), today_fg: "#2e3440".into(),
        selected_bg: "#81a1c1".into(), selected_fg: "#2e3440".into(),
        weekend_fg: "#bf616a".into(), outmonth_fg: "#616e88".into(),
        border_style: "rounded".into(),
    }}

    pub fn gruvbox() -> Self { Self {
        name: "gruvbox".into(),
        bg_primary: "#282828".into(), bg_secondary: "#1d2021".into(), bg_popup: "#3c3836".into(),
        border_normal: "#504945".into(), border_focused: "#d79921".into(),
        text_primary: "#ebdbb2".into(), text_muted: "#7c6f64".into(), text_accent: "#d79921".into(),
        today_bg: "#d79921".into(), today_fg: "#282828".into(),
        selected_bg: "#689d6a".into(), selected_fg: "#282828".into(),
        weekend_fg: "#fb4934".into(), outmonth_fg: "#665c54".into(),
        border_style: "rounded".into(),
    }}

    pub fn tokyo_night() -> Self { Self {
        name: "tokyo-night".into(),
        bg_primary: "#1a1b26".into(), bg_secondary: "#16161e".into(), bg_popup: "#24283b".into(),
        border_normal: "#3d4166".into(), border_focused: "#7aa2f7".into(),
        text_primary: "#c0caf5".into(), text_muted: "#565f89".into(), text_accent: "#7aa2f7".into(),
        today_bg: "#bb9af7".into(), today_fg: "#1a1b26".into(),
        selected_bg: "#7aa2f7".into(), selected_fg: "#1a1b26".into(),
        weekend_fg: "#f7768e".into(), outmonth_fg: "#414868".into(),
        border_style: "rounded".into(),
    }}

    /// Matrix / hacker — phosphor green on pure black, double-line borders.
    pub fn hacker() -> Self { Self {
        name: "hacker".into(),
        bg_primary: "#000000".into(), bg_secondary: "#001100".into(), bg_popup: "#001a00".into(),
        border_normal: "#003300".into(), border_focused: "#00ff41".into(),
        text_primary: "#00cc33".into(), text_muted: "#004411".into(), text_accent: "#00ff41".into(),
        today_bg: "#00ff41".into(), today_fg: "#000000".into(),
        selected_bg: "#003300".into(), selected_fg: "#00ff41".into(),
        weekend_fg: "#00aa22".into(), outmonth_fg: "#003311".into(),
        border_style: "double".into(),
    }}
}

impl Default for ThemeConfig {
    fn default() -> Self { Self {
        name: "catppuccin-mocha".into(),
        bg_primary: "#1e1e2e".into(), bg_secondary: "#181825".into(), bg_popup: "#313244".into(),
        border_normal: "#45475a".into(), border_focused: "#89b4fa".into(),
        text_primary: "#cdd6f4".into(), text_muted: "#6c7086".into(), text_accent: "#89b4fa".into(),
        today_bg: "#cba6f7".into(), today_fg: "#1e1e2e".into(),
        selected_bg: "#89b4fa".into(), selected_fg: "#1e1e2e".into(),
        weekend_fg: "#f38ba8".into(), outmonth_fg: "#585b70".into(),
        border_style: "rounded".into(),
    }}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(hex_to_color("00ff00"), Color::Rgb(0, 255, 0));
        assert_eq!(hex_to_color("nope"), Color::Reset);
    }

    #[test]
    fn themes_round_trip_through_toml() {
        for theme in ThemeConfig::all_themes() {
            let text = toml::to_string_pretty(&theme).unwrap();
            let back: ThemeConfig = toml::from_str(&text).unwrap();
            assert_eq!(back.name, theme.name);
            assert_eq!(back.selected_bg, theme.selected_bg);
        }
    }
}
