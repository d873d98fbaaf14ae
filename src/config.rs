use anyhow::Result;
use chrono::Weekday;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub first_day_of_week: Option<String>,
    pub layout:            Option<LayoutConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LayoutConfig {
    pub cell_width:  Option<u16>,
    pub cell_height: Option<u16>,
    pub week_height: Option<u16>,
    pub margin_top:  Option<u16>,
}

/// Display geometry of the picker grid. Fixed at construction; a layout pass
/// only moves the grid origin, never these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub cell_width:  u16,
    pub cell_height: u16,
    pub week_height: u16,
    pub margin_top:  u16,
}

impl Default for Metrics {
    fn default() -> Self {
        Self { cell_width: 5, cell_height: 2, week_height: 1, margin_top: 1 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn first_day_of_week(&self) -> Weekday {
        match self.first_day_of_week.as_deref() {
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "monday" | "mon"    => Weekday::Mon,
                "tuesday" | "tue"   => Weekday::Tue,
                "wednesday" | "wed" => Weekday::Wed,
                "thursday" | "thu"  => Weekday::Thu,
                "friday" | "fri"    => Weekday::Fri,
                "saturday" | "sat"  => Weekday::Sat,
                "sunday" | "sun"    => Weekday::Sun,
                other => {
                    tracing::warn!("unknown first_day_of_week {other:?}, using monday");
                    Weekday::Mon
                }
            },
            None => Weekday::Mon,
        }
    }

    pub fn metrics(&self) -> Metrics {
        let d = Metrics::default();
        let l = self.layout.as_ref();
        Metrics {
            cell_width:  l.and_then(|l| l.cell_width).unwrap_or(d.cell_width).max(3),
            cell_height: l.and_then(|l| l.cell_height).unwrap_or(d.cell_height).max(1),
            week_height: l.and_then(|l| l.week_height).unwrap_or(d.week_height).max(1),
            margin_top:  l.and_then(|l| l.margin_top).unwrap_or(d.margin_top),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("dpick")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("dpick")
}
