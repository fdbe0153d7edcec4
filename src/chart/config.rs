use std::env;

pub const HEIGHT_ENV_VAR: &str = "SPEND_CHART_HEIGHT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub y_label: String,
    /// Rows available to the tallest bar
    pub height: usize,
    /// Minimum bar width; bars widen to fit the longest category name
    pub bar_width: usize,
    /// Columns between bars
    pub gap: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            y_label: String::from("Spending in dollars"),
            height: 10,
            bar_width: 3,
            gap: 2,
        }
    }
}

impl ChartConfig {
    /// Defaults, with the height taken from `SPEND_CHART_HEIGHT` when set.
    pub fn from_env() -> Self {
        ChartConfig::default().with_height_override(env::var(HEIGHT_ENV_VAR).ok().as_deref())
    }

    fn with_height_override(mut self, value: Option<&str>) -> Self {
        let Some(value) = value else {
            return self;
        };

        match value.trim().parse::<usize>() {
            Ok(height) if height > 0 => {
                log::debug!("Chart height set to {height} from {HEIGHT_ENV_VAR}");
                self.height = height;
            }
            _ => log::warn!("Ignoring invalid {HEIGHT_ENV_VAR}={value:?}"),
        }
        self
    }
}
