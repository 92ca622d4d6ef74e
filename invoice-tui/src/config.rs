use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

/// How line items are entered on the invoice screen.
///
/// `Staged` adds rows through a dedicated input group that is cleared after
/// each successful add; `Inline` appends an editable row whose total is
/// recomputed on every keystroke.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Inline,
    #[default]
    Staged,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Where exported PDFs are written. Falls back to the platform
    /// Downloads folder when unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    #[serde(default)]
    pub edit_mode: EditMode,

    #[serde(default = "default_reset_on_save")]
    pub reset_on_save: bool,

    /// Default tax rate in percent, applied on startup and after a
    /// save-triggered reset.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_reset_on_save() -> bool {
    true
}

fn default_tax_rate() -> f64 {
    8.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            download_dir: None,
            edit_mode: EditMode::default(),
            reset_on_save: default_reset_on_save(),
            tax_rate: default_tax_rate(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("INVOICE_TUI_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("INVOICE_TUI").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.is_empty() {
            return Err("server_url is required".to_string());
        }
        if !self.server_url.starts_with("http") {
            return Err("server_url must be a valid HTTP(S) URL".to_string());
        }
        if self.tax_rate < 0.0 {
            return Err("tax_rate cannot be negative".to_string());
        }
        Ok(())
    }

    /// Resolve the directory PDFs are written to.
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(std::env::temp_dir)
    }

    /// The default tax rate as it appears in the tax-rate input field.
    pub fn tax_rate_input(&self) -> String {
        if self.tax_rate.fract() == 0.0 {
            format!("{}", self.tax_rate as i64)
        } else {
            format!("{}", self.tax_rate)
        }
    }
}
