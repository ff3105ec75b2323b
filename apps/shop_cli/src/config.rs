use std::{collections::HashMap, fs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub cdn_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://larek-api.nomoreparties.co/api/weblarek".into(),
            cdn_url: "https://larek-api.nomoreparties.co/content/weblarek".into(),
        }
    }
}

/// Defaults, overridden by `shop.toml` when present, then by environment
/// variables, then by CLI flags applied via [`Settings::with_overrides`].
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("shop.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SHOP_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("SHOP_CDN_URL") {
        settings.cdn_url = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = v.clone();
        }
        if let Some(v) = file_cfg.get("cdn_url") {
            settings.cdn_url = v.clone();
        }
    }
}

impl Settings {
    pub fn with_overrides(mut self, api_url: Option<String>, cdn_url: Option<String>) -> Self {
        if let Some(v) = api_url {
            self.api_url = v;
        }
        if let Some(v) = cdn_url {
            self.cdn_url = v;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_defaults() {
        let mut settings = Settings::default();
        apply_file_config(
            &mut settings,
            "api_url = \"http://localhost:9000/api\"\n",
        );
        assert_eq!(settings.api_url, "http://localhost:9000/api");
        assert_eq!(settings.cdn_url, Settings::default().cdn_url);
    }

    #[test]
    fn malformed_file_config_is_ignored() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "api_url = [broken");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn cli_overrides_win() {
        let settings = Settings::default()
            .with_overrides(Some("http://cli/api".into()), None);
        assert_eq!(settings.api_url, "http://cli/api");
        assert_eq!(settings.cdn_url, Settings::default().cdn_url);
    }
}
