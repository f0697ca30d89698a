use anyhow::{anyhow, Context, Result};

use crate::layout::{LayoutVariant, PageBox, PageSize};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Page box used by paginated and PDF export.
    pub page_box: PageBox,
    /// Layout used when a render request names none.
    pub default_layout: LayoutVariant,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let page_size = var("PAGE_SIZE", "a4")
            .parse::<PageSize>()
            .map_err(|e| anyhow!(e))
            .context("PAGE_SIZE must be 'a4' or 'letter'")?;
        let margin_pt = var("PAGE_MARGIN_PT", "36")
            .parse::<f32>()
            .context("PAGE_MARGIN_PT must be a number of points")?;
        let page_box = PageBox::new(page_size, margin_pt);
        page_box
            .validate()
            .context("PAGE_MARGIN_PT leaves no room for content")?;

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            page_box,
            default_layout: var("DEFAULT_LAYOUT", "single-column")
                .parse::<LayoutVariant>()
                .map_err(|e| anyhow!(e))
                .context("DEFAULT_LAYOUT must name a known layout")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            page_box: PageBox::a4(),
            default_layout: LayoutVariant::SingleColumn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.page_box, PageBox::a4());
        assert_eq!(config.default_layout, LayoutVariant::SingleColumn);
    }

    #[test]
    fn test_letter_with_custom_margin() {
        let config = load(&[
            ("PAGE_SIZE", "letter"),
            ("PAGE_MARGIN_PT", "54"),
            ("DEFAULT_LAYOUT", "two-column-b"),
        ])
        .unwrap();
        assert_eq!(config.page_box.width_pt, 612.0);
        assert_eq!(config.page_box.margin_pt, 54.0);
        assert_eq!(config.default_layout, LayoutVariant::TwoColumnB);
    }

    #[test]
    fn test_invalid_values_fail_with_context() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        let err = load(&[("PAGE_SIZE", "a3")]).unwrap_err();
        assert!(err.to_string().contains("PAGE_SIZE"));
        let err = load(&[("PAGE_MARGIN_PT", "400")]).unwrap_err();
        assert!(err.to_string().contains("PAGE_MARGIN_PT"));
        assert!(load(&[("DEFAULT_LAYOUT", "three-column")]).is_err());
    }
}
