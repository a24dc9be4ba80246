//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. Configuration covers the
//! values that shared fragments interpolate into every page: contact
//! details, social profile URLs, and branding strings. Stock defaults are
//! always present, so a missing file is not an error and a sparse file
//! overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [contact]
//! email = "hello@example.com"
//! phone = "+1 (555) 010-0123"
//!
//! [social]
//! linkedin = "https://www.linkedin.com/company/example"
//! github = "https://github.com/example"
//! x = "https://x.com/example"
//!
//! [branding]
//! site_name = "Example Secure"
//! logo_alt = "Example Secure logo"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want.
//!
//! ```toml
//! # Only override the contact email
//! [contact]
//! email = "sales@example.com"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have usable defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Contact details rendered into the contact fragment.
    pub contact: ContactConfig,
    /// Social profile URLs rendered into the footer icon row.
    pub social: SocialConfig,
    /// Site name and logo strings.
    pub branding: BrandingConfig,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.contact.email.contains('@') {
            return Err(ConfigError::Validation(
                "contact.email must contain '@'".into(),
            ));
        }
        if self.contact.phone.trim().is_empty() {
            return Err(ConfigError::Validation(
                "contact.phone must not be empty".into(),
            ));
        }
        for (key, url) in [
            ("social.linkedin", &self.social.linkedin),
            ("social.github", &self.social.github),
            ("social.x", &self.social.x),
        ] {
            if !url.is_empty() && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an https:// URL or empty"
                )));
            }
        }
        if self.branding.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "branding.site_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Contact details (email, phone).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Contact email address.
    pub email: String,
    /// Display form of the contact phone number.
    pub phone: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: "hello@example.com".to_string(),
            phone: "+1 (555) 010-0123".to_string(),
        }
    }
}

impl ContactConfig {
    /// `mailto:` link for the contact email.
    pub fn mailto_href(&self) -> String {
        format!("mailto:{}", self.email)
    }

    /// `tel:` link for the contact phone. Keeps digits and a leading `+`;
    /// spaces, parens and dashes are display formatting only.
    pub fn tel_href(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }
}

/// Social profile URLs. An empty string omits that icon from the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    /// LinkedIn profile or company page URL.
    pub linkedin: String,
    /// GitHub organization or user URL.
    pub github: String,
    /// X (Twitter) profile URL.
    pub x: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            linkedin: "https://www.linkedin.com/company/example".to_string(),
            github: "https://github.com/example".to_string(),
            x: "https://x.com/example".to_string(),
        }
    }
}

/// Site name and logo strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingConfig {
    /// Site name, used in the nav logo, footer copyright and structured
    /// data fallbacks.
    pub site_name: String,
    /// Alt text for the logo image.
    pub logo_alt: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            site_name: "Example Secure".to_string(),
            logo_alt: "Example Secure logo".to_string(),
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from a `site.toml` file path.
///
/// A missing file yields the stock defaults. An existing file is parsed
/// with unknown keys rejected, then validated.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Sitewire Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each section only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Contact details (contact fragment)
# ---------------------------------------------------------------------------
[contact]
# Contact email, rendered as a mailto: link.
email = "hello@example.com"

# Phone number in display form. The tel: link keeps only digits and '+'.
phone = "+1 (555) 010-0123"

# ---------------------------------------------------------------------------
# Social profiles (footer icon row)
# ---------------------------------------------------------------------------
[social]
# Must be https:// URLs. Set a profile to "" to drop its icon.
linkedin = "https://www.linkedin.com/company/example"
github = "https://github.com/example"
x = "https://x.com/example"

# ---------------------------------------------------------------------------
# Branding
# ---------------------------------------------------------------------------
[branding]
# Site name: nav logo text, footer copyright, structured-data fallbacks.
site_name = "Example Secure"

# Alt text for the logo image.
logo_alt = "Example Secure logo"
"##
}
