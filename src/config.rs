use anyhow::Context as _;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.aladin.co.kr/ttb/api/ItemSearch.aspx";
pub const DEFAULT_API_VERSION: &str = "20131101";
pub const MAX_RESULTS: u32 = 10;

/// Connection settings for the Aladin item search API.
#[derive(Clone)]
pub struct ProviderConfig {
    pub ttb_key: String,
    pub base_url: Url,
    pub version: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("ttb_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(ttb_key: impl Into<String>, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("parse base url: {base_url}"))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!("base url must be http/https: {base_url}");
        }
        Ok(Self {
            ttb_key: ttb_key.into(),
            base_url,
            version: DEFAULT_API_VERSION.to_owned(),
        })
    }

    /// Reads `ALADIN_TTB_KEY` (required), `ALADIN_API_BASE_URL` and
    /// `ALADIN_API_VERSION`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let ttb_key = var("ALADIN_TTB_KEY")
            .ok_or_else(|| anyhow::anyhow!("ALADIN_TTB_KEY is not set"))?;
        let base_url = var("ALADIN_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let mut config = Self::new(ttb_key, &base_url).context("ALADIN_API_BASE_URL")?;
        if let Some(version) = var("ALADIN_API_VERSION") {
            config.version = version;
        }
        Ok(config)
    }
}
