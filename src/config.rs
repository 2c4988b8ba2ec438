//! Runtime configuration read from the environment.

use crate::domain::CategoryId;
use crate::infra::discovery::DiscoveryStrategy;
use crate::infra::resolver::DEFAULT_CONCURRENCY;

const DEFAULT_ESI_URL: &str = "https://esi.evetech.net/latest/";
const DEFAULT_PRICING_URL: &str = "https://api.everef.net/v1/industry/cost";
const MAX_CONCURRENCY: usize = 32;

/// Inventory category holding every ship group.
pub const SHIP_CATEGORY_ID: CategoryId = 6;
/// Group whose members populate the hull selector.
pub const TARGET_GROUP_NAME: &str = "battleship";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub esi_url: String,
    pub pricing_url: String,
    pub concurrency: usize,
    pub discovery: DiscoveryStrategy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            esi_url: DEFAULT_ESI_URL.to_string(),
            pricing_url: DEFAULT_PRICING_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            discovery: DiscoveryStrategy::Search,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        // A proxy fronts both services under fixed prefixes.
        if let Some(proxy) = get("HULLCALC_PROXY_URL") {
            let proxy = proxy.trim_end_matches('/');
            config.esi_url = format!("{proxy}/esi/");
            config.pricing_url = format!("{proxy}/everef");
        }
        if let Some(url) = get("HULLCALC_ESI_URL") {
            config.esi_url = with_trailing_slash(url);
        }
        if let Some(url) = get("HULLCALC_PRICING_URL") {
            config.pricing_url = url;
        }
        config.concurrency = parse_concurrency(get("HULLCALC_CONCURRENCY").as_deref());
        config.discovery = match get("HULLCALC_DISCOVERY").as_deref() {
            Some(mode) if mode.eq_ignore_ascii_case("scan") => DiscoveryStrategy::Scan {
                category: SHIP_CATEGORY_ID,
            },
            _ => DiscoveryStrategy::Search,
        };
        config
    }
}

// `Url::join` drops the last segment of a base without a trailing slash.
fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn parse_concurrency(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CONCURRENCY)
        .clamp(1, MAX_CONCURRENCY)
}
