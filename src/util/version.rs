pub const APP_NAME: &str = "Hull Cost Calculator";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

/// User agent sent to the catalog and pricing services.
pub fn user_agent() -> String {
    format!("hull-cost-calculator/{}", version_label().trim_start_matches('v'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_carries_the_version() {
        let agent = user_agent();
        assert!(agent.starts_with("hull-cost-calculator/"));
        assert!(!agent.contains("/v"));
    }
}
