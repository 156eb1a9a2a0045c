/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// Multi-line text printed by `termsheet --version`.
    pub fn describe(&self) -> String {
        format!(
            "termsheet {}\ncommit: {} ({})\nbuilt: {}\ntarget: {} [{}]\nrustc: {}",
            self.version,
            self.git_hash,
            self.git_status,
            self.timestamp,
            self.target,
            self.profile,
            self.rustc
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("TERMSHEET_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("TERMSHEET_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("TERMSHEET_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("TERMSHEET_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("TERMSHEET_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("TERMSHEET_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_starts_with_package_version() {
        let text = current().describe();
        assert!(text.starts_with(&format!("termsheet {}", env!("CARGO_PKG_VERSION"))));
        assert_eq!(text.lines().count(), 5);
    }
}
