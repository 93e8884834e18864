/// Git commit the bundle was built from, or `unknown` outside a checkout.
#[must_use]
pub fn git_commit_hash() -> &'static str {
    match option_env!("MENTORSHIP_WEB_GIT_SHA") {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

/// Short label shown in the footer, e.g. `v0.1.0 (1a2b3c4d5e6f)`.
#[must_use]
pub fn version_label() -> String {
    format!("v{} ({})", env!("CARGO_PKG_VERSION"), git_commit_hash())
}

#[cfg(test)]
mod tests {
    use super::{git_commit_hash, version_label};

    #[test]
    fn version_label_includes_package_version_and_commit() {
        let label = version_label();
        assert!(label.starts_with(&format!("v{}", env!("CARGO_PKG_VERSION"))));
        assert!(label.contains(git_commit_hash()));
        assert!(!git_commit_hash().is_empty());
    }
}
