use std::sync::LazyLock;

/// Defines the application version.
pub static VERSION: LazyLock<String> = LazyLock::new(|| {
    format_version(
        env!("IMAGE_VERSION"),
        option_env!("VERGEN_GIT_SHA"),
        option_env!("VERGEN_GIT_DIRTY") == Some("true"),
    )
});

fn format_version(image_version: &str, commit_sha: Option<&str>, dirty: bool) -> String {
    format!(
        "{}-{}{}",
        image_version,
        commit_sha.unwrap_or("unknown"),
        if dirty { "-dirty" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn version_with_commit() {
        assert_eq!(format_version("v0.3.0", Some("abc123"), false), "v0.3.0-abc123");
        assert_eq!(
            format_version("latest", Some("abc123"), true),
            "latest-abc123-dirty"
        );
    }

    #[test]
    fn version_without_git() {
        assert_eq!(format_version("latest", None, false), "latest-unknown");
    }
}
