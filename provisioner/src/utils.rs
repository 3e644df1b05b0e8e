//! Utility functions

/// Version line shown by `--version`, stamped by the build script
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Split a comma-separated property value
///
/// Entries are trimmed and empty entries dropped.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Append `extra` to `base`, skipping entries already present
pub fn extend_unique(base: &mut Vec<String>, extra: &[String]) {
    for entry in extra {
        if !base.contains(entry) {
            base.push(entry.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_version() {
        assert!(LONG_VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(LONG_VERSION.contains(", built "));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("jdbc,aws"), vec!["jdbc", "aws"]);
        assert_eq!(split_list(" jdbc , aws ,"), vec!["jdbc", "aws"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_extend_unique() {
        let mut libs = vec!["basic".to_string(), "dev".to_string()];
        extend_unique(&mut libs, &["jdbc".to_string(), "dev".to_string()]);
        assert_eq!(libs, vec!["basic", "dev", "jdbc"]);
    }
}
