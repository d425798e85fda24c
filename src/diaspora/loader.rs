use anyhow::{Context, Result};
use std::fs;

use super::types::DiasporaPost;

/// Read every JSON file matching `pattern`, each holding an array of posts.
///
/// Files are read in path order. A pattern matching nothing is an error.
pub fn load_posts(pattern: &str) -> Result<Vec<DiasporaPost>> {
    let mut paths = glob::glob(pattern)
        .with_context(|| format!("Invalid posts pattern '{}'", pattern))?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list posts files")?;
    paths.sort();

    if paths.is_empty() {
        anyhow::bail!("No posts files match '{}'", pattern);
    }

    let mut posts = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read posts file {}", path.display()))?;
        let batch: Vec<DiasporaPost> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse posts in {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = batch.len(), "loaded posts");
        posts.extend(batch);
    }

    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"{
        "location": "Italy",
        "platform": "Facebook",
        "timestamp": "2024-03-01T12:00:00Z",
        "topics": ["Economy"],
        "narrativeType": "external"
    }"#;

    #[test]
    fn test_loads_all_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), format!("[{}]", POST)).unwrap();
        fs::write(dir.path().join("b.json"), format!("[{}, {}]", POST, POST)).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let posts = load_posts(&pattern).unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].location, "Italy");
    }

    #[test]
    fn test_no_match_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        assert!(load_posts(&pattern).is_err());
    }

    #[test]
    fn test_bad_json_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "[{").unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let err = load_posts(&pattern).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
