//! Module params loading

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Load module params from a JSON file, or from stdin when the path is `-`.
pub fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading params from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading params file {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("parsing params from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipaops_modules::FrameworkParams;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "dev"}}"#).unwrap();
        let params: FrameworkParams = load(file.path()).unwrap();
        assert_eq!(params.name, "dev");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result: anyhow::Result<FrameworkParams> = load(file.path());
        assert!(result.is_err());
    }
}
