/// Tests for config module
#[cfg(test)]
mod tests {
    use crate::config::{ReportConfig, load_config, parse_config};
    use crate::layout::PageGeometry;
    use std::io::Write;

    #[test]
    fn test_defaults_match_house_style() {
        let config = ReportConfig::default();
        assert_eq!(config.product_name, "CHEMVIZ");
        assert_eq!(config.subtitle, "Equipment Analysis Report");
        assert_eq!(config.version_label, "ChemViz Systems v2.0.5");
        assert_eq!(config.filename_prefix, "ChemViz_Report");
        assert!(config.page_numbers);
        assert_eq!(config.page, PageGeometry::letter());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_keeps_defaults() {
        let config = parse_config("").expect("Empty config should parse");
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            version_label = "ChemViz Systems v3.0.0"
            page_numbers = false

            [page]
            margin_left = 54.0
            "#,
        )
        .expect("Should parse partial config");

        assert_eq!(config.version_label, "ChemViz Systems v3.0.0");
        assert!(!config.page_numbers);
        assert_eq!(config.page.margin_left, 54.0);
        // Untouched keys keep their defaults
        assert_eq!(config.page.margin_right, 72.0);
        assert_eq!(config.product_name, "CHEMVIZ");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("page_numbers = [").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_margins_must_leave_room() {
        let err = parse_config("[page]\nmargin_left = 400.0\nmargin_right = 400.0\n").unwrap_err();
        assert!(err.to_string().contains("no room"));
    }

    #[test]
    fn test_filename_prefix_rejects_separators() {
        assert!(parse_config("filename_prefix = \"../escape\"").is_err());
        assert!(parse_config("filename_prefix = \"  \"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "subtitle = \"Plant 7 Summary\"").unwrap();

        let config = load_config(Some(file.path())).expect("Should load explicit config");
        assert_eq!(config.subtitle, "Plant 7 Summary");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());
    }
}
