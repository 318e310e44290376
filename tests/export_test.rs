use std::path::Path;

use ntmx::export::{export_to_json, export_to_markdown, export_to_text};
use ntmx::{ImporterConfig, load_bulletin};

#[cfg(test)]
mod export_tests {
    use super::*;

    async fn load() -> ntmx::Bulletin {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/efs-49-2015.htm");
        load_bulletin(&path, &ImporterConfig::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_json_export_structure() {
        let bulletin = load().await;
        let json = export_to_json(&bulletin).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["year"], 2015);
        assert_eq!(value["week"], 49);
        assert_eq!(value["messages"].as_array().unwrap().len(), 3);
        assert_eq!(value["messages"][0]["references"][0]["type"], "REPETITION");
        assert_eq!(value["messages"][1]["geometry"]["features"][0]["kind"], "MultiPoint");
    }

    #[tokio::test]
    async fn test_text_export_lists_both_languages() {
        let bulletin = load().await;
        let text = export_to_text(&bulletin);
        assert!(text.contains("EfS week 49 2015 (3 messages, series dma-nm)"));
        assert!(text.contains("[da] 14. (T) Kattegat. Bøje udlagt."));
        assert!(text.contains("[en] 14. (T) The Kattegat. Buoy laid."));
        assert!(text.contains("Reference: NM-056-56 Update"));
    }

    #[tokio::test]
    async fn test_markdown_export_headings() {
        let bulletin = load().await;
        let markdown = export_to_markdown(&bulletin);
        assert!(markdown.starts_with("# EfS 49/2015"));
        assert!(markdown.contains("## 15. Østersøen - Bornholm. Rønne havn. Uddybning."));
        assert!(markdown.contains("### 15. The Baltic - Bornholm. Rønne harbour. Dredging."));
        assert!(markdown.contains("*Original information*"));
    }
}
