//! Image links in note content and the previewer seam.

use std::collections::HashSet;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::CoreResult;

fn image_url_regex() -> &'static Regex {
    static IMAGE_URL: OnceLock<Regex> = OnceLock::new();
    IMAGE_URL.get_or_init(|| {
        Regex::new(r#"(?i)https?://[^\s"'<>]+\.(png|jpg|jpeg|webp|gif)(?:\?[^\s"'<>]*)?"#)
            .expect("valid image url regex")
    })
}

/// Image URLs in `content`, first occurrence order, without repeats.
pub fn extract_image_urls(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    image_url_regex()
        .find_iter(content)
        .map(|m| m.as_str())
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}

/// Renders a remote image as terminal text.
#[async_trait]
pub trait ImagePreviewer: Send + Sync {
    /// Fetch `url` and render it at most `width` characters wide.
    async fn preview(&self, url: &str, width: u32) -> CoreResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_unique_image_urls() {
        let content = "look https://x.io/cat.PNG and https://x.io/a.jpg?w=200 \
                       again https://x.io/cat.PNG plus https://x.io/page.html";
        assert_eq!(
            extract_image_urls(content),
            vec!["https://x.io/cat.PNG", "https://x.io/a.jpg?w=200"]
        );
    }

    #[test]
    fn test_quotes_end_a_url() {
        let content = r#"<img src="https://x.io/d.webp">"#;
        assert_eq!(extract_image_urls(content), vec!["https://x.io/d.webp"]);
        assert!(extract_image_urls("no images here").is_empty());
    }
}
