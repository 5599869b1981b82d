use crate::error::GapError;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Text pulled out of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub container_found: bool,
    pub heading_found: bool,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extractor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Content block whose text is matched against
    pub container_selector: String,
    /// Primary heading appended after the content block, if any
    pub heading_selector: Option<String>,
}

/// Built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// modelosyformularios.es description block plus the h1
    Modelos,
    /// WordPress `entry-content` block, no heading
    Wordpress,
}

impl Preset {
    pub fn config(self) -> ExtractorConfig {
        match self {
            Preset::Modelos => ExtractorConfig {
                container_selector: "div.c-description-block__container.container-fluid.u-max-width"
                    .to_string(),
                heading_selector: Some("h1".to_string()),
            },
            Preset::Wordpress => ExtractorConfig {
                container_selector: "div.entry-content.clear".to_string(),
                heading_selector: None,
            },
        }
    }
}

/// Pulls the relevant plain text out of page markup
pub struct ContentExtractor {
    container_selector: Selector,
    heading_selector: Option<Selector>,
}

impl ContentExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, GapError> {
        let container_selector = parse_selector("container_selector", &config.container_selector)?;
        let heading_selector = config
            .heading_selector
            .as_deref()
            .map(|s| parse_selector("heading_selector", s))
            .transpose()?;

        Ok(Self {
            container_selector,
            heading_selector,
        })
    }

    pub fn from_preset(preset: Preset) -> Result<Self, GapError> {
        Self::new(&preset.config())
    }

    /// Text of the first container, then a space and the first heading.
    /// `url` is only used in diagnostics.
    pub fn extract(&self, url: &str, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        let mut extraction = Extraction::default();

        match document.select(&self.container_selector).next() {
            Some(container) => {
                extraction.text.push_str(&element_text(container));
                extraction.container_found = true;
            }
            None => warn!(url, "content container not found"),
        }

        if let Some(heading_selector) = &self.heading_selector {
            match document.select(heading_selector).next() {
                Some(heading) => {
                    extraction.text.push(' ');
                    extraction.text.push_str(&element_text(heading));
                    extraction.heading_found = true;
                }
                None => warn!(url, "heading not found"),
            }
        }

        extraction
    }
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, GapError> {
    Selector::parse(selector).map_err(|e| GapError::Config {
        field,
        reason: format!("{:?}: {:?}", selector, e),
    })
}

/// All descendant text nodes joined by single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}
