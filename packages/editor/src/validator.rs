/// Pre-save checks for theme documents
use std::collections::HashSet;
use storefront_document::{BlockProps, LayoutBlock, Page, ThemeConfig, ThemeTokens};
use storefront_renderer::{is_safe_style_value, BlockRegistry};

/// Validation warning level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    /// Renders, but probably not as intended
    Warning,
    /// Blocks a save
    Error,
}

/// Validation finding for one block or page
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
    pub page: Page,
    pub block_id: Option<String>,
}

impl ValidationWarning {
    pub fn warning(page: Page, message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            message: message.into(),
            page,
            block_id: None,
        }
    }

    pub fn error(page: Page, message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            message: message.into(),
            page,
            block_id: None,
        }
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == ValidationLevel::Error
    }
}

/// Validator for theme documents
pub struct Validator<'r> {
    /// Registry to check block types against; `None` skips the check
    registry: Option<&'r BlockRegistry>,
    /// Collected warnings
    warnings: Vec<ValidationWarning>,
}

impl<'r> Validator<'r> {
    /// Validator that also flags types missing from `registry`
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self {
            registry: Some(registry),
            warnings: Vec::new(),
        }
    }

    /// Registry-independent checks only
    pub fn structural() -> Self {
        Self {
            registry: None,
            warnings: Vec::new(),
        }
    }

    /// Validate every layout of a theme
    pub fn validate(&mut self, theme: &ThemeConfig) -> Vec<ValidationWarning> {
        self.warnings.clear();

        self.validate_tokens(&theme.tokens);
        self.validate_layout(Page::Home, &theme.layout_home);
        if let Some(layout) = &theme.layout_product {
            self.validate_layout(Page::Product, layout);
        }

        self.warnings.clone()
    }

    /// Tokens are shared by every page; findings are reported on the home page
    fn validate_tokens(&mut self, tokens: &ThemeTokens) {
        for (name, value) in tokens.css_variables() {
            if !is_safe_style_value(value) {
                self.warnings.push(ValidationWarning::error(
                    Page::Home,
                    format!("Token {} contains a character not allowed in CSS values", name),
                ));
            }
        }
    }

    fn validate_layout(&mut self, page: Page, layout: &[LayoutBlock]) {
        let mut seen = HashSet::new();

        for (index, block) in layout.iter().enumerate() {
            if block.id.is_empty() {
                self.warnings.push(ValidationWarning::error(
                    page,
                    format!("Block at position {} has an empty id", index),
                ));
            } else if !seen.insert(block.id.as_str()) {
                self.warnings.push(
                    ValidationWarning::warning(
                        page,
                        format!("Duplicate block id '{}'", block.id),
                    )
                    .with_block_id(&block.id),
                );
            }

            self.validate_block(page, index, block);
        }
    }

    fn validate_block(&mut self, page: Page, index: usize, block: &LayoutBlock) {
        let block_type = block.block_type();

        if block_type.is_empty() {
            self.warnings.push(
                ValidationWarning::error(
                    page,
                    format!("Block at position {} has an empty type", index),
                )
                .with_block_id(&block.id),
            );
            return;
        }

        if let Some(registry) = self.registry {
            if !registry.contains(block_type) {
                self.warnings.push(
                    ValidationWarning::warning(
                        page,
                        format!("Unknown block type '{}' will not render", block_type),
                    )
                    .with_block_id(&block.id),
                );
            }
        }

        match &block.props {
            BlockProps::ImageBanner(props) if props.image_url.is_none() => {
                self.warnings.push(
                    ValidationWarning::warning(page, "Image banner has no image and will not render")
                        .with_block_id(&block.id),
                );
            }
            BlockProps::Marquee(props) if props.text.is_empty() => {
                self.warnings.push(
                    ValidationWarning::warning(page, "Marquee has no text and will not render")
                        .with_block_id(&block.id),
                );
            }
            _ => {}
        }
    }
}

/// True if any finding blocks a save
pub fn has_errors(warnings: &[ValidationWarning]) -> bool {
    warnings.iter().any(ValidationWarning::is_error)
}
