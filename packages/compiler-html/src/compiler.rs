use std::collections::BTreeMap;
use storefront_renderer::{is_safe_style_value, CssRule, RenderedPage, VNode};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, PartialEq)]
pub enum CompileError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid attribute name {name:?} on <{tag}>")]
    InvalidAttributeName { tag: String, name: String },

    #[error("Invalid style property: {0:?}")]
    InvalidStyleProperty(String),
}

/// Static styles for the built-in block classes
const BASE_STYLES: &str = "\
.block { box-sizing: border-box; }
.product-card { color: inherit; text-decoration: none; }
.marquee-track { animation-iteration-count: infinite; animation-name: storefront-marquee; animation-timing-function: linear; display: inline-block; padding-left: 100%; }
.block-placeholder { border: 2px dashed #DC2626; color: #DC2626; font-family: monospace; padding: 16px; }
@keyframes storefront-marquee { from { transform: translateX(0); } to { transform: translateX(-100%); } }";

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Emit element styles as `style` attributes
    pub inline_styles: bool,
    /// Include the stylesheet for built-in block classes
    pub base_styles: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Document title
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            inline_styles: true,
            base_styles: true,
            pretty: true,
            indent: "  ".to_string(),
            title: "Storefront".to_string(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a rendered page to a complete HTML document
pub fn compile_to_html(page: &RenderedPage, options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(&page.styles, &mut ctx)?;

    ctx.add_line("<body>");
    ctx.indent();

    ctx.add_line("<main class=\"storefront\">");
    ctx.indent();
    for node in &page.nodes {
        compile_node(node, &mut ctx)?;
    }
    ctx.dedent();
    ctx.add_line("</main>");

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

/// Compile nodes to body markup only (for embedding in an existing page)
pub fn compile_fragment(nodes: &[VNode], options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    for node in nodes {
        compile_node(node, &mut ctx)?;
    }

    Ok(ctx.get_output())
}

/// Compile style rules to a stylesheet.
///
/// A declaration with an invalid name or a value that could escape its rule
/// is dropped on its own; the rest of the rule is kept.
pub fn compile_stylesheet(rules: &[CssRule]) -> String {
    let mut out = String::new();

    for rule in rules {
        let body: Vec<String> = rule
            .properties
            .iter()
            .filter(|(name, value)| {
                let keep = is_valid_style_property(name) && is_safe_style_value(value);
                if !keep {
                    warn!(selector = %rule.selector, property = %name, "Dropping unsafe style declaration");
                }
                keep
            })
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect();

        out.push_str(&format!("{} {{ {} }}\n", rule.selector, body.join(" ")));
    }

    out
}

fn compile_head(rules: &[CssRule], ctx: &mut Context) -> Result<(), CompileError> {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
    ctx.add_line(&title);

    let stylesheet = compile_stylesheet(rules);
    let include_base = ctx.options.base_styles;

    if include_base || !stylesheet.is_empty() {
        ctx.add_line("<style>");
        ctx.indent();
        for line in stylesheet.lines() {
            ctx.add_line(line);
        }
        if include_base {
            for line in BASE_STYLES.lines() {
                ctx.add_line(line);
            }
        }
        ctx.dedent();
        ctx.add_line("</style>");
    }

    ctx.dedent();
    ctx.add_line("</head>");
    Ok(())
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            key: _,
        } => compile_element(tag, attributes, styles, children, ctx),

        VNode::Text { content } => {
            let escaped = escape_html(content);
            ctx.add_line(&escaped);
            Ok(())
        }

        VNode::Comment { content } => {
            let comment = format!("<!-- {} -->", content.replace("--", "- -"));
            ctx.add_line(&comment);
            Ok(())
        }

        VNode::Placeholder {
            block_id,
            block_type,
            message,
        } => {
            let placeholder = format!(
                "<div class=\"block-placeholder\" data-block-id=\"{}\" data-block-type=\"{}\">{}</div>",
                escape_html(block_id),
                escape_html(block_type),
                escape_html(message)
            );
            ctx.add_line(&placeholder);
            Ok(())
        }
    }
}

fn compile_element(
    tag: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_name(tag) {
        return Err(CompileError::InvalidTagName(tag.to_string()));
    }

    // Opening tag
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", tag));

    for (name, value) in attributes {
        if !is_valid_name(name) {
            return Err(CompileError::InvalidAttributeName {
                tag: tag.to_string(),
                name: name.clone(),
            });
        }
        ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if ctx.options.inline_styles && !styles.is_empty() {
        let mut declarations = Vec::with_capacity(styles.len());
        for (property, value) in styles {
            if !is_valid_style_property(property) {
                return Err(CompileError::InvalidStyleProperty(property.clone()));
            }
            declarations.push(format!("{}: {};", property, value));
        }
        ctx.add(&format!(" style=\"{}\"", escape_html(&declarations.join(" "))));
    }

    // Self-closing tags
    if is_self_closing(tag) {
        ctx.add(" />");
        ctx.newline();
        return Ok(());
    }

    ctx.add(">");

    // A lone text child stays on the same line as its tags
    if let [VNode::Text { content }] = children {
        ctx.add(&escape_html(content));
        ctx.add(&format!("</{}>", tag));
        ctx.newline();
        return Ok(());
    }

    if !children.is_empty() {
        ctx.newline();
        ctx.indent();
        for child in children {
            compile_node(child, ctx)?;
        }
        ctx.dedent();
        if ctx.options.pretty {
            ctx.add_indent();
        }
    }

    // Closing tag
    ctx.add(&format!("</{}>", tag));
    ctx.newline();

    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Tag and attribute names: ASCII letter followed by letters, digits or `-`
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

fn is_valid_style_property(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
