use serde::{Deserialize, Serialize};
use storefront_document::{Product, ThemeTokens};

/// Currencies priced without minor units
const ZERO_DECIMAL_CURRENCIES: [&str; 4] = ["IDR", "JPY", "KRW", "VND"];

/// Store data supplied by the page-load logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreContext {
    pub products: Vec<Product>,
    pub store_slug: String,
    /// Served from `<slug>.<domain>` rather than `<domain>/<slug>`
    pub is_subdomain: bool,
    pub currency: String,
}

impl Default for StoreContext {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            store_slug: "store".to_string(),
            is_subdomain: false,
            currency: "USD".to_string(),
        }
    }
}

impl StoreContext {
    pub fn new(store_slug: impl Into<String>) -> Self {
        Self {
            store_slug: store_slug.into(),
            ..Default::default()
        }
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn on_subdomain(mut self, is_subdomain: bool) -> Self {
        self.is_subdomain = is_subdomain;
        self
    }
}

/// Everything a block renderer may read besides its own props
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub store: &'a StoreContext,
    pub tokens: &'a ThemeTokens,
}

impl<'a> RenderContext<'a> {
    pub fn new(store: &'a StoreContext, tokens: &'a ThemeTokens) -> Self {
        Self { store, tokens }
    }

    pub fn products(&self) -> &'a [Product] {
        &self.store.products
    }

    /// Storefront URL of a product page
    pub fn product_href(&self, product: &Product) -> String {
        if self.store.is_subdomain {
            format!("/products/{}", product.slug)
        } else {
            format!("/{}/products/{}", self.store.store_slug, product.slug)
        }
    }

    pub fn format_price(&self, amount: f64) -> String {
        format_price(amount, &self.store.currency)
    }
}

/// Format `amount` as `<CODE> 1,234.50`
pub fn format_price(amount: f64, currency: &str) -> String {
    let code = currency.to_uppercase();
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let decimals = if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        0
    } else {
        2
    };

    let fixed = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{} {}{}.{}", code, sign, grouped, fraction),
        None => format!("{} {}{}", code, sign, grouped),
    }
}
