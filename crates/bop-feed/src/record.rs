//! Card data as the deck sees it.
//!
//! The API hands out loosely-shaped items; [`CardRecord::from_api`] resolves
//! every optional field exactly once so widgets never deal with absence.

use serde::Deserialize;

use crate::config::ApiConfig;

/// An item as returned by `GET /items/feed` and `GET /likes/{user}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url_suffix: Option<String>,
    #[serde(default)]
    pub product_images: Vec<String>,
    #[serde(default)]
    pub designer_name: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub categories: Vec<ApiCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiCategory {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One swipeable item.
///
/// `images()` is never empty: the gallery when there is one, otherwise the
/// primary image.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    pub primary_image: String,
    pub gallery: Vec<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub categories: Vec<String>,
}

impl CardRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        primary_image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_image: primary_image.into(),
            gallery: Vec::new(),
            brand: None,
            price: None,
            categories: Vec::new(),
        }
    }

    pub fn with_gallery<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gallery = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Resolves an API item.
    ///
    /// Primary image: `image_url_suffix`, then the first gallery entry, then
    /// `config.default_image`. Brand: `designer_name`, then `brand_name`.
    pub fn from_api(item: ApiItem, config: &ApiConfig) -> Self {
        let gallery: Vec<String> = item
            .product_images
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| config.image_url(s))
            .collect();

        let primary_image = non_blank(item.image_url_suffix)
            .map(|s| config.image_url(&s))
            .or_else(|| gallery.first().cloned())
            .unwrap_or_else(|| config.default_image.clone());

        let categories = item
            .categories
            .into_iter()
            .filter_map(|c| non_blank(c.name).or(non_blank(c.id)))
            .collect();

        Self {
            id: item.id,
            name: item.name.unwrap_or_default(),
            primary_image,
            gallery,
            brand: non_blank(item.designer_name).or(non_blank(item.brand_name)),
            price: item.price.and_then(format_price),
            categories,
        }
    }

    /// Images the carousel cycles through.
    pub fn images(&self) -> &[String] {
        if self.gallery.is_empty() {
            std::slice::from_ref(&self.primary_image)
        } else {
            &self.gallery
        }
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn format_price(v: serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::Number(n) => n.as_f64().map(|p| format!("${p:.2}")),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> ApiItem {
        serde_json::from_str(json).unwrap()
    }

    const BASE: &str = "https://m.media-amazon.com/images/G/01/Shopbop/p";

    // ── primary image fallback ────────────────────────────────────────────

    #[test]
    fn primary_from_suffix() {
        let r = CardRecord::from_api(
            item(r#"{"id":"1","name":"Dress","image_url_suffix":"/a.jpg"}"#),
            &ApiConfig::default(),
        );
        assert_eq!(r.primary_image, format!("{BASE}/a.jpg"));
        assert_eq!(r.images(), &[format!("{BASE}/a.jpg")]);
    }

    #[test]
    fn primary_falls_back_to_gallery() {
        let r = CardRecord::from_api(
            item(r#"{"id":"1","image_url_suffix":"  ","product_images":["/g1.jpg","/g2.jpg"]}"#),
            &ApiConfig::default(),
        );
        assert_eq!(r.primary_image, format!("{BASE}/g1.jpg"));
        assert_eq!(r.images().len(), 2);
    }

    #[test]
    fn primary_falls_back_to_default_image() {
        let cfg = ApiConfig { default_image: "placeholder.png".into(), ..Default::default() };
        let r = CardRecord::from_api(item(r#"{"id":"7"}"#), &cfg);
        assert_eq!(r.primary_image, "placeholder.png");
        assert_eq!(r.images(), &["placeholder.png".to_string()]);
        assert_eq!(r.name, "");
    }

    // ── other fields ──────────────────────────────────────────────────────

    #[test]
    fn brand_prefers_designer() {
        let r = CardRecord::from_api(
            item(r#"{"id":"1","designer_name":"Ganni","brand_name":"Other"}"#),
            &ApiConfig::default(),
        );
        assert_eq!(r.brand.as_deref(), Some("Ganni"));

        let r = CardRecord::from_api(
            item(r#"{"id":"1","designer_name":"","brand_name":"Other"}"#),
            &ApiConfig::default(),
        );
        assert_eq!(r.brand.as_deref(), Some("Other"));
    }

    #[test]
    fn price_and_categories() {
        let json = concat!(
            r#"{"id":"1","price":129.5,"#,
            r#""categories":[{"id":"c1","name":"Dresses"},{"id":"c2"}]}"#,
        );
        let r = CardRecord::from_api(item(json), &ApiConfig::default());
        assert_eq!(r.price.as_deref(), Some("$129.50"));
        assert_eq!(r.categories, vec!["Dresses".to_string(), "c2".to_string()]);
    }

    #[test]
    fn unknown_api_fields_are_ignored() {
        let r = CardRecord::from_api(
            item(r#"{"id":"1","name":"Top","embedding":[0.1,0.2]}"#),
            &ApiConfig::default(),
        );
        assert_eq!(r.name, "Top");
    }
}
