//! Map link construction
//!
//! Pure helpers that derive an embeddable map frame and a shareable Google
//! Maps link from a place. No network access happens here.

use crate::config::GoogleSettings;
use serde::Serialize;

/// An embeddable map frame and the URL it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEmbed {
    /// `<iframe>` markup
    pub markup: String,
    /// Maps Embed API URL
    pub src: String,
}

/// Builds embed fragments and map links with the provisioned credential
#[derive(Debug, Clone)]
pub struct MapLinkBuilder {
    api_key: String,
    embed_base_url: String,
    search_base_url: String,
    width: u32,
    height: u32,
}

impl MapLinkBuilder {
    pub fn new(settings: &GoogleSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            embed_base_url: settings.embed_base_url.clone(),
            search_base_url: settings.search_base_url.clone(),
            width: settings.embed_width,
            height: settings.embed_height,
        }
    }

    /// Embed for a place at the configured frame size
    pub fn build_embed(&self, place_id: &str) -> MapEmbed {
        self.build_embed_sized(place_id, self.width, self.height)
    }

    /// Embed for a place at an explicit frame size
    pub fn build_embed_sized(&self, place_id: &str, width: u32, height: u32) -> MapEmbed {
        let src = format!(
            "{}?key={}&q=place_id:{}",
            self.embed_base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(place_id)
        );
        let markup = format!(
            r#"<iframe width="{}" height="{}" style="border:0" loading="lazy" allowfullscreen src="{}"></iframe>"#,
            width, height, src
        );
        MapEmbed { markup, src }
    }

    /// Shareable search link; an absent name becomes an empty query term
    pub fn build_maps_link(&self, name: Option<&str>, place_id: &str) -> String {
        let query: String = url::form_urlencoded::byte_serialize(name.unwrap_or("").as_bytes())
            .collect();
        format!(
            "{}?api=1&query={}&query_place_id={}",
            self.search_base_url,
            query,
            urlencoding::encode(place_id)
        )
    }
}
