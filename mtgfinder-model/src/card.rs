//! Card data models.

use serde::{Deserialize, Serialize};

/// A single card, as much as the finder cares about.
///
/// This is a projection of the remote card object. Every field other than the
/// name is optional on the wire, so missing fields deserialize to their
/// defaults instead of failing the whole page.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Card {
    /// The card's name.
    pub name: String,
    /// The mana cost, e.g. `{2}{U}{U}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    /// The full type line, e.g. `Legendary Creature — Human Wizard`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    /// The rules text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    /// Card images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
    /// Links to related third-party resources.
    #[serde(default)]
    pub related_uris: RelatedUris,
    /// A link to the card's page on the remote service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scryfall_uri: Option<String>,
    /// Faces of multi-faced cards.
    ///
    /// Transform and modal cards carry their images and rules text here
    /// instead of on the top-level object.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_faces: Vec<CardFace>,
}

impl Card {
    /// The first face of the card, if it has multiple.
    pub fn front_face(&self) -> Option<&CardFace> {
        self.card_faces.first()
    }

    /// The image to display for this card.
    ///
    /// Falls back to the front face for multi-faced cards.
    pub fn image_url(&self) -> Option<&str> {
        self.image_uris
            .as_ref()
            .or_else(|| self.front_face().and_then(|face| face.image_uris.as_ref()))
            .and_then(|uris| uris.normal.as_deref())
    }

    /// The mana cost to display for this card.
    pub fn display_mana_cost(&self) -> Option<&str> {
        self.mana_cost
            .as_deref()
            .filter(|cost| !cost.is_empty())
            .or_else(|| self.front_face().and_then(|face| face.mana_cost.as_deref()))
    }

    /// The rules text to display for this card.
    pub fn display_oracle_text(&self) -> Option<&str> {
        self.oracle_text
            .as_deref()
            .or_else(|| self.front_face().and_then(|face| face.oracle_text.as_deref()))
    }

    /// The card's EDHREC page.
    pub fn edhrec_link(&self) -> Option<&str> {
        self.related_uris.edhrec.as_deref()
    }
}

/// A single face of a multi-faced card.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CardFace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
}

/// Image links of a card in the sizes the finder uses.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ImageUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

/// Third-party resources for a card.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RelatedUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edhrec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gatherer: Option<String>,
}
