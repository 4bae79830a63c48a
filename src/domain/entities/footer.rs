use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Text shown in the site footer until an admin saves their own.
pub const DEFAULT_FOOTER_TEXT: &str = "MotifLAB, Türkiye'nin zengin kültürel mirasını dijital ortamda yaşatmayı amaçlayan bir platformdur. Anadolu'nun binlerce yıllık geçmişinden gelen geleneksel motifleri, çini sanatını, halı ve kilim dokumacılığını keşfetmenizi sağlıyoruz.

Her motif bir hikaye anlatır, her desen bir medeniyetin izlerini taşır. Amacımız, atalarımızdan miras kalan bu benzersiz sanat eserlerini gelecek nesillere aktarmak ve dünya çapında tanıtmaktır.";

/// The singleton footer record. Never-saved footers come back as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    /// The service stores footers as sent, so a non-string `text` reads as unset.
    #[serde(
        default,
        deserialize_with = "text_if_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
}

fn text_if_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl Footer {
    pub fn new(text: impl Into<String>) -> Self {
        Footer { text: Some(text.into()) }
    }

    /// The stored text, if any non-empty text was saved.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FooterResponse {
    pub footer: Footer,
}
