use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

pub type PostId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// One article as listed by the remote feed. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "tag_list")]
    pub tag_list: Vec<String>,
    /// Raw RFC 3339 timestamp as sent by the source.
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_at: String,
    #[serde(default)]
    pub public_reactions_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub reading_time_minutes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub user: Author,
}

impl Post {
    pub fn published_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.published_at.trim()).ok()
    }
}

/// Single-article payload: the listing fields plus the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub post: Post,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body_html: String,
    #[serde(default)]
    pub body_markdown: Option<String>,
}

/// An article ready for display, with its body reduced to Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArticle {
    pub post: Post,
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub short_summary: Option<String>,
    #[serde(default)]
    pub bg_color_hex: Option<String>,
    #[serde(default)]
    pub text_color_hex: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Listings send `tag_list` as an array; single articles send a
// comma-separated string.
fn tag_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    let tags = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::List(tags)) => tags,
        Some(Raw::Joined(joined)) => joined.split(',').map(ToOwned::to_owned).collect(),
        None => Vec::new(),
    };
    Ok(tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect())
}
