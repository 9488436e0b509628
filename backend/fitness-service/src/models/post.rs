use crate::db::{Collection, Document};
use serde::{Deserialize, Serialize};

/// A social post document in the `posts` collection.
///
/// `media_urls` and `media_types` are parallel: index `i` of each describes
/// the same uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_types: Option<Vec<String>>,
}

impl Post {
    pub fn new(title: String, content: String, author: String) -> Self {
        Self {
            title: Some(title),
            content: Some(content),
            author: Some(author),
            ..Default::default()
        }
    }

    /// Attach `(url, content_type)` pairs in submission order. An empty batch
    /// leaves both arrays unset.
    pub fn with_media<I>(mut self, media: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let (urls, types): (Vec<String>, Vec<String>) = media.into_iter().unzip();
        if urls.is_empty() {
            return self;
        }

        self.media_urls = Some(urls);
        self.media_types = Some(types);
        self
    }
}

impl Document for Post {
    const COLLECTION: Collection = Collection::Posts;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
