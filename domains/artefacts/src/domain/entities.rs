//! Domain entities for the Artefacts domain
//!
//! Records mirror the JSON shapes served by the Curio API. Field names on the
//! wire follow the backend (`_id`, `userId`, `images[].URL`, ...); the Rust
//! side uses the domain names.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Maximum artefact title length
pub const MAX_TITLE_LENGTH: u64 = 100;

/// Maximum comment length
pub const MAX_COMMENT_LENGTH: u64 = 1000;

/// Artefact visibility. Encoded on the wire as `0` (public) / `1` (private).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

impl From<Privacy> for u8 {
    fn from(privacy: Privacy) -> Self {
        match privacy {
            Privacy::Public => 0,
            Privacy::Private => 1,
        }
    }
}

impl TryFrom<u8> for Privacy {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Privacy::Public),
            1 => Ok(Privacy::Private),
            other => Err(format!("invalid privacy value: {}", other)),
        }
    }
}

impl std::fmt::Display for Privacy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Privacy::Public => write!(f, "public"),
            Privacy::Private => write!(f, "private"),
        }
    }
}

/// Remote image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "URL")]
    pub url: String,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// An artefact as served by the Curio API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ArtefactRecordWire")]
pub struct ArtefactRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub date_obtained: Option<NaiveDate>,
    pub privacy: Privacy,
    pub images: Vec<ImageRef>,
    /// User ids that liked the artefact; a set, so membership is unique
    pub likes: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

/// Artefact as it arrives over the wire. Older records carry `datePosted`,
/// newer ones `createdAt`, and some both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtefactRecordWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "userId")]
    owner_id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default, deserialize_with = "deserialize_date_obtained")]
    date_obtained: Option<NaiveDate>,
    #[serde(default)]
    privacy: Privacy,
    #[serde(default)]
    images: Vec<ImageRef>,
    #[serde(default)]
    likes: BTreeSet<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    date_posted: Option<DateTime<Utc>>,
}

impl TryFrom<ArtefactRecordWire> for ArtefactRecord {
    type Error = String;

    fn try_from(wire: ArtefactRecordWire) -> Result<Self, Self::Error> {
        let created_at = wire
            .date_posted
            .or(wire.created_at)
            .ok_or_else(|| format!("artefact {} has neither datePosted nor createdAt", wire.id))?;

        Ok(Self {
            id: wire.id,
            owner_id: wire.owner_id,
            title: wire.title,
            description: wire.description,
            category: wire.category,
            date_obtained: wire.date_obtained,
            privacy: wire.privacy,
            images: wire.images,
            likes: wire.likes,
            created_at,
        })
    }
}

/// Accepts `YYYY-MM-DD` as sent by the create form, or a full RFC 3339
/// timestamp as stored by the backend, which is truncated to its UTC date.
fn deserialize_date_obtained<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| Some(timestamp.with_timezone(&Utc).date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid dateObtained: {:?}", raw)))
}

impl ArtefactRecord {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.contains(user_id)
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// URL of the cover image, if the artefact has one
    pub fn primary_image_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

/// A comment on an artefact, with the poster's details denormalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "artefactId")]
    pub artefact_id: String,
    #[serde(rename = "posterId")]
    pub author_id: String,
    #[serde(rename = "posterName", default)]
    pub author_name: String,
    #[serde(rename = "posterPic", default)]
    pub author_pic: String,
    pub content: String,
    #[serde(rename = "datePosted")]
    pub posted_at: DateTime<Utc>,
}

/// Subset of a user record shown next to an artefact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "profilePic", default)]
    pub profile_pic: String,
}

/// A notification addressed to the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "refId", default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub seen: bool,
    #[serde(rename = "dateCreated", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Artefact fields entered on the create form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArtefactDraft {
    #[serde(rename = "userId")]
    #[validate(length(min = 1))]
    pub owner_id: String,

    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH),
        custom(function = "validate_not_blank", message = "Title must not be blank")
    )]
    pub title: String,

    #[validate(custom(function = "validate_not_blank", message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = "validate_not_blank", message = "Category is required"))]
    pub category: String,

    #[validate(required(message = "Date obtained is required"))]
    #[serde(default, deserialize_with = "deserialize_date_obtained")]
    pub date_obtained: Option<NaiveDate>,

    pub privacy: Privacy,
}

impl From<&ArtefactRecord> for ArtefactDraft {
    fn from(record: &ArtefactRecord) -> Self {
        Self {
            owner_id: record.owner_id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            date_obtained: record.date_obtained,
            privacy: record.privacy,
        }
    }
}

/// Body of `POST /artefacts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewArtefact {
    #[serde(flatten)]
    pub draft: ArtefactDraft,
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

/// Body of `PUT /artefacts/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtefactChanges {
    pub title: String,
    pub description: String,
    pub category: String,
    pub date_obtained: Option<NaiveDate>,
    pub privacy: Privacy,
    pub images: Vec<ImageRef>,
}

impl ArtefactChanges {
    /// Editable fields of `record`, pointing at `image_url` as its only image
    pub fn from_record(record: &ArtefactRecord, image_url: String) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            date_obtained: record.date_obtained,
            privacy: record.privacy,
            images: vec![ImageRef::new(image_url)],
        }
    }
}

/// Body of `POST /artefacts/{id}/comments`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[validate(length(min = 1))]
    pub author_id: String,

    #[validate(
        length(max = MAX_COMMENT_LENGTH),
        custom(function = "validate_not_blank", message = "Comment must not be empty")
    )]
    pub content: String,
}

fn validate_not_blank(value: &str) -> std::result::Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
