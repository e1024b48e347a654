use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ts_rs::TS;

/// A photo as reported by the folder browser. Read-only to the basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Image {
    /// Absolute path, the unique identifier of the photo
    #[ts(type = "string")]
    pub path: PathBuf,
    /// File name as shown to the user
    pub name: String,
    /// Capture timestamp taken from EXIF, when the browser could read one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<FixedOffset>>,
}

impl Image {
    /// Build an image from a path, using the final path component as its name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        Self {
            path,
            name,
            captured_at: None,
        }
    }
}

/// A photo handed to the basket, optionally with its own label and group.
///
/// Missing fields fall back to the session defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketItem {
    #[ts(type = "string")]
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub captured_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub group_index: Option<u32>,
}

impl BasketItem {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::from(Image::from_path(path))
    }

    /// The entry this item becomes, filling gaps from the defaults.
    pub fn into_entry(self, default_label: &str, default_group: u32) -> BasketEntry {
        let display_name = self.name.unwrap_or_else(|| file_name_of(&self.path));
        BasketEntry {
            path: self.path,
            display_name,
            label: self.label.unwrap_or_else(|| default_label.to_string()),
            group_index: self.group_index.unwrap_or(default_group),
        }
    }
}

impl From<Image> for BasketItem {
    fn from(image: Image) -> Self {
        Self {
            path: image.path,
            name: Some(image.name),
            captured_at: image.captured_at,
            label: None,
            group_index: None,
        }
    }
}

/// One row of the basket. Its position in the basket is its sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketEntry {
    #[ts(type = "string")]
    pub path: PathBuf,
    pub display_name: String,
    pub label: String,
    pub group_index: u32,
}

impl BasketEntry {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>, group_index: u32) -> Self {
        let path = path.into();
        let display_name = file_name_of(&path);
        Self {
            path,
            display_name,
            label: label.into(),
            group_index,
        }
    }

    pub fn from_image(image: &Image, label: impl Into<String>, group_index: u32) -> Self {
        Self {
            path: image.path.clone(),
            display_name: image.name.clone(),
            label: label.into(),
            group_index,
        }
    }

    /// The current on-disk file name, which may differ from `display_name`.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// A rendered target name with its conflict flag. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PreviewRow {
    pub old_name: String,
    pub new_name: String,
    pub conflict: bool,
    #[ts(type = "string")]
    pub old_path: PathBuf,
    #[ts(type = "string")]
    pub new_path: PathBuf,
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
