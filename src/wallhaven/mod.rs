mod client;
mod detail;
mod listing;
mod options;

pub use client::{WallhavenClient, DEFAULT_BASE_URL};
pub use detail::extract_detail;
pub use listing::extract_listing;
pub use options::{Order, SearchOption, Sorting};

use crate::color::Rgb;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WallpaperId(pub u64);

impl fmt::Display for WallpaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for WallpaperId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(format!("Invalid wallpaper id {:?}", s)),
            Ok(id) => Ok(WallpaperId(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Purity {
    Sfw,
    Sketchy,
    Nsfw,
    #[default]
    Unknown,
}

impl Purity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purity::Sfw => "sfw",
            Purity::Sketchy => "sketchy",
            Purity::Nsfw => "nsfw",
            Purity::Unknown => "unknown",
        }
    }
}

impl FromStr for Purity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sfw" => Ok(Purity::Sfw),
            "sketchy" => Ok(Purity::Sketchy),
            "nsfw" => Ok(Purity::Nsfw),
            _ => Err(format!("Unknown purity {:?}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anime,
    People,
    General,
    #[default]
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Anime => "anime",
            Category::People => "people",
            Category::General => "general",
            Category::Unknown => "unknown",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anime" => Ok(Category::Anime),
            "people" => Ok(Category::People),
            "general" => Ok(Category::General),
            _ => Err(format!("Unknown category {:?}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingPage {
    pub current_page: u32,
    pub total_pages: u32,
    pub is_last_page: bool,
    pub results: Vec<ListingItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingItem {
    pub id: WallpaperId,
    pub thumbnail_url: String,
    pub purity: Purity,
    pub category: Category,
    pub width: u32,
    pub height: u32,
    pub favorites: u64,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uploader {
    pub name: String,
    pub profile_link: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub tag_id: u64,
    pub name: String,
    pub purity: Purity,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    pub hex: String,
    pub rgb: Rgb,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub id: WallpaperId,
    pub image_url: String,
    pub uploaded_on: String,
    pub category: Category,
    pub purity: Purity,
    pub views: u64,
    pub favorites: u64,
    pub link: String,
    pub uploader: Uploader,
    pub tags: Vec<Tag>,
    pub colors: Vec<ColorEntry>,
}

impl DetailRecord {
    pub fn uploaded_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.uploaded_on.trim()).ok()
    }
}

impl fmt::Display for ListingPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Page            : {} / {}{}",
            self.current_page,
            self.total_pages,
            if self.is_last_page { " (last)" } else { "" }
        )?;
        for item in &self.results {
            writeln!(
                f,
                "> {:<10} {:>5}x{:<5} {:<8} {:<8} {:>6} fav  {}",
                item.id,
                item.width,
                item.height,
                item.purity.as_str(),
                item.category.as_str(),
                item.favorites,
                item.link
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DetailRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id              : {}", self.id)?;
        writeln!(f, "Link            : {}", self.link)?;
        writeln!(f, "Image           : {}", self.image_url)?;
        if self.uploaded_on.is_empty() {
            writeln!(f, "Uploaded On     : None")?;
        } else {
            writeln!(f, "Uploaded On     : {}", self.uploaded_on)?;
        }
        writeln!(
            f,
            "Uploader        : {} ({})",
            self.uploader.name, self.uploader.profile_link
        )?;
        writeln!(f, "Category        : {}", self.category.as_str())?;
        writeln!(f, "Purity          : {}", self.purity.as_str())?;
        writeln!(f, "Views           : {}", self.views)?;
        writeln!(f, "Favorites       : {}", self.favorites)?;
        writeln!(
            f,
            "Tags            : {}",
            self.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ")
        )?;
        writeln!(f, "Colors          : ")?;
        for c in &self.colors {
            writeln!(f, "> {} ({})", c.hex, c.rgb)?;
        }

        Ok(())
    }
}
