use super::{Category, ListingItem, ListingPage, Purity, WallpaperId};
use crate::{
    error::ExtractError,
    utils::{self, DEFAULT_COUNT},
};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const E: &str = "Invalid selector";
lazy_static! {
    static ref CONTAINER: Selector =
        Selector::parse("#thumbs, section.thumb-listing-page").expect(E);
    static ref THUMB: Selector = Selector::parse("figure.thumb").expect(E);
    static ref IMG: Selector = Selector::parse("img").expect(E);
    static ref RESOLUTION: Selector = Selector::parse("div.thumb-info span.wall-res").expect(E);
    static ref FAVORITES: Selector = Selector::parse("div.thumb-info a.wall-favs").expect(E);
    static ref PREVIEW: Selector = Selector::parse("a.preview").expect(E);
    static ref PAGE_HEADER: Selector =
        Selector::parse("header.thumb-listing-page-header h2").expect(E);
}

const PURITY_MARKERS: &[(&str, Purity)] = &[
    ("thumb-sfw", Purity::Sfw),
    ("thumb-sketchy", Purity::Sketchy),
    ("thumb-nsfw", Purity::Nsfw),
];

const CATEGORY_MARKERS: &[(&str, Category)] = &[
    ("thumb-anime", Category::Anime),
    ("thumb-people", Category::People),
    ("thumb-general", Category::General),
];

/// Extracts the thumbnail cards and pagination of a search or uploads page.
pub fn extract_listing(doc: &Html) -> Result<ListingPage, ExtractError> {
    let mut thumbs = doc.select(&THUMB).peekable();
    if thumbs.peek().is_none() && doc.select(&CONTAINER).next().is_none() {
        return Err(ExtractError::MissingFragment("#thumbs"));
    }

    let results: Vec<_> = thumbs.filter_map(|el| extract_item(&el)).collect();

    let (current_page, total_pages) = doc
        .select(&PAGE_HEADER)
        .next()
        .map(|h2| utils::parse_pagination(&utils::text_of(&h2)))
        .unwrap_or((utils::DEFAULT_PAGE, utils::DEFAULT_PAGE));

    debug!(
        "Extracted {} thumbnails, page {} / {}",
        results.len(),
        current_page,
        total_pages
    );

    Ok(ListingPage {
        current_page,
        total_pages,
        is_last_page: current_page == total_pages,
        results,
    })
}

fn extract_item(el: &ElementRef) -> Option<ListingItem> {
    let id = match el.value().attr("data-wallpaper-id") {
        Some(raw) => match raw.parse::<WallpaperId>() {
            Ok(id) => id,
            Err(e) => {
                warn!("Skip thumbnail: {}", e);
                return None;
            }
        },
        None => {
            warn!("Skip thumbnail without wallpaper id");
            return None;
        }
    };

    let thumbnail_url = el
        .select(&IMG)
        .next()
        .and_then(|img| img.value().attr("data-src").or_else(|| img.value().attr("src")))
        .map(ToString::to_string)
        .unwrap_or_default();

    let (width, height) = utils::parse_resolution(
        &utils::select_text(el, &RESOLUTION).unwrap_or_default(),
    );

    let favorites = utils::select_text(el, &FAVORITES)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_COUNT);

    Some(ListingItem {
        id,
        thumbnail_url,
        purity: utils::lookup_class(el, PURITY_MARKERS, Purity::Unknown),
        category: utils::lookup_class(el, CATEGORY_MARKERS, Category::Unknown),
        width,
        height,
        favorites,
        link: utils::select_attr(el, &PREVIEW, "href").unwrap_or_default(),
    })
}
