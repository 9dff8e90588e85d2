use super::{Category, ColorEntry, DetailRecord, Purity, Tag, Uploader, WallpaperId};
use crate::{
    color,
    error::ExtractError,
    utils::{self, DEFAULT_COUNT, DEFAULT_TAG_ID},
};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const E: &str = "Invalid selector";
lazy_static! {
    static ref TAG_NAME: Selector = Selector::parse("a.tagname").expect(E);
    static ref TAG_CONTAINER: Selector = Selector::parse("li.tag").expect(E);
    static ref COLOR: Selector = Selector::parse("li.color").expect(E);
    static ref A: Selector = Selector::parse("a").expect(E);
    static ref WALLPAPER: Selector = Selector::parse("img#wallpaper").expect(E);
    static ref DATETIME: Selector = Selector::parse("[datetime]").expect(E);
    static ref PURITY_FORM: Selector = Selector::parse("#wallpaper-purity-form").expect(E);
    static ref SHOWCASE: Selector =
        Selector::parse(r#"div[data-storage-id="showcase-info"] > dl"#).expect(E);
    static ref USERNAME: Selector = Selector::parse("a.username").expect(E);
    static ref AVATAR: Selector = Selector::parse("a.avatar > img").expect(E);
}

const TAG_PURITY_MARKERS: &[(&str, Purity)] = &[
    ("tag-sfw", Purity::Sfw),
    ("tag-sketchy", Purity::Sketchy),
    ("tag-nsfw", Purity::Nsfw),
];

const STYLE_PREFIX: &str = "background-color:";

/// Extracts a wallpaper page. `id` and `link` describe the request that
/// produced `doc` and are copied into the record as is.
pub fn extract_detail(
    doc: &Html,
    id: WallpaperId,
    link: &str,
) -> Result<DetailRecord, ExtractError> {
    let image_url = doc
        .select(&WALLPAPER)
        .next()
        .ok_or(ExtractError::MissingFragment("img#wallpaper"))?
        .value()
        .attr("src")
        .map(utils::with_https)
        .unwrap_or_default();

    let tags = doc.select(&TAG_NAME).map(|a| extract_tag(&a)).collect();
    let colors = doc.select(&COLOR).filter_map(|li| extract_color(&li)).collect();

    let uploaded_on = doc
        .select(&DATETIME)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .map(ToString::to_string)
        .unwrap_or_default();

    let mut category = Category::Unknown;
    let mut views = DEFAULT_COUNT;
    let mut favorites = DEFAULT_COUNT;
    if let Some(dl) = doc.select(&SHOWCASE).next() {
        for dt in dl
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "dt")
        {
            let Some(dd) = next_element(&dt) else {
                continue;
            };
            let value = utils::text_of(&dd);
            match utils::text_of(&dt).as_str() {
                "Category" => {
                    category = value.parse().unwrap_or_else(|_| {
                        debug!("Unknown category {:?}", value);
                        Category::Unknown
                    })
                }
                "Views" => views = utils::parse_count(&value),
                "Favorites" => favorites = utils::parse_count(&value),
                _ => {}
            }
        }
    } else {
        debug!("No showcase info for {}", id);
    }

    let username = doc.select(&USERNAME).next();
    let uploader = Uploader {
        name: username.map(|a| utils::text_of(&a)).unwrap_or_default(),
        profile_link: username
            .and_then(|a| a.value().attr("href"))
            .map(ToString::to_string)
            .unwrap_or_default(),
        avatar_url: doc
            .select(&AVATAR)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(utils::with_https)
            .unwrap_or_default(),
    };

    Ok(DetailRecord {
        id,
        image_url,
        uploaded_on,
        category,
        purity: extract_purity(doc),
        views,
        favorites,
        link: link.to_string(),
        uploader,
        tags,
        colors,
    })
}

fn next_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

fn extract_tag(a: &ElementRef) -> Tag {
    let container = a
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| TAG_CONTAINER.matches(el));

    let (purity, tag_id) = match container {
        Some(li) => (
            utils::lookup_class(&li, TAG_PURITY_MARKERS, Purity::Unknown),
            li.value()
                .attr("data-tag-id")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_TAG_ID),
        ),
        None => (Purity::Unknown, DEFAULT_TAG_ID),
    };

    Tag {
        tag_id,
        name: utils::text_of(a),
        purity,
        link: a.value().attr("href").unwrap_or_default().to_string(),
    }
}

fn extract_color(li: &ElementRef) -> Option<ColorEntry> {
    let style = li.value().attr("style").unwrap_or_default().trim();
    let value = match style.get(..STYLE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(STYLE_PREFIX) => {
            &style[STYLE_PREFIX.len()..]
        }
        _ => style,
    };
    let hex = value.trim().trim_end_matches(';').trim();

    match color::hex_to_rgb(hex) {
        Ok(rgb) => Some(ColorEntry {
            hex: hex.to_string(),
            rgb,
            link: utils::select_attr(li, &A, "href").unwrap_or_default(),
        }),
        Err(e) => {
            warn!("Skip color swatch {:?}: {}", style, e);
            None
        }
    }
}

/// The label in front of the checked radio of the purity form.
fn extract_purity(doc: &Html) -> Purity {
    let Some(form) = doc.select(&PURITY_FORM).next() else {
        return Purity::Unknown;
    };

    let checked_label = form
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "label")
        .find(|label| {
            next_element(label).map_or(false, |input| {
                input.value().name() == "input" && input.value().attr("checked").is_some()
            })
        });

    checked_label
        .and_then(|label| utils::text_of(&label).parse().ok())
        .unwrap_or(Purity::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use pretty_assertions::assert_eq;
    use std::fs;

    const LINK: &str = "https://alpha.wallhaven.cc/wallpaper/109603";

    fn load(path: &str) -> Html {
        let html = fs::read_to_string(path).expect("Invalid file path");
        Html::parse_document(&html)
    }

    #[test]
    fn test_parsing_detail_page() {
        let doc = load("tests/htmls/detail.html");
        let record = extract_detail(&doc, WallpaperId(109603), LINK).expect("Detail record");

        let expected = DetailRecord {
            id: WallpaperId(109603),
            image_url: "https://w.wallhaven.cc/full/10/wallhaven-109603.jpg".to_string(),
            uploaded_on: "2018-01-04T19:39:01+00:00".to_string(),
            category: Category::General,
            purity: Purity::Sketchy,
            views: 48_211,
            favorites: 1234,
            link: LINK.to_string(),
            uploader: Uploader {
                name: "Gandalf".to_string(),
                profile_link: "https://alpha.wallhaven.cc/user/Gandalf".to_string(),
                avatar_url: "https://static.wallhaven.cc/images/user/avatar/32/1_1.png"
                    .to_string(),
            },
            tags: vec![
                Tag {
                    tag_id: 37,
                    name: "nature".to_string(),
                    purity: Purity::Sfw,
                    link: "https://alpha.wallhaven.cc/tag/37".to_string(),
                },
                Tag {
                    tag_id: 711,
                    name: "landscape".to_string(),
                    purity: Purity::Sketchy,
                    link: "https://alpha.wallhaven.cc/tag/711".to_string(),
                },
                Tag {
                    tag_id: 0,
                    name: "mountains".to_string(),
                    purity: Purity::Unknown,
                    link: "https://alpha.wallhaven.cc/tag/1024".to_string(),
                },
            ],
            colors: vec![
                ColorEntry {
                    hex: "#663300".to_string(),
                    rgb: Rgb {
                        r: 102,
                        g: 51,
                        b: 0,
                    },
                    link: "https://alpha.wallhaven.cc/search?colors=663300".to_string(),
                },
                ColorEntry {
                    hex: "#fff".to_string(),
                    rgb: Rgb {
                        r: 255,
                        g: 255,
                        b: 255,
                    },
                    link: "https://alpha.wallhaven.cc/search?colors=ffffff".to_string(),
                },
            ],
        };
        assert_eq!(record, expected);
    }

    #[test]
    fn test_sparse_detail_page_degrades() {
        let html = r#"
            <html><body>
              <img id="wallpaper" src="https://w.wallhaven.cc/full/1.png">
              <div data-storage-id="showcase-info">
                <dl>
                  <dt>Category</dt><dd>Wallpapers</dd>
                  <dt>Views</dt><dd>many</dd>
                  <dt>Favorites</dt><dd>1,234</dd>
                </dl>
              </div>
              <a class="username" href="/user/anon">anon</a>
            </body></html>"#;
        let record = extract_detail(&Html::parse_document(html), WallpaperId(1), "link")
            .expect("Detail record");

        assert_eq!(record.image_url, "https://w.wallhaven.cc/full/1.png");
        assert_eq!(record.uploaded_on, "");
        assert_eq!(record.category, Category::Unknown);
        assert_eq!(record.purity, Purity::Unknown);
        assert_eq!(record.views, 0);
        assert_eq!(record.favorites, 1234);
        assert_eq!(record.uploader.name, "anon");
        assert_eq!(record.uploader.avatar_url, "");
        assert!(record.tags.is_empty());
        assert!(record.colors.is_empty());
    }

    #[test]
    fn test_malformed_swatch_is_skipped() {
        let html = r#"
            <img id="wallpaper" src="//w.wallhaven.cc/full/2.png">
            <ul>
              <li class="color" style="background-color:#zz0000"><a href="/bad"></a></li>
              <li class="color" style="background-color: #000000;"><a href="/black"></a></li>
            </ul>"#;
        let record = extract_detail(&Html::parse_document(html), WallpaperId(2), "link")
            .expect("Detail record");

        assert_eq!(record.image_url, "https://w.wallhaven.cc/full/2.png");
        assert_eq!(
            record.colors,
            vec![ColorEntry {
                hex: "#000000".to_string(),
                rgb: Rgb { r: 0, g: 0, b: 0 },
                link: "/black".to_string(),
            }]
        );
    }

    #[test]
    fn test_style_prefix_is_case_insensitive() {
        let html = r#"
            <img id="wallpaper" src="https://w.wallhaven.cc/full/4.png">
            <ul>
              <li class="color" style="BACKGROUND-COLOR: #abc"><a href="/abc"></a></li>
              <li class="color" style="Background-Color:#102030;"><a href="/102030"></a></li>
            </ul>"#;
        let record = extract_detail(&Html::parse_document(html), WallpaperId(4), "link")
            .expect("Detail record");

        assert_eq!(
            record.colors,
            vec![
                ColorEntry {
                    hex: "#abc".to_string(),
                    rgb: Rgb {
                        r: 0xaa,
                        g: 0xbb,
                        b: 0xcc
                    },
                    link: "/abc".to_string(),
                },
                ColorEntry {
                    hex: "#102030".to_string(),
                    rgb: Rgb {
                        r: 0x10,
                        g: 0x20,
                        b: 0x30
                    },
                    link: "/102030".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_tag_outside_container_is_unknown() {
        let html = r#"
            <img id="wallpaper" src="https://w.wallhaven.cc/full/5.png">
            <ul>
              <li class="tag-sfw" data-tag-id="9"><a class="tagname" href="/tag/9">loose</a></li>
            </ul>"#;
        let record = extract_detail(&Html::parse_document(html), WallpaperId(5), "link")
            .expect("Detail record");

        assert_eq!(
            record.tags,
            vec![Tag {
                tag_id: 0,
                name: "loose".to_string(),
                purity: Purity::Unknown,
                link: "/tag/9".to_string(),
            }]
        );
    }

    #[test]
    fn test_purity_form_without_known_choice() {
        let unchecked = r#"
            <img id="wallpaper" src="https://w.wallhaven.cc/full/6.png">
            <form id="wallpaper-purity-form">
              <label>SFW</label><input type="radio" name="purity" value="sfw">
              <label>NSFW</label><input type="radio" name="purity" value="nsfw">
            </form>"#;
        let record = extract_detail(&Html::parse_document(unchecked), WallpaperId(6), "link")
            .expect("Detail record");
        assert_eq!(record.purity, Purity::Unknown);

        let unlabelled = r#"
            <img id="wallpaper" src="https://w.wallhaven.cc/full/7.png">
            <form id="wallpaper-purity-form">
              <label>SFW</label><input type="radio" name="purity" value="sfw">
              <label>Everything</label><input type="radio" name="purity" value="all" checked>
            </form>"#;
        let record = extract_detail(&Html::parse_document(unlabelled), WallpaperId(7), "link")
            .expect("Detail record");
        assert_eq!(record.purity, Purity::Unknown);
    }

    #[test]
    fn test_showcase_label_without_value() {
        let html = r#"
            <img id="wallpaper" src="https://w.wallhaven.cc/full/8.png">
            <div data-storage-id="showcase-info">
              <dl>
                <dt>Views</dt>
                <dt>Favorites</dt><dd>1,234</dd>
              </dl>
            </div>"#;
        let record = extract_detail(&Html::parse_document(html), WallpaperId(8), "link")
            .expect("Detail record");

        // the next element of `Views` is the `Favorites` label
        assert_eq!(record.views, 0);
        assert_eq!(record.favorites, 1234);
    }

    #[test]
    fn test_missing_wallpaper_is_error() {
        let doc = Html::parse_document("<html><body><a class=\"tagname\">x</a></body></html>");
        assert!(matches!(
            extract_detail(&doc, WallpaperId(3), "link"),
            Err(ExtractError::MissingFragment("img#wallpaper"))
        ));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let doc = load("tests/htmls/detail.html");
        let first = extract_detail(&doc, WallpaperId(109603), LINK).expect("Detail record");
        let second = extract_detail(&doc, WallpaperId(109603), LINK).expect("Detail record");
        assert_eq!(first, second);
    }
}
