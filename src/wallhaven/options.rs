use super::{Category, Purity};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Sorting {
    Relevance,
    Random,
    DateAdded,
    Views,
    Favorites,
    Toplist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Order {
    Desc,
    Asc,
}

/// A single query parameter of a search or uploads request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOption {
    Categories(Vec<Category>),
    Purity(Vec<Purity>),
    Sorting(Sorting),
    Order(Order),
    Page(u32),
    Resolutions(Vec<(u32, u32)>),
    Ratios(Vec<(u32, u32)>),
}

fn bitmask<T: PartialEq>(selected: &[T], order: &[T]) -> String {
    order
        .iter()
        .map(|flag| if selected.contains(flag) { '1' } else { '0' })
        .collect()
}

fn sizes(sizes: &[(u32, u32)]) -> String {
    sizes.iter().map(|(w, h)| format!("{}x{}", w, h)).join(",")
}

impl SearchOption {
    pub fn key(&self) -> &'static str {
        match self {
            SearchOption::Categories(_) => "categories",
            SearchOption::Purity(_) => "purity",
            SearchOption::Sorting(_) => "sorting",
            SearchOption::Order(_) => "order",
            SearchOption::Page(_) => "page",
            SearchOption::Resolutions(_) => "resolutions",
            SearchOption::Ratios(_) => "ratios",
        }
    }

    pub fn value(&self) -> String {
        match self {
            SearchOption::Categories(c) => bitmask(
                c.as_slice(),
                &[Category::General, Category::Anime, Category::People],
            ),
            SearchOption::Purity(p) => bitmask(
                p.as_slice(),
                &[Purity::Sfw, Purity::Sketchy, Purity::Nsfw],
            ),
            SearchOption::Sorting(s) => match s {
                Sorting::Relevance => "relevance",
                Sorting::Random => "random",
                Sorting::DateAdded => "date_added",
                Sorting::Views => "views",
                Sorting::Favorites => "favorites",
                Sorting::Toplist => "toplist",
            }
            .to_string(),
            SearchOption::Order(o) => match o {
                Order::Desc => "desc",
                Order::Asc => "asc",
            }
            .to_string(),
            SearchOption::Page(n) => n.to_string(),
            SearchOption::Resolutions(r) | SearchOption::Ratios(r) => sizes(r),
        }
    }

    /// Uploads pages only honour purity and paging.
    pub(crate) fn applies_to_uploads(&self) -> bool {
        matches!(self, SearchOption::Purity(_) | SearchOption::Page(_))
    }
}
