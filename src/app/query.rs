//! Filtered, sorted and paginated projection of the resource store.
//!
//! Everything here is a pure function of the resources and a [`ViewState`];
//! the projection is recomputed whenever either changes and never writes back.

use std::{borrow::Cow, cmp::Ordering, str::FromStr};

use derive_more::Display;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::{
    domain::entity::Resource,
    error::command::CommandError,
};

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[display(fmt = "title")]
    Title,
    #[display(fmt = "description")]
    Description,
    #[display(fmt = "course")]
    CourseCode,
    #[display(fmt = "status")]
    Status,
    #[display(fmt = "likes")]
    Likes,
    #[display(fmt = "dislikes")]
    Dislikes,
}

impl FromStr for SortKey {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" | "resourcetitle" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "course" | "coursecode" => Ok(Self::CourseCode),
            "status" => Ok(Self::Status),
            "likes" => Ok(Self::Likes),
            "dislikes" => Ok(Self::Dislikes),
            _ => Err(CommandError::InvalidArgument {
                name: "field",
                value: s.into(),
            }),
        }
    }
}

#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    #[display(fmt = "asc")]
    Ascending,
    #[display(fmt = "desc")]
    Descending,
}

impl FromStr for SortDirection {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascend" => Ok(Self::Ascending),
            "desc" | "descend" => Ok(Self::Descending),
            _ => Err(CommandError::InvalidArgument {
                name: "direction",
                value: s.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Search, sort and page inputs of the resource table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search: String,
    sort: Option<Sort>,
    page: usize,
    page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PAGE_SIZE_OPTIONS[0])
    }
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// New search text always starts again from the first page.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    pub fn sort_by(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = Some(Sort { key, direction });
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }
}

/// Visible rows plus what a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'r> {
    pub rows: Vec<&'r Resource>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Page<'_> {
    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size)
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Scalar fields of a resource in their display form.
fn scalar_values(resource: &Resource) -> Vec<Cow<'_, str>> {
    let mut values = vec![
        resource.id().as_key(),
        Cow::Borrowed(resource.resource_title().as_str()),
        Cow::Borrowed(resource.description().as_str()),
        Cow::Borrowed(resource.course_code().as_str()),
        Cow::Borrowed(resource.status().as_str()),
        Cow::Owned(resource.likes().to_string()),
        Cow::Owned(resource.dislikes().to_string()),
    ];
    if let Some(instructor) = resource.instructor_id() {
        values.push(instructor.as_key());
    }
    if let Some(reviewer) = resource.reviewer_id() {
        values.push(reviewer.as_key());
    }
    values
}

pub fn matches(resource: &Resource, search: &str) -> bool {
    let needle = search.to_lowercase();
    scalar_values(resource)
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

pub fn filter<'r, I>(resources: I, search: &str) -> Vec<&'r Resource>
where
    I: IntoIterator<Item = &'r Resource>,
{
    resources
        .into_iter()
        .filter(|resource| matches(resource, search))
        .collect()
}

/// Lowercased base letters, accents stripped.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Lowercased letters with their accents kept as combining marks.
fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Locale-style text ordering in three levels: base letters, then accents,
/// then case with lowercase first.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| {
            a.nfd()
                .zip(b.nfd())
                .find_map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) if x != y => Some(Ordering::Less),
                    (false, true) if x != y => Some(Ordering::Greater),
                    _ => None,
                })
                .unwrap_or(Ordering::Equal)
        })
}

fn compare(a: &Resource, b: &Resource, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => collate(a.resource_title(), b.resource_title()),
        SortKey::Description => collate(a.description(), b.description()),
        SortKey::CourseCode => collate(a.course_code(), b.course_code()),
        SortKey::Status => collate(a.status().as_str(), b.status().as_str()),
        SortKey::Likes => a.likes().cmp(&b.likes()),
        SortKey::Dislikes => a.dislikes().cmp(&b.dislikes()),
    }
}

/// Stable in both directions: equal keys keep their relative order.
pub fn sort(rows: &mut [&Resource], sort: Sort) {
    match sort.direction {
        SortDirection::Ascending => rows.sort_by(|a, b| compare(a, b, sort.key)),
        SortDirection::Descending => rows.sort_by(|a, b| compare(b, a, sort.key)),
    }
}

/// 1-based page slice; pages outside the range are empty.
pub fn paginate<T>(rows: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }

    let start = (page - 1).saturating_mul(page_size);
    rows.into_iter().skip(start).take(page_size).collect()
}

pub fn project<'r>(resources: &'r [Resource], view: &ViewState) -> Page<'r> {
    let mut rows = filter(resources, view.search());
    if let Some(order) = view.sort() {
        sort(&mut rows, order);
    }

    let total = rows.len();
    Page {
        rows: paginate(rows, view.page(), view.page_size()),
        page: view.page(),
        page_size: view.page_size(),
        total,
    }
}
