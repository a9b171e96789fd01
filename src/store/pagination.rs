//! Windowing over an ordered listing: page number/size or offset/limit.

use crate::error::StoreError;
use std::collections::HashMap;
use std::ops::Range;

pub const PAGE_NUMBER: &str = "page[number]";
pub const PAGE_SIZE: &str = "page[size]";
pub const PAGE_LIMIT: &str = "page[limit]";
pub const PAGE_OFFSET: &str = "page[offset]";

/// A pagination request in one of the two supported addressing modes.
/// Values are kept as given; negative numbers are normalized when windowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRequest {
    Number { number: i64, size: i64 },
    Offset { limit: i64, offset: i64 },
}

/// One window of a listing plus the size of the whole listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Neighbouring requests for pagination links. `None` means the link is omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageNeighbours {
    pub first: Option<PageRequest>,
    pub prev: Option<PageRequest>,
    pub next: Option<PageRequest>,
    pub last: Option<PageRequest>,
}

impl PageRequest {
    /// Picks the addressing mode from query parameters. Number/size wins when both
    /// are present, then limit/offset; anything else means "no pagination".
    pub fn from_query(params: &HashMap<String, String>) -> Result<Option<Self>, StoreError> {
        if let (Some(number), Some(size)) = (params.get(PAGE_NUMBER), params.get(PAGE_SIZE)) {
            return Ok(Some(PageRequest::Number {
                number: parse_param(PAGE_NUMBER, number)?,
                size: parse_param(PAGE_SIZE, size)?,
            }));
        }
        if let (Some(limit), Some(offset)) = (params.get(PAGE_LIMIT), params.get(PAGE_OFFSET)) {
            return Ok(Some(PageRequest::Offset {
                limit: parse_param(PAGE_LIMIT, limit)?,
                offset: parse_param(PAGE_OFFSET, offset)?,
            }));
        }
        Ok(None)
    }

    /// Index range selected from a listing of `total` items, clamped to `[0, total)`.
    pub fn window(&self, total: usize) -> Range<usize> {
        let (start, len) = match *self {
            PageRequest::Number { number, size } => {
                (size.saturating_mul(number.saturating_sub(1)), size)
            }
            PageRequest::Offset { limit, offset } => (offset, limit),
        };
        let start = start.max(0);
        let end = start.saturating_add(len.max(0));
        clamp(start, total)..clamp(end, total)
    }

    /// Query parameters that reproduce this request.
    pub fn query_pairs(&self) -> [(&'static str, i64); 2] {
        match *self {
            PageRequest::Number { number, size } => [(PAGE_NUMBER, number), (PAGE_SIZE, size)],
            PageRequest::Offset { limit, offset } => [(PAGE_LIMIT, limit), (PAGE_OFFSET, offset)],
        }
    }

    /// Requests for the first/prev/next/last links. Page numbers below 1 are
    /// treated as page 1, the window they select.
    pub fn neighbours(&self, total: usize) -> PageNeighbours {
        let total = i64::try_from(total).unwrap_or(i64::MAX);
        let mut links = PageNeighbours::default();
        match *self {
            PageRequest::Number { number, size } => {
                let page = |number| PageRequest::Number { number, size };
                let number = number.max(1);
                if number > 1 {
                    links.first = Some(page(1));
                    links.prev = Some(page(number - 1));
                }
                if size > 0 {
                    let last = total / size + i64::from(total % size != 0);
                    if number < last {
                        links.next = Some(page(number + 1));
                        links.last = Some(page(last));
                    }
                }
            }
            PageRequest::Offset { limit, offset } => {
                let at = |offset| PageRequest::Offset { limit, offset };
                if offset > 0 {
                    links.first = Some(at(0));
                    links.prev = Some(at(offset.saturating_sub(limit.max(0)).max(0)));
                }
                let next = offset.max(0).saturating_add(limit);
                if limit > 0 && next < total {
                    links.next = Some(at(next));
                    links.last = Some(at(total - limit));
                }
            }
        }
        links
    }
}

/// Applies `request` to an ordered listing. Without a request the whole listing
/// is returned; `total` is always the full listing length.
pub fn paginate<I>(listing: I, request: Option<&PageRequest>) -> Page<I::Item>
where
    I: ExactSizeIterator,
{
    let total = listing.len();
    let items = match request {
        Some(request) => {
            let window = request.window(total);
            listing.skip(window.start).take(window.len()).collect()
        }
        None => listing.collect(),
    };
    Page { total, items }
}

fn parse_param(name: &str, value: &str) -> Result<i64, StoreError> {
    value.trim().parse().map_err(|_| StoreError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn clamp(index: i64, total: usize) -> usize {
    usize::try_from(index).map_or(total, |i| i.min(total))
}
