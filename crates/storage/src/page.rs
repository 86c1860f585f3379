//! Pagination.

use recollect_core::Record;

/// One page of a collection.
///
/// Page numbers start at 1. `from` is the index of the first record on the
/// page and `to` the index of the last one. A page past the end has no
/// records and `from == to == size`.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub page: usize,
    pub pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub from: usize,
    pub to: usize,
    pub records: Vec<Record>,
}

impl Page {
    /// Cuts page `page` of `page_size` records out of `records`.
    ///
    /// A page size of zero yields zero pages and no records.
    pub fn slice(records: &[Record], page_size: usize, page: usize) -> Self {
        let len = records.len();
        let pages = if page_size == 0 {
            0
        } else {
            len.div_ceil(page_size)
        };
        let end = page_size.saturating_mul(page).min(len);
        let start = page_size.saturating_mul(page.saturating_sub(1)).min(end);

        Self {
            page,
            pages,
            has_previous: page > 1,
            has_next: page_size > 0 && end < len,
            from: start,
            to: end.saturating_sub(1).max(start),
            records: records[start..end].to_vec(),
        }
    }

    /// Returns the number of records on the page.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the page holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recollect_core::json;

    fn records(n: i64) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::try_from(json!({ "id": i })).unwrap())
            .collect()
    }

    #[test]
    fn test_first_page() {
        let all = records(3);
        let page = Page::slice(&all, 2, 1);
        assert_eq!(page.pages, 2);
        assert!(!page.has_previous);
        assert!(page.has_next);
        assert_eq!((page.from, page.to), (0, 1));
        assert_eq!(page.records, all[..2].to_vec());
    }

    #[test]
    fn test_last_partial_page() {
        let all = records(3);
        let page = Page::slice(&all, 2, 2);
        assert!(page.has_previous);
        assert!(!page.has_next);
        assert_eq!((page.from, page.to), (2, 2));
        assert_eq!(page.records, vec![all[2].clone()]);
    }

    #[test]
    fn test_single_record_pages() {
        let all = records(3);
        let page = Page::slice(&all, 1, 2);
        assert_eq!(page.pages, 3);
        assert_eq!((page.from, page.to), (1, 1));
        assert_eq!(page.records, vec![all[1].clone()]);
    }

    #[test]
    fn test_page_past_end() {
        let all = records(3);
        let page = Page::slice(&all, 2, 5);
        assert!(page.is_empty());
        assert!(!page.has_next);
        assert_eq!(page.from, 3);
    }

    #[test]
    fn test_zero_page_size() {
        let page = Page::slice(&records(3), 0, 1);
        assert_eq!(page.pages, 0);
        assert!(page.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_empty_collection() {
        let page = Page::slice(&[], 10, 1);
        assert_eq!(page.pages, 0);
        assert_eq!((page.from, page.to), (0, 0));
        assert!(!page.has_next);
    }
}
