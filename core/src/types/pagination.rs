use serde::Serialize;

/// Page descriptor returned next to every project listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(limit.max(1));
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1 && total > 0,
        }
    }
}

/// Slices one page out of an already filtered and sorted collection.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();
    let pagination = Pagination::new(page, limit, total);
    let start = (page - 1).saturating_mul(limit);
    let page_items = items.into_iter().skip(start).take(limit).collect();
    (page_items, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_items_with_limit_twelve_split_across_two_pages() {
        let items: Vec<u32> = (0..13).collect();

        let (first, info) = paginate(items.clone(), 1, 12);
        assert_eq!(first.len(), 12);
        assert_eq!(info.total, 13);
        assert_eq!(info.total_pages, 2);
        assert!(info.has_next_page);
        assert!(!info.has_prev_page);

        let (second, info) = paginate(items, 2, 12);
        assert_eq!(second.len(), 1);
        assert!(!info.has_next_page);
        assert!(info.has_prev_page);
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let (items, info) = paginate(Vec::<u32>::new(), 1, 12);
        assert!(items.is_empty());
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_prev_page);
    }

    #[test]
    fn out_of_range_page_yields_empty_slice() {
        let items: Vec<u32> = (0..5).collect();
        let (page_items, info) = paginate(items, 3, 5);
        assert!(page_items.is_empty());
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next_page);
    }
}
