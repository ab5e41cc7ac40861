//! Property tests for pagination math.

use proptest::prelude::*;

use super::{PageRequest, PageResponse};

#[test]
fn default_is_first_page() {
    let req = PageRequest::default();
    assert_eq!(req.page, 1);
    assert_eq!(req.per_page, 15);
    assert_eq!(req.offset(), 0);
}

#[test]
fn clamped_bounds_out_of_range_values() {
    let req = PageRequest {
        page: 0,
        per_page: 10_000,
    }
    .clamped();
    assert_eq!(req.page, 1);
    assert_eq!(req.per_page, 100);

    let req = PageRequest { page: 3, per_page: 0 }.clamped();
    assert_eq!(req.per_page, 1);
}

#[test]
fn empty_result_still_has_one_page() {
    let resp: PageResponse<u8> = PageResponse::new(vec![], 1, 15, 0);
    assert_eq!(resp.meta.total_pages, 1);
    assert!(resp.data.is_empty());
}

proptest! {
    /// Offset never overflows and always lands on a page boundary.
    #[test]
    fn prop_offset_is_page_boundary(page in 1u32..10_000, per_page in 1u32..=100) {
        let req = PageRequest { page, per_page };
        prop_assert_eq!(req.offset() % u64::from(per_page), 0);
        prop_assert_eq!(req.offset(), u64::from(page - 1) * u64::from(per_page));
    }

    /// total_pages is the smallest page count that covers every item.
    #[test]
    fn prop_total_pages_covers_total(total in 0u64..1_000_000, per_page in 1u32..=100) {
        let resp: PageResponse<u8> = PageResponse::new(vec![], 1, per_page, total);
        let pages = u64::from(resp.meta.total_pages);
        prop_assert!(pages * u64::from(per_page) >= total);
        if total > 0 {
            prop_assert!((pages - 1) * u64::from(per_page) < total);
        }
    }
}
