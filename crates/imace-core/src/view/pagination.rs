use serde::Serialize;

/// Pages shown on either side of the current one.
const WINDOW: u32 = 3;

/// One entry of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Previous { page: u32 },
    Page { page: u32, active: bool },
    Ellipsis,
    Next { page: u32 },
}

/// Pagination window for `page` out of `total_pages`.
///
/// Always lists the first and last page plus `page ± 3`, with an ellipsis
/// standing in for the gap right outside that window. A single page needs
/// no bar, so `total_pages <= 1` yields nothing.
pub fn page_links(page: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut links = Vec::new();
    if page > 1 {
        links.push(PageLink::Previous { page: page - 1 });
    }

    let low = page.saturating_sub(WINDOW);
    let high = page.saturating_add(WINDOW);
    for number in 1..=total_pages {
        if number == 1 || number == total_pages || (low..=high).contains(&number) {
            links.push(PageLink::Page {
                page: number,
                active: number == page,
            });
        } else if (number + WINDOW + 1 == page && number > 1)
            || (number == page.saturating_add(WINDOW + 1) && number < total_pages)
        {
            links.push(PageLink::Ellipsis);
        }
    }

    if page < total_pages {
        links.push(PageLink::Next { page: page + 1 });
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<Option<u32>> {
        links
            .iter()
            .filter_map(|link| match link {
                PageLink::Page { page, .. } => Some(Some(*page)),
                PageLink::Ellipsis => Some(None),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn single_page_has_no_bar() {
        assert!(page_links(1, 1).is_empty());
        assert!(page_links(1, 0).is_empty());
    }

    #[test]
    fn short_range_lists_every_page() {
        let links = page_links(1, 3);
        assert_eq!(numbers(&links), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(links.first(), Some(&PageLink::Page { page: 1, active: true }));
        assert_eq!(links.last(), Some(&PageLink::Next { page: 2 }));
    }

    #[test]
    fn middle_page_gets_ellipses_on_both_sides() {
        let links = page_links(10, 20);
        assert_eq!(
            numbers(&links),
            vec![
                Some(1),
                None,
                Some(7),
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                None,
                Some(20)
            ]
        );
        assert_eq!(links.first(), Some(&PageLink::Previous { page: 9 }));
        assert_eq!(links.last(), Some(&PageLink::Next { page: 11 }));
    }

    #[test]
    fn adjacent_window_needs_no_ellipsis() {
        // page - 4 == 1 is shown as the first page itself.
        let links = page_links(5, 6);
        assert_eq!(
            numbers(&links),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]
        );
    }

    #[test]
    fn last_page_has_no_next_link() {
        let links = page_links(20, 20);
        assert!(!links.iter().any(|l| matches!(l, PageLink::Next { .. })));
        assert_eq!(
            numbers(&links),
            vec![Some(1), None, Some(17), Some(18), Some(19), Some(20)]
        );
    }
}
