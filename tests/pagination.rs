use players_terminal::pagination::{
    PAGE_SIZE, Pager, controls_visible, next_page, page_buttons, page_count, page_window,
    prev_page,
};

#[test]
fn page_count_is_ceiling_and_controls_follow_it() {
    for total in 0..=100 {
        assert_eq!(page_count(total), (total + PAGE_SIZE - 1) / PAGE_SIZE);
        assert_eq!(controls_visible(total), total > 8);
    }
    assert_eq!(page_count(0), 0);
}

#[test]
fn windows_tile_the_result_set_in_order() {
    for total in 0..=60 {
        let mut covered = Vec::new();
        for page in 1..=page_count(total) {
            let window = page_window(page, total);
            assert!(window.len() <= PAGE_SIZE);
            assert_eq!(window.start, covered.len());
            covered.extend(window);
        }
        assert_eq!(covered, (0..total).collect::<Vec<_>>());
    }
}

#[test]
fn buttons_are_bounded_and_hold_current_page() {
    for total in 1..=120 {
        for page in 1..=page_count(total) {
            let buttons = page_buttons(page, total);
            assert!(buttons.len() <= 5, "total={total} page={page}");
            assert!(buttons.contains(&page), "total={total} page={page}");
            assert!(buttons.windows(2).all(|w| w[1] == w[0] + 1));
            assert!(buttons.iter().all(|b| *b >= 1 && *b <= page_count(total)));
        }
    }
}

#[test]
fn twenty_items_example() {
    assert_eq!(page_count(20), 3);
    assert_eq!(page_window(1, 20), 0..8);
    assert_eq!(page_window(3, 20), 16..20);
    assert_eq!(page_buttons(1, 20), vec![1, 2, 3]);
}

#[test]
fn prev_is_noop_on_first_page() {
    assert_eq!(prev_page(1), 1);
    assert_eq!(prev_page(2), 1);
    assert_eq!(prev_page(7), 6);
}

#[test]
fn next_is_noop_from_floor_ratio() {
    for total in 0..=80 {
        let floor = total / PAGE_SIZE;
        for page in 1..=page_count(total).max(1) {
            let expected = if page >= floor { page } else { page + 1 };
            assert_eq!(next_page(page, total), expected, "total={total} page={page}");
        }
    }
}

#[test]
fn pager_walks_and_jumps() {
    let mut pager = Pager::new();
    pager.set_total(20);
    assert_eq!(pager.current, 1);
    pager.prev();
    assert_eq!(pager.current, 1);
    pager.next();
    assert_eq!(pager.current, 2);
    pager.next();
    assert_eq!(pager.current, 2);
    assert!(pager.go_to(3));
    assert_eq!(pager.window(), 16..20);
    assert!(!pager.go_to(4));
    assert_eq!(pager.current, 3);
}

#[test]
fn pager_clamps_when_result_set_shrinks() {
    let mut pager = Pager::new();
    pager.set_total(80);
    assert!(pager.go_to(5));
    pager.set_total(12);
    assert_eq!(pager.current, 2);
    pager.set_total(0);
    assert_eq!(pager.current, 1);
    assert_eq!(pager.window(), 0..0);
    assert!(pager.buttons().is_empty());
}
