#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount / format_mean ───────────────────────────────

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_pads_cents() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(30)), "$30.00");
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-1042.5)), "-$1,042.50");
}

#[test]
fn test_format_mean() {
    assert_eq!(format_mean(None), "N/A");
    assert_eq!(format_mean(Some(dec!(11.666))), "$11.67");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate() {
    assert_eq!(truncate("Entertainment", 20), "Entertainment");
    assert_eq!(truncate("Entertainment", 6), "Enter…");
    assert_eq!(truncate("anything", 0), "");
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── cycle_option ──────────────────────────────────────────────

fn months() -> Vec<String> {
    vec!["2024-01".into(), "2024-02".into(), "2024-03".into()]
}

#[test]
fn test_cycle_option_forward_from_all() {
    assert_eq!(cycle_option(None, &months(), 1).as_deref(), Some("2024-01"));
}

#[test]
fn test_cycle_option_wraps_to_all() {
    assert_eq!(cycle_option(Some("2024-03"), &months(), 1), None);
    assert_eq!(cycle_option(Some("2024-01"), &months(), -1), None);
}

#[test]
fn test_cycle_option_backward_from_all() {
    assert_eq!(cycle_option(None, &months(), -1).as_deref(), Some("2024-03"));
}

#[test]
fn test_cycle_option_unknown_current_is_all() {
    assert_eq!(
        cycle_option(Some("1999-12"), &months(), 1).as_deref(),
        Some("2024-01")
    );
}

#[test]
fn test_cycle_option_no_options() {
    assert_eq!(cycle_option(None, &[], 1), None);
    assert_eq!(cycle_option(None, &[], -1), None);
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_ends() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
