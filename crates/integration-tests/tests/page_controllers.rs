//! Integration tests for several page controllers sharing one backend.

use std::sync::Arc;

use highflight_core::Theme;
use highflight_integration_tests::{config_for, open_page};
use highflight_storefront::compare::CompareToggle;
use highflight_storefront::notify::{NoticeLevel, NoticeQueue};
use highflight_storefront::{KeyValueStore, MemoryStore, PageState, StoreConfig};
use rust_decimal::Decimal;

#[test]
fn test_pages_with_same_namespace_share_state() {
    let storage = Arc::new(MemoryStore::new());

    let mut menu = open_page(&storage);
    menu.favorites_mut().toggle("paella");
    menu.cart_mut().add_item("paella", "Paella", Decimal::TEN).unwrap();

    // A second page loads after the first has written.
    let hotels = open_page(&storage);
    assert!(hotels.favorites().contains("paella"));
    assert_eq!(hotels.cart().item_count(), 1);
}

#[test]
fn test_pages_with_different_namespaces_are_isolated() {
    let storage = Arc::new(MemoryStore::new());

    let mut menu = PageState::open(config_for("menu"), storage.clone(), None);
    menu.favorites_mut().toggle("x");

    let offers = PageState::open(config_for("offers"), storage.clone(), None);
    assert!(offers.favorites().is_empty());
    assert_eq!(storage.get("menu-favorites").unwrap().as_deref(), Some(r#"["x"]"#));
}

#[test]
fn test_favorites_scenarios() {
    let storage = Arc::new(MemoryStore::with_entries([("highflight-favorites", r#"["x","y"]"#)]));
    let page = open_page(&storage);
    let ids: Vec<&str> = page.favorites().ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["x", "y"]);

    let broken = Arc::new(MemoryStore::with_entries([("highflight-favorites", "{not json")]));
    let page = open_page(&broken);
    assert!(page.favorites().is_empty());
}

#[test]
fn test_theme_is_global_per_namespace() {
    let storage = Arc::new(MemoryStore::new());
    let first = open_page(&storage);
    assert_eq!(first.preferences().toggle_theme(), Theme::Dark);

    let second = open_page(&storage);
    assert_eq!(second.preferences().theme(), Theme::Dark);
}

#[test]
fn test_compare_limit_from_config() {
    let storage = Arc::new(MemoryStore::new());
    let config = StoreConfig {
        compare_limit: 2,
        ..StoreConfig::default()
    };
    let mut page = PageState::open(config, storage, None);

    assert_eq!(page.compare_mut().toggle("a"), CompareToggle::Added);
    assert_eq!(page.compare_mut().toggle("b"), CompareToggle::Added);
    assert_eq!(page.compare_mut().toggle("c"), CompareToggle::Full);
}

#[test]
fn test_render_adapter_sees_every_change() {
    let queue = Arc::new(NoticeQueue::new());
    let mut page = PageState::open(
        StoreConfig::default(),
        Arc::new(MemoryStore::new()),
        Some(queue.clone()),
    );

    page.cart_mut().add_item("a", "Arepa", Decimal::ONE).unwrap();
    page.cart_mut().update_quantity("a", 4);
    page.cart_mut().clear();
    assert_eq!(queue.cart_changes(), 3);

    assert_eq!(page.cart_mut().confirm_order(None).ok(), None);
    let levels: Vec<NoticeLevel> = queue.drain().into_iter().map(|n| n.level).collect();
    assert_eq!(
        levels,
        [NoticeLevel::Success, NoticeLevel::Info, NoticeLevel::Warning]
    );
}
