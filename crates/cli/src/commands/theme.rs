//! Theme preference commands.

use highflight_core::Theme;
use highflight_storefront::PageState;

#[allow(clippy::print_stdout)]
pub fn show(page: &PageState) {
    println!("{}", page.preferences().theme());
}

#[allow(clippy::print_stdout)]
pub fn toggle(page: &PageState) {
    println!("{}", page.preferences().toggle_theme());
}

pub fn set(page: &PageState, theme: Theme) {
    page.preferences().set_theme(theme);
    show(page);
}
