//! Favorites and comparison list commands.

use highflight_storefront::PageState;
use highflight_storefront::compare::{CompareToggle, compare_id_from_title};

use super::CommandError;

#[allow(clippy::print_stdout)]
pub fn list_favorites(page: &PageState) {
    for id in page.favorites().ids() {
        println!("{id}");
    }
}

#[allow(clippy::print_stdout)]
pub fn toggle_favorite(page: &mut PageState, id: &str) {
    if page.favorites_mut().toggle(id) {
        println!("{id} is now a favorite");
    } else {
        println!("{id} is no longer a favorite");
    }
}

#[allow(clippy::print_stdout)]
pub fn list_compare(page: &PageState) {
    let compare = page.compare();
    println!("Comparing {}/{}", compare.len(), compare.limit());
    for id in compare.ids() {
        println!("{id}");
    }
}

/// Toggle a hotel in the comparison list.
///
/// # Errors
///
/// Returns `CommandError::MissingCompareTarget` if neither `id` nor `title`
/// is given.
#[allow(clippy::print_stdout)]
pub fn toggle_compare(
    page: &mut PageState,
    id: Option<&str>,
    title: Option<&str>,
) -> Result<(), CommandError> {
    let id = match (id, title) {
        (Some(id), _) => id.to_owned(),
        (None, Some(title)) => compare_id_from_title(title).into_inner(),
        (None, None) => return Err(CommandError::MissingCompareTarget),
    };

    match page.compare_mut().toggle(&id) {
        CompareToggle::Added => println!("{id} added to comparison"),
        CompareToggle::Removed => println!("{id} removed from comparison"),
        CompareToggle::Full => println!("Comparison list is full"),
    }
    Ok(())
}
