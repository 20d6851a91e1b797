//! Output formatting for CLI display.

use crate::model::{Listing, ResultSet};

/// Format one venue as an indented block.
pub(super) fn format_listing(listing: &Listing) -> String {
    let mut out = format!("{} ({})", listing.venue_name, listing.slug);
    let availability = &listing.availability;

    if availability.recommended.is_empty() && availability.areas.is_empty() {
        out.push_str("\n  no availability");
        return out;
    }

    if !availability.recommended.is_empty() {
        let slots = availability
            .recommended
            .iter()
            .map(|slot| slot.text.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("\n  recommended: {slots}"));
    }

    for area in &availability.areas {
        let options = if area.options.is_empty() {
            "none".to_string()
        } else {
            area.options
                .iter()
                .map(|option| option.text.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!("\n  {}: {options}", area.id));
    }

    out
}

/// Format all venues followed by a count footer.
pub(super) fn format_results(results: &ResultSet) -> String {
    if results.listings.is_empty() {
        return "No venues found".to_string();
    }

    let mut blocks: Vec<String> = results.listings.iter().map(format_listing).collect();
    blocks.push(format!(
        "{} of {} venues",
        results.listings.len(),
        results.total_count
    ));
    blocks.join("\n\n")
}
