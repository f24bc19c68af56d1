#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use crate::domain::models::SavedList;
use crate::domain::models::StatusCode;
use crate::domain::services::ListManager;

pub fn format_images(images: &[(StatusCode, String)]) -> String {
    if images.is_empty() {
        return "No matching codes.".to_string();
    }

    return images
        .iter()
        .map(|(code, url)| return format!("- {code} {url}"))
        .collect::<Vec<String>>()
        .join("\n");
}

/// One line per list, marked open (`^`) or closed (`>`).
pub fn format_list_header(list: &SavedList, expanded: bool) -> String {
    let marker = if expanded { "^" } else { ">" };
    let count = list.len();
    let noun = if count == 1 { "code" } else { "codes" };

    return format!("{} ({count} {noun}) {marker}", list.name);
}

pub fn format_list_summary(list: &SavedList) -> String {
    return format!(
        "- (ID: {}) {}, {} codes, Created: {}",
        list.id,
        list.name,
        list.len(),
        list.format_created_at()
    );
}

/// Body of an expanded list. Elements are numbered from 1, which is also the
/// index `lists remove` takes.
pub fn format_list_details(list: &SavedList, editing: bool) -> String {
    let mut lines = vec![format!("Created At: {}", list.format_created_at())];

    if editing {
        lines.push("Pick an image to remove it, or update the name.".to_string());
    }

    if list.is_empty() {
        lines.push("  This list has no images.".to_string());
    }

    let unknown = list.unknown_codes();
    for (idx, (code, url)) in list.entries().iter().enumerate() {
        let n = idx + 1;
        let mut line = format!("  ({n}) {code} {url}");
        if unknown.contains(code) {
            line = format!("{line} [unknown code]");
        }
        lines.push(line);
    }

    if !list.is_consistent() {
        lines.push(format!(
            "  List has {} codes but {} images, extra entries are hidden.",
            list.codes.len(),
            list.image_urls.len()
        ));
    }

    return lines.join("\n");
}

pub fn format_lists(manager: &ListManager) -> String {
    if manager.lists.is_empty() {
        return "You have no saved lists yet.".to_string();
    }

    return manager
        .lists
        .iter()
        .map(|list| {
            let header = format_list_header(list, manager.is_expanded(&list.id));
            if !manager.is_expanded(&list.id) {
                return header;
            }

            let details = format_list_details(list, manager.is_editing(&list.id));
            return format!("{header}\n{details}");
        })
        .collect::<Vec<String>>()
        .join("\n");
}
