//! Click classification
//!
//! Turns whatever was clicked into a [`ClickTarget`]. The DOM lookup is
//! WASM-only; the decision itself works on plain strings.

use crate::sim::ClickTarget;

/// The parts of a clicked element that decide dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetInfo {
    /// `className` of the clicked element
    pub class_name: String,
    /// `nodeName` of the clicked element (upper case in HTML documents)
    pub node_name: String,
    /// `className` of the parent element
    pub parent_class: String,
    /// `data-index` of the parent element
    pub parent_index: Option<String>,
}

fn has_class(class_name: &str, class: &str) -> bool {
    class_name.split_whitespace().any(|c| c == class)
}

/// Card faces inside a face-down `.card` flip it; an enabled button starts
/// the game; everything else is ignored.
pub fn classify(target: &TargetInfo) -> ClickTarget {
    let is_face = has_class(&target.class_name, "card-front") || has_class(&target.class_name, "card-back");
    if is_face
        && has_class(&target.parent_class, "card")
        && !has_class(&target.parent_class, "flipped")
    {
        if let Some(index) = target
            .parent_index
            .as_deref()
            .and_then(|raw| raw.parse::<usize>().ok())
        {
            return ClickTarget::Card(index);
        }
    }

    if target.node_name.eq_ignore_ascii_case("button") && !has_class(&target.class_name, "disabled") {
        return ClickTarget::Start;
    }

    ClickTarget::Other
}

/// Read the dispatch-relevant parts of an event target (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn describe(target: &web_sys::Element) -> TargetInfo {
    let parent = target.parent_element();
    TargetInfo {
        class_name: target.class_name(),
        node_name: target.node_name(),
        parent_class: parent.as_ref().map(|p| p.class_name()).unwrap_or_default(),
        parent_index: parent.and_then(|p| p.get_attribute("data-index")),
    }
}
