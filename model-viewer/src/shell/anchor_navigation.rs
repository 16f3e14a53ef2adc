use bevy::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Intercepts clicks on `a[href^="#"]` and scrolls the target section into view.
pub struct AnchorNavigationPlugin;

impl Plugin for AnchorNavigationPlugin {
    fn build(&self, _app: &mut App) {
        #[cfg(target_arch = "wasm32")]
        _app.add_systems(Startup, install_anchor_listener);
    }
}

/// Element id a same-page link points at. Bare `#` and non-hash links have none.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn install_anchor_listener() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        warn!("No document available; anchor navigation disabled");
        return;
    };

    let lookup = document.clone();
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(anchor) = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|element| element.closest("a[href^='#']").ok().flatten())
        else {
            return;
        };

        let Some(href) = anchor.get_attribute("href") else {
            return;
        };
        let Some(section) = anchor_target(&href).and_then(|id| lookup.get_element_by_id(id)) else {
            return;
        };

        event.prevent_default();
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }) as Box<dyn FnMut(web_sys::Event)>);

    if let Err(e) =
        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register anchor click listener: {:?}", e);
    }

    // The listener lives as long as the page.
    closure.forget();
    info!("Anchor navigation listener installed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_links_resolve_to_ids() {
        assert_eq!(anchor_target("#features"), Some("features"));
        assert_eq!(anchor_target("#contact-us"), Some("contact-us"));
    }

    #[test]
    fn bare_hash_and_external_links_resolve_to_nothing() {
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target(""), None);
        assert_eq!(anchor_target("https://example.com/#features"), None);
        assert_eq!(anchor_target("/about"), None);
    }
}
