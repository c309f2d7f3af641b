//! DOM Surface
//!
//! web-sys render backend: one `<details class="aisle-group">` per aisle
//! holding a `<summary>` title and a `<ul>` of checkbox rows. The element
//! handles live in the reconciler's tree, so surviving nodes keep their
//! browser identity (open/close transitions, focus) across renders.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::tree::Surface;

pub struct DomSection {
    details: Element,
    list: Element,
}

pub struct DomRow {
    item: Element,
    checkbox: HtmlInputElement,
}

pub struct DomSurface {
    document: Document,
    container: Element,
    /// Checkbox interaction: (label, checked)
    on_toggle: Rc<dyn Fn(String, bool)>,
    /// `<details>` toggle: (aisle, open)
    on_expand: Rc<dyn Fn(String, bool)>,
}

impl DomSurface {
    pub fn new(
        container: Element,
        on_toggle: Rc<dyn Fn(String, bool)>,
        on_expand: Rc<dyn Fn(String, bool)>,
    ) -> Self {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("document should exist");
        Self {
            document,
            container,
            on_toggle,
            on_expand,
        }
    }

    fn element(&self, tag: &str, class: &str) -> Element {
        let el = self
            .document
            .create_element(tag)
            .expect("document should create element");
        el.set_class_name(class);
        el
    }
}

impl Surface for DomSurface {
    type Section = DomSection;
    type Row = DomRow;

    fn create_section(
        &mut self,
        aisle: &str,
        expanded: bool,
        anchor: Option<&DomSection>,
    ) -> DomSection {
        let details = self.element("details", "aisle-group");
        let _ = details.set_attribute("data-aisle", aisle);
        if expanded {
            let _ = details.set_attribute("open", "");
        }

        let summary = self.element("summary", "aisle-title");
        summary.set_text_content(Some(aisle));
        let _ = details.append_child(&summary);

        let list = self.element("ul", "aisle-list");
        let _ = details.append_child(&list);

        // Report user expand/collapse back to the tracker. The handler only
        // records state; it never requests a render.
        let on_expand = self.on_expand.clone();
        let aisle = aisle.to_string();
        let observed = details.clone();
        let cb = Closure::<dyn FnMut()>::new(move || {
            on_expand(aisle.clone(), observed.has_attribute("open"));
        });
        let _ = details.add_event_listener_with_callback("toggle", cb.as_ref().unchecked_ref());
        cb.forget();

        let _ = self
            .container
            .insert_before(&details, anchor.map(|a| a.details.as_ref()));
        DomSection { details, list }
    }

    fn remove_section(&mut self, section: &DomSection) {
        let _ = self.container.remove_child(&section.details);
    }

    fn set_expanded(&mut self, section: &DomSection, expanded: bool) {
        if expanded {
            let _ = section.details.set_attribute("open", "");
        } else {
            let _ = section.details.remove_attribute("open");
        }
    }

    fn create_row(&mut self, section: &DomSection, label: &str, needed: bool) -> DomRow {
        let item = self.element("li", "item");
        let _ = item.set_attribute("data-label", label);

        let wrapper = self.element("label", "toggle-switch-wrapper");

        let checkbox: HtmlInputElement = self.element("input", "item-checkbox").unchecked_into();
        let _ = checkbox.set_attribute("type", "checkbox");
        checkbox.set_checked(needed);

        let on_toggle = self.on_toggle.clone();
        let label_key = label.to_string();
        let observed = checkbox.clone();
        let cb = Closure::<dyn FnMut()>::new(move || {
            on_toggle(label_key.clone(), observed.checked());
        });
        let _ = checkbox.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
        cb.forget();

        let switch = self.element("span", "toggle-switch");
        let _ = switch.set_attribute("aria-hidden", "true");

        let text = self.element("span", "item-text");
        text.set_text_content(Some(label));

        let _ = wrapper.append_child(&checkbox);
        let _ = wrapper.append_child(&switch);
        let _ = wrapper.append_child(&text);
        let _ = item.append_child(&wrapper);
        let _ = section.list.append_child(&item);

        DomRow { item, checkbox }
    }

    fn remove_row(&mut self, section: &DomSection, row: &DomRow) {
        let _ = section.list.remove_child(&row.item);
    }

    fn set_needed(&mut self, row: &DomRow, needed: bool) {
        row.checkbox.set_checked(needed);
    }
}
