//! DOM view (wasm32 only)
//!
//! Builds the page skeleton once, then re-renders the list from store
//! notifications. Item clicks are delegated from the `<ul>` via `data-id`, so
//! rendering never needs a handle on the store.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::persistence::KeyValueStore;
use crate::store::TodoStore;
use crate::todo::{Todo, TodoId};

const LIST_ID: &str = "todo-items";
const INPUT_ID: &str = "new-todo";

/// Render `todos` into the list element
pub fn render_list(document: &Document, list: &Element, todos: &[Todo]) -> Result<(), JsValue> {
    list.set_inner_html("");
    for todo in todos {
        let item = document.create_element("li")?;
        item.set_class_name("todo-item");
        item.set_attribute("data-id", &todo.id.to_string())?;

        let checkbox: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        checkbox.set_type("checkbox");
        checkbox.set_checked(todo.complete);
        checkbox.set_attribute("data-action", "toggle")?;
        item.append_child(&checkbox)?;

        let label = document.create_element("label")?;
        if todo.complete {
            label.set_class_name("complete");
        }
        label.set_text_content(Some(&format!(" {} ", todo.text)));
        item.append_child(&label)?;

        let button = document.create_element("button")?;
        button.set_attribute("data-action", "remove")?;
        button.set_text_content(Some("\u{d7}"));
        item.append_child(&button)?;

        list.append_child(&item)?;
    }
    Ok(())
}

/// Build the page under `root` and wire it to `store`
pub fn mount<S: KeyValueStore + 'static>(
    document: &Document,
    root: &Element,
    store: Rc<RefCell<TodoStore<S>>>,
) -> Result<(), JsValue> {
    root.set_class_name("todo-list");
    root.set_inner_html(&format!(
        r#"<div class="control">
  <h1>Todos</h1>
  <form><input type="text" id="{INPUT_ID}" class="new-todo" placeholder="What needs to be done?"></form>
</div>
<ul id="{LIST_ID}"></ul>"#
    ));

    let list = document
        .get_element_by_id(LIST_ID)
        .ok_or_else(|| JsValue::from_str("todo list element missing"))?;
    let input: HtmlInputElement = document
        .get_element_by_id(INPUT_ID)
        .ok_or_else(|| JsValue::from_str("todo input missing"))?
        .dyn_into()?;
    let form = root
        .query_selector("form")?
        .ok_or_else(|| JsValue::from_str("todo form missing"))?;

    // Re-render on every change
    {
        let document = document.clone();
        let list = list.clone();
        store.borrow_mut().subscribe(move |todos| {
            if let Err(err) = render_list(&document, &list, todos) {
                log::error!("Render failed: {:?}", err);
            }
        });
    }
    render_list(document, &list, store.borrow().todos())?;

    // Submit new todo
    {
        let store = store.clone();
        let input = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            event.prevent_default();
            let added = store.borrow_mut().add(&input.value());
            if added.is_some() {
                input.set_value("");
            }
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Toggle / remove, delegated from the list
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(action) = target.get_attribute("data-action") else {
                return;
            };
            let Some(id) = target
                .closest("li[data-id]")
                .ok()
                .flatten()
                .and_then(|li| li.get_attribute("data-id"))
                .and_then(|raw| raw.parse::<TodoId>().ok())
            else {
                return;
            };

            match (action.as_str(), event.type_().as_str()) {
                ("toggle", "change") => store.borrow_mut().toggle(id),
                ("remove", "click") => store.borrow_mut().remove(id),
                _ => {}
            }
        });
        list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Err(err) = input.focus() {
        log::debug!("Could not focus todo input: {:?}", err);
    }
    Ok(())
}
