//! Tidy Todos entry point
//!
//! Handles platform-specific initialization and mounts the app.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tidy_todos::consts::ROOT_ELEMENT_ID;
    use tidy_todos::persistence::LocalStorage;
    use tidy_todos::{AppConfig, TodoStore, view};

    pub fn run() {
        console_error_panic_hook::set_once();

        let config = AppConfig::from_page();
        console_log::init_with_level(config.log_level.to_level()).expect("Failed to init logger");

        log::info!("Tidy Todos starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let root = match document.get_element_by_id(ROOT_ELEMENT_ID) {
            Some(root) => root,
            None => {
                log::error!("No #{} element to mount into", ROOT_ELEMENT_ID);
                return;
            }
        };

        let storage = LocalStorage::open();
        log::info!("LocalStorage available: {}", storage.is_available());
        let store = Rc::new(RefCell::new(TodoStore::open(storage, &config)));
        log::info!("Loaded {} todos", store.borrow().len());

        if let Err(err) = view::mount(&document, &root, store) {
            log::error!("Failed to mount view: {:?}", err);
            return;
        }

        log::info!("Tidy Todos running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tidy Todos (native) starting...");
    log::info!("Native mode has no UI - run with `trunk serve` for the web version");

    println!("\nRunning store smoke check...");
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use tidy_todos::{AppConfig, MemoryStorage, TodoStore};

    let config = AppConfig::default();
    let mut store = TodoStore::open(MemoryStorage::new(), &config);
    store.subscribe(|todos| {
        for todo in todos {
            let mark = if todo.complete { 'x' } else { ' ' };
            println!("  [{}] {} ({})", mark, todo.text, todo.id);
        }
        println!("  --");
    });

    let milk = store.add("Buy milk");
    if let Some(id) = milk {
        store.toggle(id);
    }
    store.add("Walk dog");
    if let Some(id) = milk {
        store.remove(id);
    }

    let reopened = TodoStore::open(store.repository().storage().clone(), &config);
    assert_eq!(reopened.todos(), store.todos(), "Reload should match memory");
    println!("✓ Store smoke check passed!");
}
