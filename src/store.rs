//! Todo collection store
//!
//! Single source of truth for the list. Every effective mutation notifies
//! subscribers and then writes the whole collection through the repository.
//! Persistence failures are logged and swallowed.

use crate::config::AppConfig;
use crate::persistence::{KeyValueStore, TodoRepository};
use crate::todo::{Todo, TodoId, normalize_text};

/// Hands out strictly increasing todo ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Next id will be `seed + 1`
    pub fn new(seed: u64) -> Self {
        Self { last: seed }
    }

    /// Allocate a new id, `None` once the counter is exhausted
    pub fn next_id(&mut self) -> Option<TodoId> {
        self.last = self.last.checked_add(1)?;
        Some(TodoId(self.last))
    }

    /// Make sure later ids exceed every id in `existing`
    pub fn observe<'a>(&mut self, existing: impl IntoIterator<Item = &'a Todo>) {
        if let Some(max) = existing.into_iter().map(|t| t.id.get()).max() {
            self.last = self.last.max(max);
        }
    }

    pub fn last(&self) -> u64 {
        self.last
    }
}

/// Handle returned by [`TodoStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Todo])>;

pub struct TodoStore<S> {
    todos: Vec<Todo>,
    ids: IdAllocator,
    repo: TodoRepository<S>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    loaded: bool,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Empty, not-yet-loaded store writing to `storage` under the configured key
    pub fn new(storage: S, config: &AppConfig) -> Self {
        let seed = config.id_seed.resolve();
        log::debug!("Todo ids seeded at {}", seed);
        Self {
            todos: Vec::new(),
            ids: IdAllocator::new(seed),
            repo: TodoRepository::new(storage, config.storage_key.clone()),
            listeners: Vec::new(),
            next_subscription: 0,
            loaded: false,
        }
    }

    /// Construct and immediately load persisted todos
    pub fn open(storage: S, config: &AppConfig) -> Self {
        let mut store = Self::new(storage, config);
        store.load();
        store
    }

    /// Replace the in-memory list with whatever is persisted.
    /// Notifies subscribers but does not write back.
    pub fn load(&mut self) {
        self.todos = self.repo.load();
        self.ids.observe(&self.todos);
        log::debug!(
            "Loaded {:?}, next id after {}",
            self.repo.key(),
            self.ids.last()
        );
        self.loaded = true;
        self.notify();
    }

    /// Append a new todo. Blank text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<TodoId> {
        let text = normalize_text(text)?;
        let Some(id) = self.ids.next_id() else {
            log::warn!("Add ignored, todo ids exhausted after {}", self.ids.last());
            return None;
        };
        self.todos.push(Todo::new(id, text));
        log::debug!("Added todo {}", id);
        self.commit();
        Some(id)
    }

    /// Remove the todo with `id`; unknown ids are ignored
    pub fn remove(&mut self, id: TodoId) {
        let Some(index) = self.position(id) else {
            log::debug!("Remove ignored, no todo {}", id);
            return;
        };
        self.todos.remove(index);
        log::debug!("Removed todo {}", id);
        self.commit();
    }

    /// Flip `complete` on the todo with `id`; unknown ids are ignored
    pub fn toggle(&mut self, id: TodoId) {
        let Some(index) = self.position(id) else {
            log::debug!("Toggle ignored, no todo {}", id);
            return;
        };
        self.todos[index] = self.todos[index].toggled();
        log::debug!("Toggled todo {} -> complete={}", id, self.todos[index].complete);
        self.commit();
    }

    /// Register a callback invoked with the full list after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&[Todo]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Todos not yet complete
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.complete).count()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn repository(&self) -> &TodoRepository<S> {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut TodoRepository<S> {
        &mut self.repo
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.todos);
        }
    }

    /// Notify, then persist (best effort)
    fn commit(&mut self) {
        self.notify();
        if let Err(err) = self.repo.save(&self.todos) {
            log::warn!("Failed to save todos: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::consts::STORAGE_KEY;
    use crate::persistence::{MemoryStorage, codec};

    fn store() -> TodoStore<MemoryStorage> {
        TodoStore::open(MemoryStorage::new(), &AppConfig::with_fixed_seed(1000))
    }

    fn persisted(store: &TodoStore<MemoryStorage>) -> Vec<Todo> {
        let raw = store.repository().storage().raw(STORAGE_KEY).unwrap();
        codec::decode(raw).unwrap()
    }

    #[test]
    fn test_id_allocator_increments() {
        let mut ids = IdAllocator::new(10);
        assert_eq!(ids.next_id(), Some(TodoId(11)));
        assert_eq!(ids.next_id(), Some(TodoId(12)));
        assert_eq!(ids.last(), 12);
    }

    #[test]
    fn test_id_allocator_observe_only_raises() {
        let mut ids = IdAllocator::new(100);
        ids.observe(&[Todo::new(TodoId(5), "low")]);
        assert_eq!(ids.next_id(), Some(TodoId(101)));

        ids.observe(&[Todo::new(TodoId(500), "high"), Todo::new(TodoId(7), "x")]);
        assert_eq!(ids.next_id(), Some(TodoId(501)));

        ids.observe(&Vec::<Todo>::new());
        assert_eq!(ids.next_id(), Some(TodoId(502)));
    }

    #[test]
    fn test_id_allocator_exhausted() {
        let mut ids = IdAllocator::new(u64::MAX - 1);
        assert_eq!(ids.next_id(), Some(TodoId(u64::MAX)));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.last(), u64::MAX);
    }

    #[test]
    fn test_add_after_max_stored_id_is_noop() {
        let json = r#"[{"id":18446744073709551615,"text":"x","complete":false}]"#;
        let storage = MemoryStorage::with_item(STORAGE_KEY, json);
        let mut store = TodoStore::open(storage, &AppConfig::with_fixed_seed(0));

        assert_eq!(store.add("next"), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.todos()[0].id, TodoId(u64::MAX));
        assert_eq!(store.repository().storage().write_count(), 0);
    }

    #[test]
    fn test_scenario_buy_milk_walk_dog() {
        let mut store = store();
        assert!(store.is_empty());

        let milk = store.add("Buy milk").unwrap();
        assert_eq!(store.todos(), &[Todo::new(milk, "Buy milk")]);

        store.toggle(milk);
        assert!(store.get(milk).unwrap().complete);

        let dog = store.add("Walk dog").unwrap();
        let texts: Vec<_> = store.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Buy milk", "Walk dog"]);

        store.remove(milk);
        assert_eq!(store.todos(), &[Todo::new(dog, "Walk dog")]);
        assert_eq!(persisted(&store), store.todos());
    }

    #[test]
    fn test_add_trims_text() {
        let mut store = store();
        let id = store.add("   Buy milk  ").unwrap();
        assert_eq!(store.get(id).unwrap().text, "Buy milk");
    }

    #[test]
    fn test_blank_add_is_noop() {
        let mut store = store();
        assert_eq!(store.add(""), None);
        assert_eq!(store.add("   "), None);
        assert_eq!(store.add("\n\t"), None);
        assert!(store.is_empty());
        assert_eq!(store.repository().storage().write_count(), 0);
    }

    #[test]
    fn test_ids_start_after_seed() {
        let mut store = store();
        assert_eq!(store.add("a"), Some(TodoId(1001)));
        assert_eq!(store.add("b"), Some(TodoId(1002)));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut store = store();
        store.add("a");
        store.add("b");
        let before = store.todos().to_vec();
        let writes = store.repository().storage().write_count();

        store.remove(TodoId(1));
        store.toggle(TodoId(1));

        assert_eq!(store.todos(), before.as_slice());
        assert_eq!(store.repository().storage().write_count(), writes);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = store();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let before = store.todos().to_vec();

        store.toggle(b);
        assert!(!store.get(a).unwrap().complete);
        assert!(store.get(b).unwrap().complete);
        assert_eq!(store.active_count(), 1);

        store.toggle(b);
        assert_eq!(store.todos(), before.as_slice());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = store();
        let a = store.add("a").unwrap();
        assert_eq!(persisted(&store), store.todos());
        store.add("b");
        assert_eq!(persisted(&store), store.todos());
        store.toggle(a);
        assert_eq!(persisted(&store), store.todos());
        store.remove(a);
        assert_eq!(persisted(&store), store.todos());
        assert_eq!(store.repository().storage().write_count(), 4);
    }

    #[test]
    fn test_load_restores_and_does_not_write() {
        let json = r#"[{"id":5,"text":"old","complete":true},{"id":9,"text":"older","complete":false}]"#;
        let storage = MemoryStorage::with_item(STORAGE_KEY, json);
        let mut store = TodoStore::new(storage, &AppConfig::with_fixed_seed(0));
        assert!(!store.is_loaded());

        store.load();
        assert!(store.is_loaded());
        assert_eq!(store.len(), 2);
        assert_eq!(store.todos()[0].text, "old");
        assert_eq!(store.repository().storage().write_count(), 0);

        // next id clears the highest stored id even though the seed is lower
        assert_eq!(store.add("new"), Some(TodoId(10)));
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let storage = MemoryStorage::with_item(STORAGE_KEY, "{{{");
        let store = TodoStore::open(storage, &AppConfig::with_fixed_seed(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let mut storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let mut store = TodoStore::open(storage, &AppConfig::with_fixed_seed(0));

        let id = store.add("still works").unwrap();
        store.toggle(id);
        assert_eq!(store.len(), 1);
        assert!(store.get(id).unwrap().complete);
        assert_eq!(store.repository().storage().raw(STORAGE_KEY), None);

        store.repository_mut().storage_mut().set_fail_writes(false);
        store.remove(id);
        assert_eq!(store.repository().storage().raw(STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let mut store = TodoStore::new(MemoryStorage::new(), &AppConfig::with_fixed_seed(0));

        let sink = seen.clone();
        store.subscribe(move |todos| sink.borrow_mut().push(todos.len()));

        store.load();
        let a = store.add("a").unwrap();
        store.add("   ");
        store.add("b");
        store.toggle(a);
        store.remove(TodoId(12345));
        store.remove(a);

        assert_eq!(*seen.borrow(), [0, 1, 2, 2, 1]);
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Rc::new(RefCell::new(0));
        let mut store = store();

        let counter = calls.clone();
        let sub = store.subscribe(move |_| *counter.borrow_mut() += 1);
        store.add("a");
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add("b");

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_listeners_called_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut store = store();
        for tag in ["first", "second"] {
            let order = order.clone();
            store.subscribe(move |_| order.borrow_mut().push(tag));
        }
        store.add("a");
        assert_eq!(*order.borrow(), ["first", "second"]);
    }

    #[test]
    fn test_reopen_sees_previous_session() {
        let mut first = store();
        let a = first.add("carry over").unwrap();
        first.toggle(a);
        let storage = first.repository().storage().clone();

        let mut second = TodoStore::open(storage, &AppConfig::with_fixed_seed(0));
        assert_eq!(second.todos(), first.todos());
        let b = second.add("fresh").unwrap();
        assert!(b > a);
    }
}
