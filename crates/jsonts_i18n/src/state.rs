use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::label::Label;
use crate::locale::Language;
use crate::table::MessageTable;

type Observer = Arc<dyn Fn(Language) + Send + Sync>;

/// Handle returned by [`I18n::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Localization resolver: the active language plus key lookup.
///
/// Each instance owns its active language and observers; construct one per
/// UI tree (or per test) and pass it to whatever renders text. The message
/// table is shared.
pub struct I18n {
    table: Arc<MessageTable>,
    current: RwLock<Language>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
    /// Bumped on every language change, under the `current` write lock.
    generation: AtomicU64,
}

impl I18n {
    /// A resolver over `table`, starting in the primary language.
    pub fn new(table: Arc<MessageTable>) -> Self {
        Self::with_language(table, Language::PRIMARY)
    }

    /// A resolver over `table`, starting in `lang`.
    pub fn with_language(table: Arc<MessageTable>, lang: Language) -> Self {
        Self {
            table,
            current: RwLock::new(lang),
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    /// A resolver over the embedded catalogs.
    pub fn builtin() -> Self {
        Self::new(MessageTable::shared_builtin())
    }

    pub fn table(&self) -> &MessageTable {
        &self.table
    }

    /// The active language.
    pub fn current_lang(&self) -> Language {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the active language and notify observers.
    ///
    /// Setting the language that is already active does nothing.
    pub fn set_language(&self, lang: Language) {
        let mut cur = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if *cur == lang {
            return;
        }
        debug!("I18n::set_language: {} -> {}", *cur, lang);
        *cur = lang;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        drop(cur);

        self.notify(generation);
    }

    /// Translate a dotted key path in the active language.
    ///
    /// Falls back to returning `key` unchanged when it does not resolve to a
    /// non-empty string.
    pub fn t(&self, key: &str) -> String {
        let lang = self.current_lang();
        match self.table.lookup(lang, key) {
            Some(s) => s.to_string(),
            None => {
                trace!(key, language = %lang, "unresolved message key");
                key.to_string()
            }
        }
    }

    pub fn resolve_label(&self, label: &Label) -> String {
        match label {
            Label::Raw(s) => s.clone(),
            Label::Key(k) => self.t(k),
        }
    }

    /// Register a callback run after every change of the active language.
    ///
    /// Callbacks run synchronously on the thread calling
    /// [`set_language`](Self::set_language), in registration order, and receive
    /// the language active when they are called. A change made while callbacks
    /// are running (from a callback or another thread) supersedes the pending
    /// notifications, so the last value an observer sees is the active one.
    pub fn subscribe(&self, callback: impl Fn(Language) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    fn notify(&self, generation: u64) {
        // Snapshot so callbacks may call back into this resolver.
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for cb in observers {
            let cur = self.current.read().unwrap_or_else(PoisonError::into_inner);
            if self.generation.load(Ordering::SeqCst) != generation {
                // A newer change notifies everyone itself.
                return;
            }
            let lang = *cur;
            drop(cur);
            cb(lang);
        }
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("current", &self.current_lang())
            .finish_non_exhaustive()
    }
}
