//! Reactive filter engine.
//!
//! [`FilterEngine`] owns a post collection and a [`FilterState`] and keeps a
//! [`FilteredResult`] in sync with them. Every mutating method recomputes the
//! result and publishes it before returning, so consumers never observe a
//! half-applied change.
//!
//! Results are published through two typed channels:
//!
//! - synchronous observers registered with [`FilterEngine::subscribe`];
//! - a [`tokio::sync::watch`] receiver from [`FilterEngine::watch`], which
//!   always holds the latest result and never queues stale ones.
//!
//! A change that leaves the inputs as they were (setting the same search
//! term, replacing the posts with an equal collection) publishes nothing.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use post_filter_rs::{FilterEngine, Post};
//!
//! let mut engine = FilterEngine::new(vec![
//!     Post::new("Go Basics").with_tags(["go", "backend"]),
//!     Post::new("Rust Guide").with_tags(["rust", "systems"]),
//! ]);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! engine.subscribe(move |result| sink.borrow_mut().push(result.titles()));
//!
//! engine.toggle_tag("go");
//! engine.set_search_term("guide");
//!
//! let seen = seen.borrow();
//! assert_eq!(seen.len(), 3); // initial result, then one per change
//! assert_eq!(seen[1], vec!["Go Basics"]);
//! assert!(seen[2].is_empty());
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::filter::{FilterState, PostFilter};
use crate::model::Post;
use crate::tags::TagUniverse;

/// The posts matching the engine's inputs at a given revision.
///
/// Each result is complete: consumers should replace whatever they displayed
/// before with `posts`, not merge it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredResult {
    /// Incremented on every recomputation. The initial result has revision 0.
    pub revision: u64,

    /// Matching posts in their original relative order.
    pub posts: Vec<Post>,

    /// Size of the collection the result was computed from.
    pub total: usize,
}

impl FilteredResult {
    /// Number of matching posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Returns true if no post matched.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Titles of the matching posts, in order.
    pub fn titles(&self) -> Vec<String> {
        self.posts.iter().map(|p| p.title.clone()).collect()
    }
}

/// Handle returned by [`FilterEngine::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&FilteredResult)>;

/// A batch of input changes applied by [`FilterEngine::update`].
///
/// All changes made through one `EngineUpdate` produce at most one
/// recomputation, after the closure returns.
pub struct EngineUpdate<'a> {
    state: &'a mut FilterState,
    posts: &'a mut Vec<Post>,
    posts_changed: bool,
}

impl EngineUpdate<'_> {
    /// The filter state as modified so far in this batch.
    pub fn state(&self) -> &FilterState {
        self.state
    }

    /// Replaces the search term. Returns true if the value changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        self.state.set_search_term(term)
    }

    /// Toggles a tag. Returns true if the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.state.toggle_tag(tag)
    }

    /// Deselects every tag. Returns true if anything was selected.
    pub fn clear_tags(&mut self) -> bool {
        self.state.clear_tags()
    }

    /// Replaces the post collection. Returns true if it differs from the
    /// current one.
    pub fn set_posts(&mut self, posts: Vec<Post>) -> bool {
        if *self.posts == posts {
            return false;
        }
        *self.posts = posts;
        self.posts_changed = true;
        true
    }
}

/// Keeps a filtered view of a post collection up to date.
///
/// The engine is single-threaded: observers are plain `FnMut` closures and
/// run synchronously inside the mutating call. They receive a shared
/// reference to the result while the engine is mutably borrowed, so an
/// observer cannot modify the engine mid-publication.
pub struct FilterEngine {
    posts: Vec<Post>,
    tag_universe: TagUniverse,
    state: FilterState,
    current: Arc<FilteredResult>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    sender: watch::Sender<Arc<FilteredResult>>,
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("posts", &self.posts.len())
            .field("state", &self.state)
            .field("revision", &self.current.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl FilterEngine {
    /// Creates an engine over the given posts with an empty filter state.
    pub fn new(posts: Vec<Post>) -> Self {
        Self::with_state(posts, FilterState::new())
    }

    /// Creates an engine over the given posts with an initial filter state.
    pub fn with_state(posts: Vec<Post>, state: FilterState) -> Self {
        let tag_universe = TagUniverse::from_posts(&posts);
        let current = Arc::new(compute(&posts, &state, 0));
        let (sender, _) = watch::channel(Arc::clone(&current));

        debug!(
            total = current.total,
            matched = current.len(),
            tags = tag_universe.len(),
            "filter engine initialized"
        );

        Self {
            posts,
            tag_universe,
            state,
            current,
            observers: Vec::new(),
            next_subscription: 0,
            sender,
        }
    }

    /// The full post collection.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The current filter state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// The distinct tags across the full collection.
    pub fn tag_universe(&self) -> &TagUniverse {
        &self.tag_universe
    }

    /// The latest published result.
    pub fn result(&self) -> &FilteredResult {
        &self.current
    }

    /// The latest published result as a shared handle.
    pub fn current(&self) -> Arc<FilteredResult> {
        Arc::clone(&self.current)
    }

    /// Registers an observer.
    ///
    /// The observer is called once immediately with the current result, then
    /// once per recomputation until it is unsubscribed.
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&FilteredResult) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        observer(&self.current);
        self.observers.push((id, Box::new(observer)));
        trace!(subscription = id.0, "observer subscribed");
        id
    }

    /// Removes an observer. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Returns a receiver that always holds the latest result.
    ///
    /// The receiver starts with the current result marked as seen; it is
    /// flagged as changed after each recomputation.
    pub fn watch(&self) -> watch::Receiver<Arc<FilteredResult>> {
        self.sender.subscribe()
    }

    /// Replaces the search term. Returns true if this changed the input.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        self.update(|u| u.set_search_term(term))
    }

    /// Toggles a tag's selection. Returns true if the tag is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.update(|u| u.toggle_tag(tag))
    }

    /// Deselects every tag. Returns true if anything was selected.
    pub fn clear_tags(&mut self) -> bool {
        self.update(|u| u.clear_tags())
    }

    /// Replaces the post collection. Returns true if it differed.
    ///
    /// Selected tags that no new post carries are deselected.
    pub fn set_posts(&mut self, posts: Vec<Post>) -> bool {
        self.update(|u| u.set_posts(posts))
    }

    /// Applies a batch of changes and recomputes at most once.
    ///
    /// The result is recomputed only if the inputs differ from what they were
    /// before the batch, so toggling a tag on and off again within one batch
    /// publishes nothing.
    pub fn update<R>(&mut self, apply: impl FnOnce(&mut EngineUpdate<'_>) -> R) -> R {
        let previous_state = self.state.clone();

        let mut batch = EngineUpdate {
            state: &mut self.state,
            posts: &mut self.posts,
            posts_changed: false,
        };
        let output = apply(&mut batch);
        let posts_changed = batch.posts_changed;

        if posts_changed {
            self.tag_universe = TagUniverse::from_posts(&self.posts);
            let universe = &self.tag_universe;
            if self.state.retain_tags(|tag| universe.contains(tag)) {
                debug!("dropped selected tags missing from the new posts");
            }
        }

        if posts_changed || self.state != previous_state {
            self.recompute();
        } else {
            trace!("input unchanged, skipping recomputation");
        }

        output
    }

    fn recompute(&mut self) {
        let revision = self.current.revision + 1;
        let result = Arc::new(compute(&self.posts, &self.state, revision));

        debug!(
            revision,
            total = result.total,
            matched = result.len(),
            search_term = self.state.search_term(),
            selected_tags = self.state.selected_tags().len(),
            "recomputed filtered posts"
        );

        self.current = Arc::clone(&result);
        for (_, observer) in self.observers.iter_mut() {
            observer(&result);
        }
        self.sender.send_replace(result);
    }
}

fn compute(posts: &[Post], state: &FilterState, revision: u64) -> FilteredResult {
    let matched = PostFilter::new(state)
        .filter_posts(posts)
        .into_iter()
        .cloned()
        .collect();

    FilteredResult {
        revision,
        posts: matched,
        total: posts.len(),
    }
}
