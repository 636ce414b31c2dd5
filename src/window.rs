use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::rate_limit::RateLimiter;
use crate::state::{normalize_dimension, normalize_pages_padding};
use crate::{
    ConfigError, RateLimitMethod, ScrollAxis, VisibleItemsCallback, WindowMetrics, WindowOptions,
    WindowState,
};

/// A headless windowing engine for infinite-scroll lists and grids.
///
/// The host owns the engine and drives it:
/// - scroll/resize handlers call the `set_*` methods with the current time,
/// - the data-loading side replaces or extends the collection,
/// - a frame or timer tick calls [`ScrollWindow::tick`] so rate-limited commits can land.
///
/// Derived [`WindowMetrics`] are recomputed lazily after any input change. The committed
/// [`ScrollWindow::visible_items`] only changes when the derived slice differs from the
/// previous one by length or item identity, and each change fires the
/// `on_visible_items_changed` callback exactly once.
pub struct ScrollWindow<T> {
    state: WindowState,
    items: Vec<Arc<T>>,

    visible: Vec<Arc<T>>,
    visible_revision: u64,
    evaluations: u64,

    metrics: Cell<Option<WindowMetrics>>,
    limiter: RateLimiter,
    on_visible_items_changed: Option<VisibleItemsCallback<T>>,

    batch_depth: usize,
    batch_trigger_ms: Option<u64>,
    disposed: bool,
}

impl<T> ScrollWindow<T> {
    /// Creates an engine with an empty collection.
    pub fn new(options: WindowOptions<T>) -> Self {
        Self::with_items(options, Vec::new())
    }

    /// Creates an engine over `items` and commits the initial slice without notifying.
    pub fn with_items(options: WindowOptions<T>, items: impl IntoIterator<Item = Arc<T>>) -> Self {
        let state = options.initial_state();
        idebug!(
            axis = state.axis.as_str(),
            pages_padding = state.pages_padding,
            rate_limit_ms = options.rate_limit_ms,
            "ScrollWindow::new"
        );
        let mut w = Self {
            state,
            items: items.into_iter().collect(),
            visible: Vec::new(),
            visible_revision: 0,
            evaluations: 0,
            metrics: Cell::new(None),
            limiter: RateLimiter::new(options.rate_limit_ms, options.rate_limit_method),
            on_visible_items_changed: None,
            batch_depth: 0,
            batch_trigger_ms: None,
            disposed: false,
        };
        w.evaluate_commit();
        w.on_visible_items_changed = options.on_visible_items_changed;
        w
    }

    /// Parses binding-style arguments and creates an engine over `items`.
    pub fn from_binding_args(
        args: &crate::BindingArgs,
        items: impl IntoIterator<Item = Arc<T>>,
    ) -> Result<Self, ConfigError> {
        let options = WindowOptions::from_binding_args(args)?;
        Ok(Self::with_items(options, items))
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn axis(&self) -> ScrollAxis {
        self.state.axis
    }

    pub fn scroll_position(&self) -> i64 {
        self.state.scroll_position
    }

    pub fn scroll_pos_offset(&self) -> i64 {
        self.state.scroll_pos_offset
    }

    pub fn pages_padding(&self) -> f64 {
        self.state.pages_padding
    }

    pub fn viewport_size(&self) -> (i64, i64) {
        (self.state.viewport_width, self.state.viewport_height)
    }

    pub fn item_size(&self) -> (i64, i64) {
        (self.state.item_width, self.state.item_height)
    }

    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current derived metrics, recomputed if any input changed since the last call.
    pub fn metrics(&self) -> WindowMetrics {
        if let Some(m) = self.metrics.get() {
            return m;
        }
        let m = WindowMetrics::compute(&self.state, self.items.len());
        itrace!(
            first_visible = m.first_visible,
            last_hidden = m.last_hidden,
            items_per_page = m.items_per_page,
            "metrics recomputed"
        );
        self.metrics.set(Some(m));
        m
    }

    pub fn first_visible_index(&self) -> usize {
        self.metrics().first_visible
    }

    pub fn last_visible_index(&self) -> usize {
        self.metrics().last_visible
    }

    pub fn first_hidden_index(&self) -> usize {
        self.metrics().first_hidden
    }

    pub fn last_hidden_index(&self) -> usize {
        self.metrics().last_hidden
    }

    pub fn spacer_before(&self) -> f64 {
        self.metrics().spacer_before()
    }

    pub fn spacer_after(&self) -> f64 {
        self.metrics().spacer_after()
    }

    /// The committed slice to mount. Always a prefix of the collection.
    pub fn visible_items(&self) -> &[Arc<T>] {
        &self.visible
    }

    /// Incremented on every committed change of [`Self::visible_items`].
    pub fn visible_revision(&self) -> u64 {
        self.visible_revision
    }

    /// Number of diff/commit evaluations run so far, including the initial one.
    pub fn commit_evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn has_pending_commit(&self) -> bool {
        self.limiter.is_pending()
    }

    pub fn pending_commit_deadline_ms(&self) -> Option<u64> {
        self.limiter.deadline_ms()
    }

    pub fn rate_limit_ms(&self) -> u64 {
        self.limiter.interval_ms()
    }

    pub fn set_rate_limit(&mut self, interval_ms: u64, method: RateLimitMethod) {
        if self.rejects_input("set_rate_limit") {
            return;
        }
        self.limiter.reconfigure(interval_ms, method);
    }

    pub fn set_on_visible_items_changed(
        &mut self,
        f: Option<impl Fn(&[Arc<T>]) + Send + Sync + 'static>,
    ) {
        if self.rejects_input("set_on_visible_items_changed") {
            return;
        }
        self.on_visible_items_changed = f.map(|f| Arc::new(f) as _);
    }

    pub fn set_scroll_position(&mut self, position: i64, now_ms: u64) {
        if self.rejects_input("set_scroll_position") || self.state.scroll_position == position {
            return;
        }
        itrace!(position, now_ms, "set_scroll_position");
        self.state.scroll_position = position;
        self.invalidate(now_ms);
    }

    /// Applies a horizontal scroll offset. Ignored unless the axis is horizontal.
    pub fn set_scroll_x(&mut self, position: i64, now_ms: u64) {
        if self.state.axis == ScrollAxis::Horizontal {
            self.set_scroll_position(position, now_ms);
        }
    }

    /// Applies a vertical scroll offset. Ignored unless the axis is vertical.
    pub fn set_scroll_y(&mut self, position: i64, now_ms: u64) {
        if self.state.axis == ScrollAxis::Vertical {
            self.set_scroll_position(position, now_ms);
        }
    }

    /// Applies a scroll position reported as text, e.g. `"320"` or `"320px"`.
    ///
    /// Returns `false` (leaving the position untouched) when no integer prefix is found.
    pub fn update_scroll_pos(&mut self, raw: &str, now_ms: u64) -> bool {
        let Some(position) = crate::options::parse_int_prefix(raw) else {
            iwarn!(raw, "update_scroll_pos: not an integer");
            return false;
        };
        self.set_scroll_position(position, now_ms);
        true
    }

    pub fn set_scroll_pos_offset(&mut self, offset: i64, now_ms: u64) {
        if self.rejects_input("set_scroll_pos_offset") || self.state.scroll_pos_offset == offset {
            return;
        }
        itrace!(offset, now_ms, "set_scroll_pos_offset");
        self.state.scroll_pos_offset = offset;
        self.invalidate(now_ms);
    }

    /// Sets the viewport size. Zero or negative dimensions become [`crate::UNKNOWN`].
    pub fn set_viewport_size(&mut self, width: i64, height: i64, now_ms: u64) {
        let (width, height) = (normalize_dimension(width), normalize_dimension(height));
        if self.rejects_input("set_viewport_size")
            || (self.state.viewport_width, self.state.viewport_height) == (width, height)
        {
            return;
        }
        itrace!(width, height, now_ms, "set_viewport_size");
        self.state.viewport_width = width;
        self.state.viewport_height = height;
        self.invalidate(now_ms);
    }

    /// Sets the item size. Zero or negative dimensions become [`crate::UNKNOWN`].
    pub fn set_item_size(&mut self, width: i64, height: i64, now_ms: u64) {
        let (width, height) = (normalize_dimension(width), normalize_dimension(height));
        if self.rejects_input("set_item_size")
            || (self.state.item_width, self.state.item_height) == (width, height)
        {
            return;
        }
        itrace!(width, height, now_ms, "set_item_size");
        self.state.item_width = width;
        self.state.item_height = height;
        self.invalidate(now_ms);
    }

    pub fn set_axis(&mut self, axis: ScrollAxis, now_ms: u64) {
        if self.rejects_input("set_axis") || self.state.axis == axis {
            return;
        }
        idebug!(axis = axis.as_str(), "set_axis");
        self.state.axis = axis;
        self.invalidate(now_ms);
    }

    /// Sets the padding factor. Non-finite values mean one page; zero or negative factors
    /// mount no padding.
    pub fn set_pages_padding(&mut self, pages_padding: f64, now_ms: u64) {
        let pages_padding = normalize_pages_padding(pages_padding);
        if self.rejects_input("set_pages_padding") || self.state.pages_padding == pages_padding {
            return;
        }
        itrace!(pages_padding, now_ms, "set_pages_padding");
        self.state.pages_padding = pages_padding;
        self.invalidate(now_ms);
    }

    /// Replaces every input at once (e.g. when restoring a saved [`WindowState`]).
    pub fn apply_state(&mut self, state: WindowState, now_ms: u64) {
        let state = state.normalized();
        if self.rejects_input("apply_state") || self.state == state {
            return;
        }
        self.state = state;
        self.invalidate(now_ms);
    }

    pub fn set_items(&mut self, items: impl IntoIterator<Item = Arc<T>>, now_ms: u64) {
        if self.rejects_input("set_items") {
            return;
        }
        self.items.clear();
        self.items.extend(items);
        itrace!(len = self.items.len(), now_ms, "set_items");
        self.invalidate(now_ms);
    }

    pub fn extend_items(&mut self, items: impl IntoIterator<Item = Arc<T>>, now_ms: u64) {
        if self.rejects_input("extend_items") {
            return;
        }
        let before = self.items.len();
        self.items.extend(items);
        if self.items.len() == before {
            return;
        }
        itrace!(len = self.items.len(), now_ms, "extend_items");
        self.invalidate(now_ms);
    }

    pub fn push_item(&mut self, item: impl Into<Arc<T>>, now_ms: u64) {
        if self.rejects_input("push_item") {
            return;
        }
        self.items.push(item.into());
        self.invalidate(now_ms);
    }

    pub fn clear_items(&mut self, now_ms: u64) {
        if self.rejects_input("clear_items") || self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.invalidate(now_ms);
    }

    /// Batches several mutations into a single commit trigger.
    ///
    /// Each setter inside `f` invalidates the metrics as usual, but the rate limiter only sees
    /// one trigger when the outermost batch ends.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);

        if self.batch_depth == 0 {
            if let Some(now_ms) = self.batch_trigger_ms.take() {
                self.request_commit(now_ms);
            }
        }
    }

    /// Runs a rate-limited commit if one is due at `now_ms`.
    ///
    /// Returns `true` when the visible slice changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.disposed || !self.limiter.poll(now_ms) {
            return false;
        }
        itrace!(now_ms, "tick: commit due");
        self.evaluate_commit()
    }

    /// Runs a pending commit immediately instead of waiting for its deadline.
    pub fn flush(&mut self) -> bool {
        if self.disposed || !self.limiter.take_pending() {
            return false;
        }
        self.evaluate_commit()
    }

    /// Evaluates the visible slice now, cancelling any pending rate-limited run.
    pub fn commit_now(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.limiter.cancel();
        self.evaluate_commit()
    }

    /// Cancels pending work, drops the collection and the committed slice, and detaches the
    /// callback. A disposed engine ignores further input.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        idebug!(
            pending = self.limiter.is_pending(),
            len = self.items.len(),
            "ScrollWindow::dispose"
        );
        self.limiter.cancel();
        self.items = Vec::new();
        self.visible = Vec::new();
        self.on_visible_items_changed = None;
        self.batch_trigger_ms = None;
        self.metrics.set(None);
        self.disposed = true;
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn rejects_input(&self, op: &'static str) -> bool {
        if self.disposed {
            iwarn!(op, "input ignored: ScrollWindow is disposed");
            return true;
        }
        false
    }

    fn invalidate(&mut self, now_ms: u64) {
        self.metrics.set(None);
        self.request_commit(now_ms);
    }

    fn request_commit(&mut self, now_ms: u64) {
        if self.batch_depth > 0 {
            self.batch_trigger_ms = Some(now_ms);
            return;
        }
        if self.limiter.trigger(now_ms) {
            self.evaluate_commit();
        }
    }

    fn evaluate_commit(&mut self) -> bool {
        self.evaluations = self.evaluations.saturating_add(1);
        let last_hidden = self.metrics().last_hidden.min(self.items.len());
        let candidate = &self.items[..last_hidden];

        let changed = candidate.len() != self.visible.len()
            || candidate
                .iter()
                .zip(self.visible.iter())
                .rev()
                .any(|(next, prev)| !Arc::ptr_eq(next, prev));
        if !changed {
            itrace!(len = candidate.len(), "commit skipped: visible slice unchanged");
            return false;
        }

        self.visible.clear();
        self.visible.extend(candidate.iter().cloned());
        self.visible_revision = self.visible_revision.saturating_add(1);
        idebug!(
            len = self.visible.len(),
            revision = self.visible_revision,
            "visible items committed"
        );

        if let Some(cb) = &self.on_visible_items_changed {
            cb(&self.visible);
        }
        true
    }
}

impl<T> core::fmt::Debug for ScrollWindow<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollWindow")
            .field("state", &self.state)
            .field("len", &self.items.len())
            .field("visible_len", &self.visible.len())
            .field("visible_revision", &self.visible_revision)
            .field("limiter", &self.limiter)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
