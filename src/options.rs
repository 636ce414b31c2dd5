use alloc::string::String;
use alloc::sync::Arc;

use crate::rate_limit::DEFAULT_RATE_LIMIT_MS;
use crate::state::{normalize_dimension, normalize_pages_padding};
use crate::{ConfigError, RateLimitMethod, ScrollAxis, UNKNOWN, WindowState};

/// A callback fired once per committed change of the visible slice.
///
/// It receives the newly committed items. Hosts typically use it to re-render, or to start
/// loading the next page when the slice reaches the end of the collection.
pub type VisibleItemsCallback<T> = Arc<dyn Fn(&[Arc<T>]) + Send + Sync>;

/// Configuration for [`crate::ScrollWindow`].
pub struct WindowOptions<T> {
    pub axis: ScrollAxis,
    /// Extra pages kept mounted around the viewport. Non-finite values mean one page; zero or
    /// negative values mount no padding.
    pub pages_padding: f64,

    pub viewport_width: i64,
    pub viewport_height: i64,
    pub item_width: i64,
    pub item_height: i64,

    pub scroll_position: i64,
    pub scroll_pos_offset: i64,

    /// Coalescing window for visible-slice commits. `0` commits synchronously.
    pub rate_limit_ms: u64,
    pub rate_limit_method: RateLimitMethod,

    pub on_visible_items_changed: Option<VisibleItemsCallback<T>>,
}

impl<T> Clone for WindowOptions<T> {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            pages_padding: self.pages_padding,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            item_width: self.item_width,
            item_height: self.item_height,
            scroll_position: self.scroll_position,
            scroll_pos_offset: self.scroll_pos_offset,
            rate_limit_ms: self.rate_limit_ms,
            rate_limit_method: self.rate_limit_method,
            on_visible_items_changed: self.on_visible_items_changed.clone(),
        }
    }
}

impl<T> Default for WindowOptions<T> {
    fn default() -> Self {
        Self {
            axis: ScrollAxis::Vertical,
            pages_padding: 1.0,
            viewport_width: UNKNOWN,
            viewport_height: UNKNOWN,
            item_width: UNKNOWN,
            item_height: UNKNOWN,
            scroll_position: 0,
            scroll_pos_offset: 0,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            rate_limit_method: RateLimitMethod::FixedRate,
            on_visible_items_changed: None,
        }
    }
}

impl<T> WindowOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses textual binding arguments. See [`BindingArgs`] for the accepted keys.
    pub fn from_binding_args(args: &BindingArgs) -> Result<Self, ConfigError> {
        let axis = match &args.scroll_axis {
            Some(raw) => raw.parse::<ScrollAxis>()?,
            None => ScrollAxis::Vertical,
        };
        let int_or = |raw: &Option<String>, default: i64| {
            raw.as_deref()
                .and_then(parse_int_prefix)
                .filter(|v| *v != 0)
                .unwrap_or(default)
        };

        let opts = Self {
            axis,
            pages_padding: args
                .num_pages_padding
                .as_deref()
                .and_then(parse_float_prefix)
                .filter(|v| *v != 0.0)
                .map(normalize_pages_padding)
                .unwrap_or(1.0),
            viewport_width: normalize_dimension(int_or(&args.viewport_width, UNKNOWN)),
            viewport_height: normalize_dimension(int_or(&args.viewport_height, UNKNOWN)),
            item_width: normalize_dimension(int_or(&args.item_width, UNKNOWN)),
            item_height: normalize_dimension(int_or(&args.item_height, UNKNOWN)),
            scroll_position: int_or(&args.scroll_position, 0),
            scroll_pos_offset: int_or(&args.scroll_pos_offset, 0),
            rate_limit_ms: args
                .rate_limit
                .as_deref()
                .and_then(parse_int_prefix)
                .filter(|v| *v > 0)
                .map(|v| v as u64)
                .unwrap_or(DEFAULT_RATE_LIMIT_MS),
            rate_limit_method: RateLimitMethod::FixedRate,
            on_visible_items_changed: None,
        };
        idebug!(
            axis = opts.axis.as_str(),
            pages_padding = opts.pages_padding,
            rate_limit_ms = opts.rate_limit_ms,
            "WindowOptions::from_binding_args"
        );
        Ok(opts)
    }

    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_pages_padding(mut self, pages_padding: f64) -> Self {
        self.pages_padding = pages_padding;
        self
    }

    pub fn with_viewport_size(mut self, width: i64, height: i64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_item_size(mut self, width: i64, height: i64) -> Self {
        self.item_width = width;
        self.item_height = height;
        self
    }

    pub fn with_scroll_position(mut self, scroll_position: i64) -> Self {
        self.scroll_position = scroll_position;
        self
    }

    pub fn with_scroll_pos_offset(mut self, scroll_pos_offset: i64) -> Self {
        self.scroll_pos_offset = scroll_pos_offset;
        self
    }

    pub fn with_rate_limit_ms(mut self, rate_limit_ms: u64) -> Self {
        self.rate_limit_ms = rate_limit_ms;
        self
    }

    pub fn with_rate_limit_method(mut self, method: RateLimitMethod) -> Self {
        self.rate_limit_method = method;
        self
    }

    pub fn with_on_visible_items_changed(
        mut self,
        f: Option<impl Fn(&[Arc<T>]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_visible_items_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    /// The normalized input snapshot these options start from.
    pub fn initial_state(&self) -> WindowState {
        WindowState {
            axis: self.axis,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            item_width: self.item_width,
            item_height: self.item_height,
            scroll_position: self.scroll_position,
            scroll_pos_offset: self.scroll_pos_offset,
            pages_padding: self.pages_padding,
        }
        .normalized()
    }
}

impl<T> TryFrom<&BindingArgs> for WindowOptions<T> {
    type Error = ConfigError;

    fn try_from(args: &BindingArgs) -> Result<Self, Self::Error> {
        Self::from_binding_args(args)
    }
}

impl<T> TryFrom<BindingArgs> for WindowOptions<T> {
    type Error = ConfigError;

    fn try_from(args: BindingArgs) -> Result<Self, Self::Error> {
        Self::from_binding_args(&args)
    }
}

impl<T> core::fmt::Debug for WindowOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("axis", &self.axis)
            .field("pages_padding", &self.pages_padding)
            .field("viewport_width", &self.viewport_width)
            .field("viewport_height", &self.viewport_height)
            .field("item_width", &self.item_width)
            .field("item_height", &self.item_height)
            .field("scroll_position", &self.scroll_position)
            .field("scroll_pos_offset", &self.scroll_pos_offset)
            .field("rate_limit_ms", &self.rate_limit_ms)
            .field("rate_limit_method", &self.rate_limit_method)
            .finish_non_exhaustive()
    }
}

/// Untyped binding arguments, as a markup binding would pass them.
///
/// Every value is kept as text and parsed leniently by [`WindowOptions::from_binding_args`]:
/// numbers use their longest numeric prefix (`"120px"` is `120`), and anything unparseable
/// (or zero) falls back to the default. Only `scrollAxis` can fail.
///
/// With `feature = "serde"`, this type deserializes from the camelCase binding keys and
/// accepts both strings and JSON numbers as values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BindingArgs {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub num_pages_padding: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub scroll_axis: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub rate_limit: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub viewport_width: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub viewport_height: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub item_width: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub item_height: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub scroll_position: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::scalar"))]
    pub scroll_pos_offset: Option<String>,
}

impl BindingArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds arguments from `(key, value)` pairs. Unknown keys are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut args = Self::default();
        for (key, value) in pairs {
            args.set(key, value);
        }
        args
    }

    /// Sets one argument by its binding key. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "numPagesPadding" => &mut self.num_pages_padding,
            "scrollAxis" => &mut self.scroll_axis,
            "rateLimit" => &mut self.rate_limit,
            "viewportWidth" => &mut self.viewport_width,
            "viewportHeight" => &mut self.viewport_height,
            "itemWidth" => &mut self.item_width,
            "itemHeight" => &mut self.item_height,
            "scrollPosition" => &mut self.scroll_position,
            "scrollPosOffset" => &mut self.scroll_pos_offset,
            _ => {
                iwarn!(key, "BindingArgs: ignoring unknown key");
                return false;
            }
        };
        *slot = Some(String::from(value));
        true
    }
}

/// Parses the longest `[+-]?digits` prefix after leading whitespace.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    // Only overflow can fail past this point; keep the magnitude like `parseInt` does.
    match s[..end].parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) if bytes[0] == b'-' => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Parses the longest decimal float prefix (`[+-]?digits[.digits][e[+-]digits]`).
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            digits += 1;
        }
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

#[cfg(feature = "serde")]
mod lenient {
    use alloc::string::{String, ToString};
    use core::fmt;

    use serde::de::{self, Deserializer, Visitor};

    /// Accepts strings, numbers and booleans, keeping their textual form.
    pub(super) fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }
}
