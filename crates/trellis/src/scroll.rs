//! Scroll ranges and the offsets they feed into layout.
//!
//! Each axis has a [`RangeScroller`]. Its value is the scroll offset in
//! pixels of the scrollable extent (visible, non-header objects). The
//! coordinator sizes the scrollers from the virtual and display extents and
//! answers "ensure visible" requests.

use trellis_core::Signal;
use trellis_core::logging::{span_names, targets};
use trellis_render::{Rect, Size};

use crate::error::Axis;
use crate::geometry::ScrollOffset;
use crate::model::{AxisItem, AxisList, GridModel};

/// A min/max/value range with a page size, as exposed by a scroll bar.
pub trait RangeScroller {
    fn set_range(&mut self, min: i32, max: i32);
    fn minimum(&self) -> i32;
    fn maximum(&self) -> i32;

    fn set_page_size(&mut self, page: i32);
    fn page_size(&self) -> i32;

    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;

    fn value(&self) -> i32;

    /// Set the value, clamped into the reachable range.
    fn set_value(&mut self, value: i32);

    /// The largest value the scroller accepts.
    fn limit(&self) -> i32 {
        (self.maximum() - self.page_size()).max(self.minimum())
    }
}

/// In-memory [`RangeScroller`].
///
/// # Signals
///
/// - `value_changed(i32)`: Emitted when the value changes, including when a
///   range or page change re-clamps it
#[derive(Debug, Default)]
pub struct ScrollRange {
    min: i32,
    max: i32,
    page: i32,
    visible: bool,
    value: i32,
    /// Emitted with the new value.
    pub value_changed: Signal<i32>,
}

impl ScrollRange {
    pub fn new() -> Self {
        Self::default()
    }

    fn reclamp(&mut self) {
        let clamped = self.value.clamp(self.min, self.limit());
        if clamped != self.value {
            self.value = clamped;
            self.value_changed.emit(clamped);
        }
    }
}

impl RangeScroller for ScrollRange {
    fn set_range(&mut self, min: i32, max: i32) {
        self.min = min;
        self.max = max.max(min);
        self.reclamp();
    }

    fn minimum(&self) -> i32 {
        self.min
    }

    fn maximum(&self) -> i32 {
        self.max
    }

    fn set_page_size(&mut self, page: i32) {
        self.page = page.max(0);
        self.reclamp();
    }

    fn page_size(&self) -> i32 {
        self.page
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn value(&self) -> i32 {
        self.value
    }

    fn set_value(&mut self, value: i32) {
        let value = value.clamp(self.min, self.limit());
        if value != self.value {
            self.value = value;
            self.value_changed.emit(value);
        }
    }
}

/// Offset within the scrollable extent that makes the data object at
/// `index` fully visible, or `None` if no change is needed.
///
/// `display` is the extent available to scrolled objects. An object taller
/// than the display is aligned to its leading edge. Header and invisible
/// objects never need scrolling.
pub fn ensure_visible_offset<K: slotmap::Key, T: AxisItem>(
    list: &AxisList<K, T>,
    index: usize,
    offset: i32,
    display: i32,
) -> Option<i32> {
    let pos = list.virtual_position(index)?;
    let size = list.object(index)?.size();

    // Start of every data object in the scrollable extent.
    let starts: Vec<i32> = list
        .objects()
        .filter(|obj| obj.is_data())
        .scan(0i32, |acc, obj| {
            let start = *acc;
            *acc = acc.saturating_add(obj.size());
            Some(start)
        })
        .collect();

    let first_shown = starts
        .iter()
        .copied()
        .find(|&s| s >= offset)
        .unwrap_or(offset);

    if pos < first_shown {
        return Some(pos);
    }
    let end = pos.saturating_add(size);
    if end - first_shown > display {
        let aligned = starts
            .iter()
            .copied()
            .find(|&s| s <= pos && end - s <= display)
            .unwrap_or(pos);
        return (aligned != offset).then_some(aligned);
    }
    None
}

/// Drives one scroller per axis.
pub struct ScrollCoordinator {
    horizontal: Box<dyn RangeScroller + Send>,
    vertical: Box<dyn RangeScroller + Send>,
    bar_extent: i32,
}

impl std::fmt::Debug for ScrollCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollCoordinator")
            .field("offset", &self.offset())
            .field("bar_extent", &self.bar_extent)
            .finish_non_exhaustive()
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(16)
    }
}

impl ScrollCoordinator {
    /// Create a coordinator with in-memory scrollers. `bar_extent` is the
    /// space a visible scroll bar takes from the client area.
    pub fn new(bar_extent: i32) -> Self {
        Self::with_scrollers(
            Box::new(ScrollRange::new()),
            Box::new(ScrollRange::new()),
            bar_extent,
        )
    }

    /// Create a coordinator over host-provided scrollers.
    pub fn with_scrollers(
        horizontal: Box<dyn RangeScroller + Send>,
        vertical: Box<dyn RangeScroller + Send>,
        bar_extent: i32,
    ) -> Self {
        Self {
            horizontal,
            vertical,
            bar_extent: bar_extent.max(0),
        }
    }

    pub fn scroller(&self, axis: Axis) -> &dyn RangeScroller {
        match axis {
            Axis::Column => self.horizontal.as_ref(),
            Axis::Row => self.vertical.as_ref(),
        }
    }

    pub fn scroller_mut(&mut self, axis: Axis) -> &mut dyn RangeScroller {
        match axis {
            Axis::Column => self.horizontal.as_mut(),
            Axis::Row => self.vertical.as_mut(),
        }
    }

    pub fn bar_extent(&self) -> i32 {
        self.bar_extent
    }

    /// The current offsets. A hidden scroller contributes zero.
    pub fn offset(&self) -> ScrollOffset {
        let value = |s: &dyn RangeScroller| if s.is_visible() { s.value() } else { 0 };
        ScrollOffset::new(
            value(self.horizontal.as_ref()),
            value(self.vertical.as_ref()),
        )
    }

    /// Recompute visibility, range and page size of both scrollers.
    ///
    /// A scroller shows when the virtual extent exceeds the display extent;
    /// a visible horizontal bar takes its extent from the vertical display
    /// and vice versa.
    pub fn adjust(&mut self, virtual_size: Size, display_size: Size) {
        let _span = tracing::trace_span!(target: targets::SCROLL, span_names::SCROLL_ADJUST).entered();
        let mut display = display_size;

        let h_visible = virtual_size.width > display.width;
        if h_visible {
            display.height = display.height.saturating_sub(self.bar_extent);
        }
        let v_visible = virtual_size.height > display.height;
        if v_visible {
            display.width = display.width.saturating_sub(self.bar_extent);
        }

        let h_max = if h_visible { virtual_size.width } else { 0 };
        let v_max = if v_visible { virtual_size.height } else { 0 };

        self.horizontal.set_visible(h_visible);
        self.horizontal.set_range(0, h_max);
        self.horizontal
            .set_page_size(if h_max > 0 { display.width.max(0) } else { 0 });

        self.vertical.set_visible(v_visible);
        self.vertical.set_range(0, v_max);
        self.vertical
            .set_page_size(if v_max > 0 { display.height.max(0) } else { 0 });

        tracing::trace!(
            target: targets::SCROLL,
            h_visible,
            v_visible,
            h_max,
            v_max,
            "scrollers adjusted"
        );
    }

    /// The client area minus visible scroll bars.
    pub fn visual_rect(&self, client: Rect) -> Rect {
        let mut r = client;
        if self.vertical.is_visible() {
            r.size.width = (r.size.width - self.bar_extent).max(0);
        }
        if self.horizontal.is_visible() {
            r.size.height = (r.size.height - self.bar_extent).max(0);
        }
        r
    }

    /// Display extent on `axis` with headers and visible bars removed.
    pub fn display_extent(&self, model: &GridModel, axis: Axis, client: Rect) -> i32 {
        let visual = self.visual_rect(client);
        match axis {
            Axis::Row => visual.height().saturating_sub(model.rows().header_size()),
            Axis::Column => visual.width().saturating_sub(model.columns().header_size()),
        }
    }

    /// Scroll so that the object at `index` on `axis` is fully shown.
    ///
    /// Returns `true` if the offset changed.
    pub fn ensure_visible(
        &mut self,
        model: &GridModel,
        axis: Axis,
        index: usize,
        client: Rect,
    ) -> bool {
        let scroller = self.scroller(axis);
        if !scroller.is_visible() {
            return false;
        }
        let offset = scroller.value();
        let display = self.display_extent(model, axis, client);
        let target = match axis {
            Axis::Row => ensure_visible_offset(model.rows(), index, offset, display),
            Axis::Column => ensure_visible_offset(model.columns(), index, offset, display),
        };
        let Some(target) = target else {
            return false;
        };
        let scroller = self.scroller_mut(axis);
        scroller.set_value(target);
        let changed = scroller.value() != offset;
        if changed {
            tracing::debug!(target: targets::SCROLL, axis = %axis, from = offset, to = scroller.value(), "scrolled into view");
        }
        changed
    }

    /// Scroll vertically by one row for a wheel notch.
    ///
    /// Positive `delta` scrolls up, negative down. The step is the height of
    /// the first data row starting at or past the current offset. Returns
    /// `true` if the offset changed.
    pub fn wheel(&mut self, model: &GridModel, delta: i32) -> bool {
        if delta == 0 || !self.vertical.is_visible() {
            return false;
        }
        let offset = self.vertical.value();
        let mut start = 0;
        let mut step = 0;
        for obj in model.rows().objects().filter(|obj| obj.is_data()) {
            if start >= offset {
                step = obj.size();
                break;
            }
            start = start.saturating_add(obj.size());
        }
        if step == 0 {
            return false;
        }
        let target = if delta < 0 {
            offset.saturating_add(step)
        } else {
            offset - step
        };
        self.vertical.set_value(target);
        self.vertical.value() != offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// 1 header row (20px) + 10 data rows (10px); 1 header column (30px) +
    /// 3 data columns (40px).
    fn model() -> GridModel {
        let mut m = GridModel::new();
        m.add_row(20);
        for _ in 0..10 {
            m.add_row(10);
        }
        m.add_column(30);
        for _ in 0..3 {
            m.add_column(40);
        }
        m.row_mut(0).unwrap().set_header(true);
        m.column_mut(0).unwrap().set_header(true);
        m
    }

    #[test]
    fn test_scroll_range_clamps_and_notifies() {
        let mut range = ScrollRange::new();
        let values = Arc::new(Mutex::new(Vec::new()));
        let values_clone = values.clone();
        range
            .value_changed
            .connect(move |&v| values_clone.lock().push(v));

        range.set_range(0, 100);
        range.set_page_size(30);
        range.set_value(90);
        assert_eq!(range.value(), 70);
        range.set_value(-5);
        assert_eq!(range.value(), 0);
        range.set_value(0);

        range.set_value(50);
        range.set_page_size(80);
        assert_eq!(range.value(), 20);

        assert_eq!(*values.lock(), vec![70, 0, 50, 20]);
    }

    #[test]
    fn test_adjust_shows_vertical_only() {
        let m = model();
        let mut sc = ScrollCoordinator::new(16);
        // Client 200x60: display is 170 wide, 40 high; 100px of rows to show.
        sc.adjust(Size::new(120, 100), Size::new(170, 40));

        assert!(!sc.scroller(Axis::Column).is_visible());
        let v = sc.scroller(Axis::Row);
        assert!(v.is_visible());
        assert_eq!(v.maximum(), 100);
        assert_eq!(v.page_size(), 40);
        assert_eq!(sc.visual_rect(Rect::new(0, 0, 200, 60)), Rect::new(0, 0, 184, 60));
        assert_eq!(sc.display_extent(&m, Axis::Row, Rect::new(0, 0, 200, 60)), 40);
    }

    #[test]
    fn test_adjust_horizontal_takes_vertical_space() {
        let mut sc = ScrollCoordinator::new(16);
        sc.adjust(Size::new(300, 50), Size::new(170, 60));

        assert!(sc.scroller(Axis::Column).is_visible());
        // 60 - 16 = 44 < 50, so the vertical bar shows too.
        assert!(sc.scroller(Axis::Row).is_visible());
        assert_eq!(sc.scroller(Axis::Column).page_size(), 154);
        assert_eq!(sc.scroller(Axis::Row).page_size(), 44);
    }

    #[test]
    fn test_offset_is_zero_when_hidden() {
        let mut sc = ScrollCoordinator::new(16);
        sc.adjust(Size::new(100, 100), Size::new(200, 200));
        sc.scroller_mut(Axis::Row).set_value(30);
        assert_eq!(sc.offset(), ScrollOffset::ZERO);
    }

    #[test]
    fn test_ensure_visible_offset() {
        let m = model();
        let rows = m.rows();
        // Display fits 4 data rows. Row 1 starts at 0, row 8 at 70.
        assert_eq!(ensure_visible_offset(rows, 1, 0, 40), None);
        assert_eq!(ensure_visible_offset(rows, 4, 0, 40), None);
        assert_eq!(ensure_visible_offset(rows, 5, 0, 40), Some(10));
        assert_eq!(ensure_visible_offset(rows, 8, 0, 40), Some(40));
        assert_eq!(ensure_visible_offset(rows, 2, 50, 40), Some(10));
        assert_eq!(ensure_visible_offset(rows, 0, 50, 40), None);
    }

    #[test]
    fn test_ensure_visible_scrolls_scroller() {
        let m = model();
        let client = Rect::new(0, 0, 200, 60);
        let mut sc = ScrollCoordinator::new(16);
        sc.adjust(Size::new(120, 100), Size::new(170, 40));

        assert!(sc.ensure_visible(&m, Axis::Row, 10, client));
        assert_eq!(sc.offset().y, 60);
        assert!(!sc.ensure_visible(&m, Axis::Row, 9, client));
        assert!(sc.ensure_visible(&m, Axis::Row, 1, client));
        assert_eq!(sc.offset().y, 0);
    }

    #[test]
    fn test_wheel_steps_by_row() {
        let m = model();
        let mut sc = ScrollCoordinator::new(16);
        sc.adjust(Size::new(120, 100), Size::new(170, 40));

        assert!(sc.wheel(&m, -120));
        assert_eq!(sc.offset().y, 10);
        assert!(sc.wheel(&m, 120));
        assert_eq!(sc.offset().y, 0);
        assert!(!sc.wheel(&m, 120));

        sc.scroller_mut(Axis::Row).set_value(60);
        assert!(!sc.wheel(&m, -120));
    }
}
