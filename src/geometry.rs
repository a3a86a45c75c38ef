//! Viewport-aware placement of context menu panels.
//!
//! The panel is anchored at the pointer and then pulled back on whichever
//! axis would overflow the visible viewport. The two axes are independent,
//! so correcting one never invalidates the other. The panel is never
//! flipped to the opposite side of the pointer.

/// Scroll and client metrics of the visible viewport.
///
/// Mirrors what a document exposes: the scroll offset of the page, the
/// offset of the client area inside the root element (border widths), and
/// the visible client size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub page_x_offset: i32,
    pub page_y_offset: i32,
    pub client_left: i32,
    pub client_top: i32,
    pub client_width: i32,
    pub client_height: i32,
}

impl Viewport {
    /// Unscrolled viewport of the given client size.
    pub const fn new(client_width: i32, client_height: i32) -> Self {
        Self {
            page_x_offset: 0,
            page_y_offset: 0,
            client_left: 0,
            client_top: 0,
            client_width,
            client_height,
        }
    }

    pub const fn with_scroll(mut self, x: i32, y: i32) -> Self {
        self.page_x_offset = x;
        self.page_y_offset = y;
        self
    }

    pub const fn with_client_origin(mut self, left: i32, top: i32) -> Self {
        self.client_left = left;
        self.client_top = top;
        self
    }

    /// Horizontal scroll normalized against the client origin.
    pub const fn doc_left(&self) -> i32 {
        self.page_x_offset - self.client_left
    }

    /// Vertical scroll normalized against the client origin.
    pub const fn doc_top(&self) -> i32 {
        self.page_y_offset - self.client_top
    }

    /// Right edge of the visible viewport in page coordinates.
    pub const fn doc_width(&self) -> i32 {
        self.client_width + self.doc_left()
    }

    /// Bottom edge of the visible viewport in page coordinates.
    pub const fn doc_height(&self) -> i32 {
        self.client_height + self.doc_top()
    }
}

/// Natural rendered size of a panel (its scroll width/height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelSize {
    pub width: i32,
    pub height: i32,
}

impl PanelSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Offsets applied to a panel when it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionResult {
    pub top: i32,
    pub left: i32,
}

/// Compute where a panel of `panel` size opens for a pointer at
/// `(page_x, page_y)`.
///
/// `margin_bottom` is only subtracted when the panel overflows the bottom
/// edge. The result never goes negative, even for panels larger than the
/// viewport.
pub fn compute_position(
    page_x: i32,
    page_y: i32,
    panel: PanelSize,
    viewport: &Viewport,
    margin_bottom: i32,
) -> PositionResult {
    let doc_left = viewport.doc_left();
    let doc_top = viewport.doc_top();
    let doc_width = viewport.doc_width();
    let doc_height = viewport.doc_height();

    let mut left = (page_x - doc_left).max(0);
    let mut top = (page_y - doc_top).max(0);

    let total_width = page_x + panel.width;
    if total_width > doc_width {
        left -= total_width - doc_width;
    }

    let total_height = page_y + panel.height;
    if total_height > doc_height {
        top -= total_height - doc_height + margin_bottom;
    }

    PositionResult {
        top: top.max(0),
        left: left.max(0),
    }
}
