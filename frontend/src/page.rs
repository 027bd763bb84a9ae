//! The slice of the browser the page interactions read from and write to.
//!
//! Handlers never touch `web_sys` directly. They go through [`Page`], which is
//! implemented by the real document in `browser` and by an in-memory page in
//! tests.

/// Read/write access to the viewport and to the elements the controller manages.
pub trait Page {
    type Node: Clone + PartialEq;

    fn viewport_width(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn scroll_y(&self) -> f64;
    /// Starts an animated scroll and returns immediately.
    fn smooth_scroll_to(&self, top: f64);

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn query_one(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn body(&self) -> Option<Self::Node>;
    /// Creates a `div` with the given class and appends it to `<body>`.
    fn append_div(&self, class: &str) -> Option<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// An empty `value` removes the inline property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn offset_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;
    /// Top edge relative to the viewport.
    fn bounding_top(&self, node: &Self::Node) -> f64;

    fn value(&self, input: &Self::Node) -> String;
    fn set_value(&self, input: &Self::Node, value: &str);
    fn set_disabled(&self, input: &Self::Node, disabled: bool);
    fn reset_form(&self, form: &Self::Node);

    fn observe(&self, node: &Self::Node);
    fn unobserve(&self, node: &Self::Node);

    /// Blocking notice shown to the visitor.
    fn notify(&self, message: &str);
}

/// One entry delivered by the intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<N> {
    pub target: N,
    pub is_intersecting: bool,
}
