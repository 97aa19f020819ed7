//! Document element abstraction
//!
//! Every unit of output markup is an [`Element`]: an opening tag, a lazy body
//! of lines and a closing tag. Elements with children embed an
//! [`ElementGroup`], which emits each child's triad in insertion order.

/// A lazy sequence of output lines
pub type Lines<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Core trait for document elements
///
/// Empty opening or closing tags contribute no line at all; blank lines only
/// appear when a body yields an empty string explicitly.
///
/// # Example
/// ```
/// use tikz_export::core::{element_lines, Element, Lines};
///
/// struct Comment(&'static str);
///
/// impl Element for Comment {
///     fn pre_tag(&self) -> String {
///         format!("% {}", self.0)
///     }
///     fn content(&self) -> Lines<'_> {
///         Box::new(std::iter::empty())
///     }
///     fn post_tag(&self) -> String {
///         String::new()
///     }
/// }
///
/// let lines: Vec<String> = element_lines(&Comment("hello")).collect();
/// assert_eq!(lines, vec!["% hello"]);
/// ```
pub trait Element {
    /// The opening line of the element
    fn pre_tag(&self) -> String;

    /// The body lines of the element
    fn content(&self) -> Lines<'_>;

    /// The closing line of the element
    fn post_tag(&self) -> String;
}

/// Flatten an element into its output lines, skipping empty tags
pub fn element_lines<'e, E>(element: &'e E) -> Lines<'e>
where
    E: Element + ?Sized,
{
    let pre = Some(element.pre_tag()).filter(|tag| !tag.is_empty());
    let post = std::iter::once(()).filter_map(move |_| {
        let tag = element.post_tag();
        (!tag.is_empty()).then_some(tag)
    });

    Box::new(pre.into_iter().chain(element.content()).chain(post))
}

/// Ordered collection of child elements
///
/// Insertion order is emission order.
#[derive(Default)]
pub struct ElementGroup<'a> {
    children: Vec<Box<dyn Element + 'a>>,
}

impl<'a> ElementGroup<'a> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Append a child element
    pub fn push(&mut self, element: Box<dyn Element + 'a>) {
        self.children.push(element);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Element + 'a)> {
        self.children.iter().map(|child| child.as_ref())
    }

    /// All children's lines, one child after the other
    pub fn lines(&self) -> Lines<'_> {
        Box::new(self.children.iter().flat_map(|child| element_lines(child.as_ref())))
    }
}

impl std::fmt::Debug for ElementGroup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementGroup")
            .field("children", &self.children.len())
            .finish()
    }
}
