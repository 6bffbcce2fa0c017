/// Fatal template errors. A failed parse never yields a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("missing attribute value: the tag text is empty")]
    MissingAttributeValue,

    #[error("the \"{name}\" attribute cannot be defined more than once")]
    DuplicateAttribute { name: String },

    #[error("malformed template root: {reason}")]
    MalformedRoot { reason: &'static str },

    #[error("a template with {values} interpolated values needs {} literal fragments, got {literals}", .values + 1)]
    FragmentCount { literals: usize, values: usize },
}

pub(crate) const MUST_END_WITH_CLOSING_TAG: &str =
    "the template must end with a closing tag, or contain only a single tag or value";
pub(crate) const ROOT_MUST_BE_ELEMENT: &str = "the root value must be an HTML element";
