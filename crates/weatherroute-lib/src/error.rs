use thiserror::Error;

/// Convenient result alias for the weatherroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node with the same name is already part of the graph.
    #[error("duplicate node name: {name}")]
    DuplicateNode { name: String },

    /// Raised when a node name or identifier could not be found in the graph.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a node is placed at a NaN or infinite coordinate.
    #[error("invalid coordinates ({x}, {y}) for node {name}; coordinates must be finite")]
    InvalidCoordinate { name: String, x: f64, y: f64 },

    /// Raised when an edge cost or cost modifier is negative or not finite.
    #[error("invalid cost {value} for {subject}; costs must be finite and non-negative")]
    InvalidCost { subject: String, value: f64 },

    /// Raised when popping from an empty open set. A correct search never
    /// surfaces this.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Raised when a caller requires a route but the search found none.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a search expands more nodes than the configured limit.
    #[error("search aborted after expanding {limit} nodes")]
    SearchLimitExceeded { limit: usize },

    /// Raised when search options could not be parsed.
    #[error("invalid search options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unknown_node(name: impl Into<String>) -> Self {
        Error::UnknownNode {
            name: name.into(),
            suggestions: Vec::new(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
