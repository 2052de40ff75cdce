//! Nested full-text expressions.
//!
//! [`MatchExpr`] builds the payload of `MATCH()` as a tree of AND / OR /
//! MAYBE groups whose leaves are literal fragments or term groups. Nodes
//! live in an arena and are addressed by [`NodeId`]; each node records its
//! parent, so a caller can step into a new group, fill it, and step back
//! out again.
//!
//! ```
//! use fabryk_sphinxql::{Combinator, MatchExpr, QueryOptions};
//!
//! let mut expr = MatchExpr::with_combinator(Combinator::Or);
//! let root = expr.root();
//! expr.add_terms(root, "title", 0, QueryOptions::new(), ["rust", "go"]);
//!
//! let both = expr.step_into(root, Combinator::And);
//! expr.add_text(both, "systems", QueryOptions::new())
//!     .add_text(both, "language", QueryOptions::new());
//!
//! assert_eq!(
//!     expr.to_string(),
//!     "( @(title) (rust | go) | ( systems language ) )"
//! );
//! ```

use std::fmt;

use crate::escape::SYNTAX_CHARS;
use crate::terms::{prepare_append, term_group};
use crate::types::{Combinator, Field, QueryOptions};

/// Handle to a group node inside one [`MatchExpr`].
///
/// Handles are only meaningful for the expression that issued them.
/// Methods taking a handle index the arena directly: a handle from another
/// expression panics when it is out of range, and otherwise addresses an
/// unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf {
        text: String,
        parenthesize: bool,
    },
    Group {
        combinator: Combinator,
        children: Vec<NodeId>,
    },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Arena-backed boolean full-text expression.
#[derive(Debug, Clone)]
pub struct MatchExpr {
    nodes: Vec<Node>,
    root: NodeId,
}

impl MatchExpr {
    /// Create an expression whose root is an AND group.
    pub fn new() -> Self {
        Self::with_combinator(Combinator::And)
    }

    /// Create an expression whose root group uses `combinator`.
    pub fn with_combinator(combinator: Combinator) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Group {
                    combinator,
                    children: Vec::new(),
                },
            }],
            root: NodeId(0),
        }
    }

    /// The current root group.
    ///
    /// This changes when [`step_out`](Self::step_out) is called on the root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Parent of `at`, if it has one.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn parent(&self, at: NodeId) -> Option<NodeId> {
        self.nodes[at.0].parent
    }

    /// Combinator of the group `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn combinator(&self, at: NodeId) -> Option<Combinator> {
        match self.nodes[at.0].kind {
            NodeKind::Group { combinator, .. } => Some(combinator),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Change the combinator of the group `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn set_combinator(&mut self, at: NodeId, combinator: Combinator) -> &mut Self {
        if let NodeKind::Group {
            combinator: current,
            ..
        } = &mut self.nodes[at.0].kind
        {
            *current = combinator;
        }
        self
    }

    /// Open a new child group under `at` and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn step_into(&mut self, at: NodeId, combinator: Combinator) -> NodeId {
        self.attach(
            at,
            NodeKind::Group {
                combinator,
                children: Vec::new(),
            },
        )
    }

    /// Open a new AND child group under `at`.
    pub fn step_into_and(&mut self, at: NodeId) -> NodeId {
        self.step_into(at, Combinator::And)
    }

    /// Open a new OR child group under `at`.
    pub fn step_into_or(&mut self, at: NodeId) -> NodeId {
        self.step_into(at, Combinator::Or)
    }

    /// Return the parent group of `at`.
    ///
    /// A node without a parent gets a fresh AND group wrapped around it,
    /// which becomes the new root when `at` was the root.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn step_out(&mut self, at: NodeId) -> NodeId {
        if let Some(parent) = self.nodes[at.0].parent {
            return parent;
        }

        let parent = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Group {
                combinator: Combinator::And,
                children: vec![at],
            },
        });
        self.nodes[at.0].parent = Some(parent);

        if self.root == at {
            self.root = parent;
        }

        parent
    }

    /// Add a literal fragment under `at`.
    ///
    /// Empty text is ignored. With `maybe`, the fragment is prefixed with
    /// `MAYBE`. When rendered next to siblings, a fragment holding more
    /// than one token or any operator character is parenthesized so its
    /// operators cannot reach into the neighbouring leaves.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn add_text(&mut self, at: NodeId, text: &str, options: QueryOptions) -> &mut Self {
        if text.is_empty() {
            return self;
        }

        let mut leaf = String::with_capacity(text.len() + 6);
        prepare_append(&mut leaf, options);
        leaf.push_str(text);

        self.attach(
            at,
            NodeKind::Leaf {
                text: leaf,
                parenthesize: true,
            },
        );
        self
    }

    /// Add a term group under `at`.
    ///
    /// Nothing is added when no value survives sanitization.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn add_terms<'f, F, I>(
        &mut self,
        at: NodeId,
        field: F,
        limit: u32,
        options: QueryOptions,
        values: I,
    ) -> &mut Self
    where
        F: Into<Field<'f>>,
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        match term_group(field, limit, options, values) {
            Some(group) => {
                self.attach(
                    at,
                    NodeKind::Leaf {
                        text: group,
                        parenthesize: false,
                    },
                );
            }
            None => log::trace!("term group under {:?} is empty, skipped", at),
        }
        self
    }

    /// Graft another expression under `at`.
    ///
    /// Empty expressions are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn add_expr(&mut self, at: NodeId, other: MatchExpr) -> &mut Self {
        if other.is_empty() {
            log::trace!("empty subexpression under {:?}, skipped", at);
            return self;
        }

        let offset = self.nodes.len();
        let shift = |id: NodeId| NodeId(id.0 + offset);

        self.nodes.extend(other.nodes.into_iter().map(|node| Node {
            parent: node.parent.map(shift),
            kind: match node.kind {
                NodeKind::Group {
                    combinator,
                    children,
                } => NodeKind::Group {
                    combinator,
                    children: children.into_iter().map(shift).collect(),
                },
                leaf => leaf,
            },
        }));

        let grafted = shift(other.root);
        self.nodes[grafted.0].parent = Some(at);
        self.push_child(at, grafted);
        self
    }

    /// Whether the whole expression renders to nothing.
    pub fn is_empty(&self) -> bool {
        self.is_node_empty(self.root)
    }

    /// Whether the subtree at `at` contains no text.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn is_node_empty(&self, at: NodeId) -> bool {
        match &self.nodes[at.0].kind {
            NodeKind::Leaf { text, .. } => text.is_empty(),
            NodeKind::Group { children, .. } => children.iter().all(|c| self.is_node_empty(*c)),
        }
    }

    /// Append the rendered expression to `buf`.
    pub fn render_into(&self, buf: &mut String) {
        self.render_node(self.root, buf);
    }

    /// Append the rendered subtree at `at` to `buf`.
    ///
    /// A group with more than one child is parenthesized even when some of
    /// those children are empty; only non-empty children are rendered.
    ///
    /// # Panics
    ///
    /// Panics if `at` was not issued by this expression.
    pub fn render_node(&self, at: NodeId, buf: &mut String) {
        let siblings = match self.nodes[at.0].parent {
            Some(parent) => self.child_count(parent),
            None => 1,
        };
        self.render_child(at, siblings, buf);
    }

    fn render_child(&self, at: NodeId, siblings: usize, buf: &mut String) {
        match &self.nodes[at.0].kind {
            NodeKind::Leaf { text, parenthesize } => {
                if *parenthesize && siblings > 1 && needs_brackets(text) {
                    buf.push_str("( ");
                    buf.push_str(text);
                    buf.push_str(" )");
                } else {
                    buf.push_str(text);
                }
            }
            NodeKind::Group {
                combinator,
                children,
            } => {
                let wrap = children.len() > 1;
                if wrap {
                    buf.push_str("( ");
                }

                let mut first = true;
                for child in children.iter().filter(|c| !self.is_node_empty(**c)) {
                    if !first {
                        buf.push_str(combinator.separator());
                    }
                    self.render_child(*child, children.len(), buf);
                    first = false;
                }

                if wrap {
                    buf.push_str(" )");
                }
            }
        }
    }

    fn child_count(&self, at: NodeId) -> usize {
        match &self.nodes[at.0].kind {
            NodeKind::Group { children, .. } => children.len(),
            NodeKind::Leaf { .. } => 0,
        }
    }

    fn attach(&mut self, at: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(at),
            kind,
        });
        self.push_child(at, id);
        id
    }

    fn push_child(&mut self, at: NodeId, child: NodeId) {
        // Handles given out by this type always point at groups.
        if let NodeKind::Group { children, .. } = &mut self.nodes[at.0].kind {
            children.push(child);
        }
    }
}

/// Whether a literal leaf must be bracketed among siblings: it spans more
/// than one token or carries an operator (`@field`, `-x`, `a<<b`, ...).
fn needs_brackets(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_whitespace() || c == '<' || SYNTAX_CHARS.contains(&c))
}

impl Default for MatchExpr {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.render_into(&mut buf);
        f.write_str(&buf)
    }
}

// ============================================================================
// Tests
// ============================================================================
