use super::*;

use std::rc::Rc;

/// A single link in a [`Path`].
struct Link<A> {
    action: A,
    parent: Option<Rc<Link<A>>>,
}

/// Persistent sequence of actions taken from the starting state.
///
/// Appending never mutates the receiver: it creates a new head that points to the previous one.
/// Sibling nodes share their common prefix, which is immutable.
pub struct Path<A> {
    head: Option<Rc<Link<A>>>,
    len: usize,
}

impl<A> Path<A> {
    /// The path of the starting state.
    pub fn empty() -> Self {
        Path { head: None, len: 0 }
    }

    /// Number of actions in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A new path that consists of this path followed by the given action.
    pub fn append(&self, action: A) -> Self {
        Path {
            head: Some(Rc::new(Link {
                action,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The last action in this path.
    pub fn last(&self) -> Option<&A> {
        self.head.as_deref().map(|link| &link.action)
    }
}

impl<A: Clone> Path<A> {
    /// Collect the actions from the starting state, in order.
    pub fn to_vec(&self) -> Vec<A> {
        let mut actions = Vec::with_capacity(self.len);
        let mut current = self.head.as_deref();
        while let Some(link) = current {
            actions.push(link.action.clone());
            current = link.parent.as_deref();
        }
        actions.reverse();
        actions
    }
}

impl<A> Clone for Path<A> {
    fn clone(&self) -> Self {
        Path {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<A> Default for Path<A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A> Drop for Path<A> {
    /// Unlink iteratively so that dropping a long path doesn't recurse once per action.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut link) => next = link.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// A node in the frontier. Immutable once pushed.
pub struct SearchNode<S, A> {
    pub state: S,
    /// Actions from the starting state to this state.
    pub path: Path<A>,
    /// Sum of the step costs along the path.
    pub cost: Cost,
}

impl<S, A> SearchNode<S, A> {
    /// Node for the starting state: empty path, zero cost.
    pub fn root(state: S) -> Self {
        SearchNode {
            state,
            path: Path::empty(),
            cost: 0.0,
        }
    }

    /// Node reached from this one by taking `action`.
    pub fn child(&self, state: S, action: A, step_cost: Cost) -> Self {
        SearchNode {
            state,
            path: self.path.append(action),
            cost: self.cost + step_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_append_keeps_parent() {
        let root: Path<char> = Path::empty();
        let a = root.append('a');
        let ab = a.append('b');
        let ac = a.append('c');
        assert!(root.is_empty());
        assert_eq!(a.to_vec(), vec!['a']);
        assert_eq!(ab.to_vec(), vec!['a', 'b']);
        assert_eq!(ac.to_vec(), vec!['a', 'c']);
        assert_eq!(ac.len(), 2);
        assert_eq!(ab.last(), Some(&'b'));
    }

    #[test]
    fn child_accumulates_cost() {
        let root = SearchNode::root(0_u32);
        let child = root.child(1, "right", 2.5);
        let grandchild = child.child(2, "right", 0.5);
        assert_eq!(root.cost, 0.0);
        assert_eq!(grandchild.cost, 3.0);
        assert_eq!(grandchild.state, 2);
        assert_eq!(grandchild.path.to_vec(), vec!["right", "right"]);
    }

    #[test]
    fn long_path_drops() {
        let mut path = Path::empty();
        for i in 0..200_000 {
            path = path.append(i);
        }
        assert_eq!(path.len(), 200_000);
        drop(path);
    }
}
