/// `parse.rs` - parse tree used to match streamed symbols against a set of
/// terminator sequences.
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Node of a parse tree (including the root node).
///
/// Each node owns the nodes that can follow it in the stream, keyed by the
/// symbol they match. A node with the terminal flag set marks the end of a
/// complete sequence; a branch shared by two sequences keeps both terminal
/// flags (e.g. CR and CRLF share the CR node, which stays terminal).
///
/// # Parameters
/// - `S` - The unit streamed for parsing matches.
#[derive(Debug, Clone)]
pub struct ParseNode<S> {
    terminal: bool,
    next: HashMap<S, ParseNode<S>>,
}

impl<S: Copy + Eq + Hash> ParseNode<S> {
    /// Creates an empty node (no followers, not terminal).
    pub fn new() -> Self {
        ParseNode {
            terminal: false,
            next: HashMap::new(),
        }
    }

    /// Inserts a sequence into the tree rooted at this node, merging with
    /// any branch already sharing a prefix. The node reached by the last
    /// symbol becomes terminal.
    ///
    /// # Returns
    /// - `true` - the sequence was added (or was already present).
    /// - `false` - the sequence was empty and ignored.
    pub fn insert(&mut self, sequence: &[S]) -> bool {
        if sequence.is_empty() {
            return false; // an empty sequence has no parse tree
        }

        let mut node = self;
        for symbol in sequence {
            node = node.next.entry(*symbol).or_insert_with(ParseNode::new);
        }
        node.terminal = true;
        true
    }

    /// The node matching `symbol` directly after this one, if any.
    pub fn follower(&self, symbol: S) -> Option<&ParseNode<S>> {
        self.next.get(&symbol)
    }

    /// The set of symbols matched by the nodes directly following this one.
    pub fn followup_symbols(&self) -> HashSet<S> {
        self.next.keys().copied().collect()
    }

    /// Whether a match ending at this node completes a sequence.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Whether this node has no followers.
    pub fn is_leaf(&self) -> bool {
        self.next.is_empty()
    }

    /// Whether the tree rooted at this node holds `sequence` as a complete
    /// match.
    pub fn contains(&self, sequence: &[S]) -> bool {
        let mut node = self;
        for symbol in sequence {
            match node.next.get(symbol) {
                Some(n) => node = n,
                None => return false,
            }
        }
        !sequence.is_empty() && node.terminal
    }

    /// The length of the longest branch below this node. A leaf is 0 deep.
    pub fn follower_depth(&self) -> usize {
        self.next
            .values()
            .map(|n| 1 + n.follower_depth())
            .max()
            .unwrap_or(0)
    }

    /// Whether every branch through this node ends at a terminal leaf.
    pub fn properly_terminated(&self) -> bool {
        if self.is_leaf() {
            return self.terminal;
        }
        self.next.values().all(|n| n.properly_terminated())
    }

    /// All complete sequences held by the tree rooted at this node.
    pub fn terminals(&self) -> Vec<Vec<S>> {
        let mut found = Vec::new();
        for (symbol, node) in &self.next {
            let mut prefix = vec![*symbol];
            node.collect_terminals(&mut prefix, &mut found);
        }
        found
    }

    fn collect_terminals(&self, prefix: &mut Vec<S>, found: &mut Vec<Vec<S>>) {
        if self.terminal {
            found.push(prefix.clone());
        }
        for (symbol, node) in &self.next {
            prefix.push(*symbol);
            node.collect_terminals(prefix, found);
            prefix.pop();
        }
    }
}

impl<S: Copy + Eq + Hash> Default for ParseNode<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LF: u8 = 10;
    const CR: u8 = 13;

    #[test]
    fn test_initialization() {
        let node: ParseNode<u8> = ParseNode::new();
        assert!(!node.is_terminal());
        assert!(node.is_leaf());
        assert!(node.followup_symbols().is_empty());
        assert!(node.terminals().is_empty());
        assert_eq!(node.follower_depth(), 0);
        assert!(!node.properly_terminated());
    }

    #[test]
    fn test_insert_empty_sequence() {
        let mut node: ParseNode<u8> = ParseNode::new();
        assert!(!node.insert(&[]));
        assert!(node.is_leaf());
        assert!(node.terminals().is_empty());
    }

    #[test]
    fn test_one_term_one_byte() {
        let mut node: ParseNode<u8> = ParseNode::new();
        assert!(node.insert(&[LF]));
        assert_eq!(node.followup_symbols(), HashSet::from([LF]));

        let lf = node.follower(LF).expect("LF follower missing");
        assert!(lf.is_terminal());
        assert!(lf.is_leaf());
        assert!(node.contains(&[LF]));
        assert!(node.properly_terminated());
    }

    #[test]
    fn test_two_terms_one_byte_no_overlap() {
        let mut node: ParseNode<u8> = ParseNode::new();
        node.insert(&[LF]);
        node.insert(&[CR]);
        assert_eq!(node.followup_symbols(), HashSet::from([LF, CR]));
        assert!(node.follower(LF).is_some());
        assert!(node.follower(CR).is_some());
        assert!(
            node.follower(CR)
                .and_then(|n| n.follower(LF))
                .is_none()
        );
    }

    #[test]
    fn test_one_term_two_bytes() {
        let mut node: ParseNode<u8> = ParseNode::new();
        node.insert(&[CR, LF]);
        assert_eq!(node.followup_symbols(), HashSet::from([CR]));
        assert!(node.follower(LF).is_none());

        let cr = node.follower(CR).expect("CR follower missing");
        assert!(!cr.is_terminal()); // only a prefix of CRLF
        assert!(cr.follower(LF).is_some());
        assert_eq!(node.follower_depth(), 2);
        assert!(node.contains(&[CR, LF]));
        assert!(!node.contains(&[CR]));
    }

    #[test]
    fn test_two_terms_mixed_size_no_initial_overlap() {
        let mut node: ParseNode<u8> = ParseNode::new();
        node.insert(&[LF]);
        node.insert(&[CR, LF]);
        assert_eq!(node.followup_symbols(), HashSet::from([LF, CR]));
        assert!(node.follower(LF).is_some());
        assert!(
            node.follower(CR)
                .and_then(|n| n.follower(LF))
                .is_some()
        );
    }

    #[test]
    fn test_two_terms_mixed_size_with_initial_overlap() {
        let mut node: ParseNode<u8> = ParseNode::new();
        node.insert(&[CR]);
        node.insert(&[CR, LF]);
        assert_eq!(node.followup_symbols(), HashSet::from([CR]));

        // the shared CR node keeps its terminal flag after the merge
        let cr = node.follower(CR).expect("CR follower missing");
        assert!(cr.is_terminal());
        assert!(cr.follower(LF).is_some());
        assert!(node.contains(&[CR]));
        assert!(node.contains(&[CR, LF]));
        assert!(node.properly_terminated());
    }

    #[test]
    fn test_terminals_reconstruction() {
        let mut node: ParseNode<u8> = ParseNode::new();
        node.insert(&[CR]);
        node.insert(&[CR, LF]);
        node.insert(&[LF]);

        let mut terms = node.terminals();
        terms.sort();
        assert_eq!(terms, vec![vec![LF], vec![CR], vec![CR, LF]]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut node: ParseNode<u8> = ParseNode::new();
        node.insert(&[CR, LF]);
        node.insert(&[CR, LF]);
        assert_eq!(node.terminals(), vec![vec![CR, LF]]);
    }
}
