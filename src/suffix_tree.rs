// online suffix tree construction (Ukkonen's algorithm)

use std::collections::HashMap;

pub type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;
const INVALID: NodeId = NodeId::MAX;

// `end` of a leaf edge that still grows with the text; the actual value
// lives in the tree's `end` register so that advancing it by one extends
// every open leaf at once.
const OPEN: usize = usize::MAX;

pub(crate) struct Node {
    pub(crate) children: HashMap<u8, NodeId>,
    start: usize,
    end: usize,
    suffix_link: NodeId,
    /// start index of some suffix in this subtree that begins in the first
    /// string, filled in by the extractor's tagging pass
    pub(crate) origin_s1: Option<usize>,
    /// likewise for the second string
    pub(crate) origin_s2: Option<usize>,
}

impl Node {
    fn new(start: usize, end: usize) -> Self {
        Self {
            children: HashMap::new(),
            start,
            end,
            suffix_link: INVALID,
            origin_s1: None,
            origin_s2: None,
        }
    }
}

/// Explicit suffix tree over a byte string, nodes stored in an arena vector
/// and addressed by index.
pub struct SuffixTree {
    text: Vec<u8>,
    pub(crate) nodes: Vec<Node>,
    /// shared end of all open leaf edges; equals `text.len()` once built
    end: usize,
}

impl SuffixTree {
    /// Build the suffix tree for `text`, one extension pass per byte.
    /// The empty input yields a tree with only the root.
    pub fn build(text: &[u8]) -> SuffixTree {
        let mut b = Builder {
            tree: SuffixTree {
                text: text.to_vec(),
                nodes: vec![Node::new(0, 0)],
                end: 0,
            },
            active_node: ROOT,
            active_edge: 0,
            active_length: 0,
            remaining: 0,
            last_new: INVALID,
        };
        for pos in 0..text.len() {
            b.extend(pos);
        }
        b.tree
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn label_end(&self, v: NodeId) -> usize {
        let e = self.nodes[v].end;
        if e == OPEN {
            self.end
        } else {
            e
        }
    }

    /// length of the edge label leading into `v`
    pub(crate) fn edge_len(&self, v: NodeId) -> usize {
        self.label_end(v) - self.nodes[v].start
    }

    #[cfg(test)]
    fn label(&self, v: NodeId) -> &[u8] {
        &self.text[self.nodes[v].start..self.label_end(v)]
    }
}

// Construction state: the active point plus the two phase-local registers.
// Only the tree itself survives the build call.
struct Builder {
    tree: SuffixTree,
    active_node: NodeId,
    active_edge: usize,
    active_length: usize,
    remaining: usize,
    last_new: NodeId,
}

impl Builder {
    fn new_node(&mut self, start: usize, end: usize) -> NodeId {
        self.tree.nodes.push(Node::new(start, end));
        self.tree.nodes.len() - 1
    }

    // walking down is charged against active_length
    fn walk_down(&mut self, next: NodeId) -> bool {
        let len = self.tree.edge_len(next);
        if self.active_length >= len {
            self.active_edge += len;
            self.active_length -= len;
            self.active_node = next;
            return true;
        }
        false
    }

    fn resolve_link(&mut self, to: NodeId) {
        if self.last_new != INVALID {
            self.tree.nodes[self.last_new].suffix_link = to;
            self.last_new = INVALID;
        }
    }

    /// One Ukkonen phase: make every suffix of `text[..=pos]` present in
    /// the tree, at least implicitly.
    fn extend(&mut self, pos: usize) {
        self.tree.end = pos + 1;
        self.remaining += 1;
        self.last_new = INVALID;

        while self.remaining > 0 {
            if self.active_length == 0 {
                self.active_edge = pos;
            }
            let first = self.tree.text[self.active_edge];
            let next = self.tree.nodes[self.active_node].children.get(&first).copied();
            match next {
                None => {
                    // rule 2: new leaf hanging off the active node
                    let leaf = self.new_node(pos, OPEN);
                    self.tree.nodes[self.active_node].children.insert(first, leaf);
                    let link_to = self.active_node;
                    self.resolve_link(link_to);
                }
                Some(next) => {
                    if self.walk_down(next) {
                        continue;
                    }
                    let cur = self.tree.text[self.tree.nodes[next].start + self.active_length];
                    if cur == self.tree.text[pos] {
                        // rule 3: the suffix is already here implicitly;
                        // this ends the phase
                        self.active_length += 1;
                        let link_to = self.active_node;
                        self.resolve_link(link_to);
                        break;
                    }
                    // rule 2 via split: cut the edge at the active length,
                    // hang a new leaf off the split node
                    let next_start = self.tree.nodes[next].start;
                    let split = self.new_node(next_start, next_start + self.active_length);
                    self.tree.nodes[self.active_node].children.insert(first, split);
                    let leaf = self.new_node(pos, OPEN);
                    let c = self.tree.text[pos];
                    self.tree.nodes[split].children.insert(c, leaf);
                    self.tree.nodes[next].start = next_start + self.active_length;
                    self.tree.nodes[split].children.insert(cur, next);
                    if self.last_new != INVALID {
                        self.tree.nodes[self.last_new].suffix_link = split;
                    }
                    self.last_new = split;
                }
            }

            self.remaining -= 1;
            if self.active_node == ROOT && self.active_length > 0 {
                self.active_length -= 1;
                self.active_edge = pos - self.remaining + 1;
            } else if self.tree.nodes[self.active_node].suffix_link != INVALID {
                self.active_node = self.tree.nodes[self.active_node].suffix_link;
            } else {
                self.active_node = ROOT;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // every root-to-leaf label concatenation, via explicit stack
    fn leaf_strings(tree: &SuffixTree) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, Vec<u8>)> = vec![(ROOT, Vec::new())];
        while let Some((v, path)) = stack.pop() {
            if v != ROOT && tree.nodes[v].children.is_empty() {
                out.push(path);
                continue;
            }
            for &c in tree.nodes[v].children.values() {
                let mut p = path.clone();
                p.extend_from_slice(tree.label(c));
                stack.push((c, p));
            }
        }
        out
    }

    // every suffix of text[i..] for i in 0..len; the final byte is assumed
    // unique so each of them ends at a leaf
    fn assert_spells_all_suffixes(text: &[u8]) {
        let tree = SuffixTree::build(text);
        let mut got = leaf_strings(&tree);
        let mut want: Vec<Vec<u8>> = (0..text.len()).map(|i| text[i..].to_vec()).collect();
        got.sort();
        want.sort();
        assert_eq!(got, want, "text: {:?}", text);
    }

    fn fibonacci_word(k: usize) -> Vec<u8> {
        let (mut prev, mut cur) = (vec![b'b'], vec![b'a']);
        for _ in 0..k {
            let next = [cur.as_slice(), prev.as_slice()].concat();
            prev = cur;
            cur = next;
        }
        cur
    }

    fn thue_morse_word(k: usize) -> Vec<u8> {
        let mut w = vec![b'a'];
        for _ in 0..k {
            let flipped: Vec<u8> = w
                .iter()
                .map(|&c| if c == b'a' { b'b' } else { b'a' })
                .collect();
            w.extend(flipped);
        }
        w
    }

    #[test]
    fn test_empty_text() {
        let tree = SuffixTree::build(b"");
        assert_eq!(tree.node_count(), 1);
        assert!(tree.nodes[ROOT].children.is_empty());
    }

    #[test]
    fn test_spells_all_suffixes_small() {
        assert_spells_all_suffixes(b"a$");
        assert_spells_all_suffixes(b"banana$");
        assert_spells_all_suffixes(b"abcabxabcd$");
        assert_spells_all_suffixes(b"mississippi$");
        // the two-string shape the extractor consumes
        assert_spells_all_suffixes(b"abcdef$zcdefg#");
        // single repeated letter keeps the active point on one edge for the
        // whole build
        assert_spells_all_suffixes(b"aaaaaaaaaa$");
    }

    #[test]
    fn test_spells_all_suffixes_structured() {
        let mut w = fibonacci_word(10);
        w.push(b'$');
        assert_spells_all_suffixes(&w);

        let mut w = thue_morse_word(6);
        w.push(b'$');
        assert_spells_all_suffixes(&w);
    }

    #[test]
    fn test_spells_all_suffixes_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let len = rng.gen_range(0..40);
            let mut text: Vec<u8> = (0..len).map(|_| b'a' + rng.gen_range(0..3)).collect();
            text.push(b'$');
            assert_spells_all_suffixes(&text);
        }
    }

    #[test]
    fn test_node_count_linear() {
        // at most 2n nodes for a text of length n > 1, root included
        let mut w = fibonacci_word(12);
        w.push(b'$');
        let n = w.len();
        let tree = SuffixTree::build(&w);
        assert!(tree.node_count() <= 2 * n);
    }
}
