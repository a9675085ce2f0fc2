// longest common substrings of two strings, via three passes over the
// suffix tree of s1 ⧺ SEP1 ⧺ s2 ⧺ SEP2

use std::collections::BTreeSet;

use anyhow::{ensure, Result};

use crate::suffix_tree::{NodeId, SuffixTree, ROOT};

/// separator appended after the first string
pub const SEP1: u8 = b'$';
/// separator appended after the second string
pub const SEP2: u8 = b'#';

/// Longest common substrings of `s1` and `s2`.
///
/// Returns the maximum common length together with every distinct substring
/// of that length, sorted. The separators `SEP1`/`SEP2` are assumed absent
/// from both inputs; callers with a richer alphabet can join the strings
/// with separators of their own and call [`extract`] directly.
pub fn longest_common_substrings(s1: &[u8], s2: &[u8]) -> (usize, Vec<Vec<u8>>) {
    let mut text = Vec::with_capacity(s1.len() + s2.len() + 2);
    text.extend_from_slice(s1);
    text.push(SEP1);
    text.extend_from_slice(s2);
    text.push(SEP2);
    let mut tree = SuffixTree::build(&text);
    // separator positions are in bounds by construction
    let (max_len, set) = extract_unchecked(&mut tree, s1.len(), s1.len() + 1 + s2.len());
    (max_len, set.into_iter().collect())
}

/// Extract the longest common substrings from a built tree.
///
/// `sep1` and `sep2` are the positions of the two separator bytes in the
/// tree's text: indices below `sep1` belong to the first string, indices
/// strictly between `sep1` and `sep2` to the second. Out-of-range or
/// misordered positions are a caller bug and fail fast.
pub fn extract(tree: &mut SuffixTree, sep1: usize, sep2: usize) -> Result<(usize, BTreeSet<Vec<u8>>)> {
    ensure!(
        sep1 < sep2,
        "separator positions misordered: {} >= {}",
        sep1,
        sep2
    );
    ensure!(
        sep2 < tree.text().len(),
        "separator position {} outside text of length {}",
        sep2,
        tree.text().len()
    );
    Ok(extract_unchecked(tree, sep1, sep2))
}

fn extract_unchecked(tree: &mut SuffixTree, sep1: usize, sep2: usize) -> (usize, BTreeSet<Vec<u8>>) {
    tag_origins(tree, sep1, sep2);
    let max_len = max_common_depth(tree);
    let mut out = BTreeSet::new();
    if max_len > 0 {
        collect_at_depth(tree, sep1, max_len, &mut out);
    }
    (max_len, out)
}

// Post-order tagging: each leaf is classified by where its suffix starts,
// and every inner node inherits one example start per side from its
// children. Origins are reset up front so repeated extraction over the
// same tree gives the same answer.
fn tag_origins(tree: &mut SuffixTree, sep1: usize, sep2: usize) {
    let n = tree.text().len();
    // (node, string depth, children already visited)
    let mut stack: Vec<(NodeId, usize, bool)> = vec![(ROOT, 0, false)];
    while let Some((v, depth, children_done)) = stack.pop() {
        if children_done {
            let kids: Vec<NodeId> = tree.nodes[v].children.values().copied().collect();
            for c in kids {
                if tree.nodes[v].origin_s1.is_none() {
                    tree.nodes[v].origin_s1 = tree.nodes[c].origin_s1;
                }
                if tree.nodes[v].origin_s2.is_none() {
                    tree.nodes[v].origin_s2 = tree.nodes[c].origin_s2;
                }
            }
            continue;
        }
        tree.nodes[v].origin_s1 = None;
        tree.nodes[v].origin_s2 = None;
        if v != ROOT && tree.nodes[v].children.is_empty() {
            // leaf: the suffix it spells starts at n - depth; suffixes
            // starting at or after a separator belong to neither string
            let start = n - depth;
            if start < sep1 {
                tree.nodes[v].origin_s1 = Some(start);
            } else if start > sep1 && start < sep2 {
                tree.nodes[v].origin_s2 = Some(start);
            }
            continue;
        }
        stack.push((v, depth, true));
        let kids: Vec<NodeId> = tree.nodes[v].children.values().copied().collect();
        for c in kids {
            let child_depth = depth + tree.edge_len(c);
            stack.push((c, child_depth, false));
        }
    }
}

// deepest node whose subtree holds suffixes from both strings; the root
// (depth 0) never counts
fn max_common_depth(tree: &SuffixTree) -> usize {
    let mut max_len = 0;
    let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
    while let Some((v, depth)) = stack.pop() {
        let node = &tree.nodes[v];
        if depth > max_len && node.origin_s1.is_some() && node.origin_s2.is_some() {
            max_len = depth;
        }
        for &c in node.children.values() {
            stack.push((c, depth + tree.edge_len(c)));
        }
    }
    max_len
}

fn collect_at_depth(tree: &SuffixTree, sep1: usize, max_len: usize, out: &mut BTreeSet<Vec<u8>>) {
    let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
    while let Some((v, depth)) = stack.pop() {
        let node = &tree.nodes[v];
        if depth == max_len {
            if let (Some(start), Some(_)) = (node.origin_s1, node.origin_s2) {
                // the example must lie entirely inside the first string;
                // a range running past sep1 would carry a separator byte
                if start + max_len <= sep1 {
                    out.insert(tree.text()[start..start + max_len].to_vec());
                }
            }
            continue;
        }
        for &c in node.children.values() {
            stack.push((c, depth + tree.edge_len(c)));
        }
    }
}
