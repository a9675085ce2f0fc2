// longest common substrings of two strings via an online suffix tree

pub mod lcs;
pub mod suffix_tree;
