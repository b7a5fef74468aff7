use std::{
    cmp::Ordering,
    collections::{BTreeMap, BinaryHeap},
    fmt,
};

use bitvec::{order::Msb0, vec::BitVec};

use crate::{
    error::{HuffError, Result},
    frequency::FrequencyTable,
};

/// Root-to-leaf bit path of a symbol. Left edges are `0`, right edges `1`.
pub type Code = BitVec<u8, Msb0>;

/// Symbol to code mapping, iterated in ascending symbol order.
pub type CodeTable = BTreeMap<u8, Code>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Branch {
        freq: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn freq(&self) -> u64 {
        match self {
            HuffNode::Leaf { freq, .. } | HuffNode::Branch { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Branch {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn display_with_indent(&self, f: &mut fmt::Formatter<'_>, indent: &str, last: bool) -> fmt::Result {
        write!(f, "{}{}", indent, if last { "└─ " } else { "├─ " })?;
        match self {
            HuffNode::Leaf { symbol, freq } => writeln!(f, "Count: {} (Leaf Value: {})", freq, symbol)?,
            HuffNode::Branch { freq, .. } => writeln!(f, "Count: {}", freq)?,
        }

        if let HuffNode::Branch { left, right, .. } = self {
            let new_indent = if last {
                format!("{}    ", indent)
            } else {
                format!("{}│   ", indent)
            };
            left.display_with_indent(f, &new_indent, false)?;
            right.display_with_indent(f, &new_indent, true)?;
        }
        Ok(())
    }
}

/// Priority queue entry. Lower frequency pops first, equal frequencies pop in
/// insertion order.
#[derive(Debug)]
struct Queued {
    seq: u64,
    node: HuffNode,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    // Reversed so that `BinaryHeap` behaves as a min-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut seq = 0;
        let mut queue = BinaryHeap::with_capacity(frequencies.distinct());
        for (symbol, freq) in frequencies.iter() {
            queue.push(Queued {
                seq,
                node: HuffNode::Leaf { symbol, freq },
            });
            seq += 1;
        }

        let root = loop {
            let left = queue
                .pop()
                .ok_or_else(|| HuffError::invalid_input("frequency table is empty"))?;
            let Some(right) = queue.pop() else {
                break left.node;
            };
            queue.push(Queued {
                seq,
                node: HuffNode::merge(left.node, right.node),
            });
            seq += 1;
        };

        let tree = HuffmanTree { root };
        log::trace!("Huffman tree:\n{}", tree);
        Ok(tree)
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Extracts every symbol's code.
    ///
    /// A tree made of a single leaf has no edges; its symbol gets the 1-bit
    /// code `0` so that every encoded symbol still consumes payload bits.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        if let HuffNode::Leaf { symbol, .. } = self.root {
            table.insert(symbol, Code::repeat(false, 1));
            return table;
        }

        let mut stack = vec![(&self.root, Code::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    table.insert(*symbol, path);
                }
                HuffNode::Branch { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    // Left is popped, and therefore visited, first.
                    stack.push((right.as_ref(), right_path));
                    stack.push((left.as_ref(), left_path));
                }
            }
        }
        table
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.display_with_indent(f, "", true)
    }
}
