//! # Edit Scripts
//!
//! Alignment types produced by the `editops` functions of the metrics.
//!
//! - [`Editops`]: ordered single-element operations. Applying them to the source
//!   sequence yields the destination sequence.
//! - [`Opcodes`]: the same alignment as runs of equal, replaced, inserted and deleted
//!   elements, covering both sequences from start to end.
//!
//! Positions always refer to the original sequences. An insertion at `src_pos` places
//! `dest[dest_pos]` in front of `src[src_pos]`; a deletion at `dest_pos` removes
//! `src[src_pos]` where the destination is at position `dest_pos`.

use crate::error::{Error, Result};
use std::slice;

/// Kind of a single edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    Insert,
    Delete,
    Replace,
}

/// A single edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditOp {
    pub edit_type: EditType,
    pub src_pos: usize,
    pub dest_pos: usize,
}

impl EditOp {
    pub fn new(edit_type: EditType, src_pos: usize, dest_pos: usize) -> Self {
        Self {
            edit_type,
            src_pos,
            dest_pos,
        }
    }
}

/// Ordered list of edit operations between a source and a destination sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editops {
    ops: Vec<EditOp>,
    src_len: usize,
    dest_len: usize,
}

impl Editops {
    /// Wraps operations that are already sorted by position.
    pub fn new(ops: Vec<EditOp>, src_len: usize, dest_len: usize) -> Self {
        Self {
            ops,
            src_len,
            dest_len,
        }
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Length of the source sequence the operations were computed for.
    pub fn src_len(&self) -> usize {
        self.src_len
    }

    /// Length of the destination sequence the operations were computed for.
    pub fn dest_len(&self) -> usize {
        self.dest_len
    }

    pub fn as_slice(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn iter(&self) -> slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    /// Operations that turn the destination back into the source.
    pub fn inverse(&self) -> Self {
        let ops = self
            .ops
            .iter()
            .map(|op| {
                let edit_type = match op.edit_type {
                    EditType::Insert => EditType::Delete,
                    EditType::Delete => EditType::Insert,
                    EditType::Replace => EditType::Replace,
                };
                EditOp::new(edit_type, op.dest_pos, op.src_pos)
            })
            .collect();

        Self::new(ops, self.dest_len, self.src_len)
    }

    /// Applies the operations to `src`, taking inserted and replacing elements from `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the sequence lengths differ from the ones the
    /// operations were computed for, or when the operations are out of order or out of range.
    pub fn apply<T: Clone>(&self, src: &[T], dest: &[T]) -> Result<Vec<T>> {
        self.check_lengths(src.len(), dest.len())?;

        let mut res = Vec::with_capacity(self.dest_len);
        let mut src_pos = 0;

        for op in &self.ops {
            if op.src_pos < src_pos || op.src_pos > src.len() {
                return Err(Error::invalid_argument(format!(
                    "edit operation at source position {} is out of order or out of range",
                    op.src_pos
                )));
            }

            // elements between two operations are kept unchanged
            res.extend_from_slice(&src[src_pos..op.src_pos]);
            src_pos = op.src_pos;

            match op.edit_type {
                EditType::Replace | EditType::Insert => {
                    let ch = dest.get(op.dest_pos).ok_or_else(|| {
                        Error::invalid_argument(format!(
                            "destination position {} is out of range",
                            op.dest_pos
                        ))
                    })?;
                    res.push(ch.clone());
                }
                EditType::Delete => {}
            }

            if op.edit_type != EditType::Insert {
                if src_pos == src.len() {
                    return Err(Error::invalid_argument(format!(
                        "source position {} is out of range",
                        op.src_pos
                    )));
                }
                src_pos += 1;
            }
        }

        res.extend_from_slice(&src[src_pos..]);
        Ok(res)
    }

    /// Converts to [`Opcodes`], filling the gaps between operations with equal blocks.
    pub fn as_opcodes(&self) -> Opcodes {
        let mut blocks = Vec::new();
        let mut src_pos = 0;
        let mut dest_pos = 0;
        let mut i = 0;

        while i < self.ops.len() {
            if src_pos < self.ops[i].src_pos || dest_pos < self.ops[i].dest_pos {
                blocks.push(Opcode::new(
                    OpTag::Equal,
                    src_pos,
                    self.ops[i].src_pos,
                    dest_pos,
                    self.ops[i].dest_pos,
                ));
                src_pos = self.ops[i].src_pos;
                dest_pos = self.ops[i].dest_pos;
            }

            let src_begin = src_pos;
            let dest_begin = dest_pos;
            let edit_type = self.ops[i].edit_type;
            loop {
                match edit_type {
                    EditType::Replace => {
                        src_pos += 1;
                        dest_pos += 1;
                    }
                    EditType::Insert => dest_pos += 1,
                    EditType::Delete => src_pos += 1,
                }

                i += 1;
                // extend the run while the next operation continues it
                if i == self.ops.len()
                    || self.ops[i].edit_type != edit_type
                    || self.ops[i].src_pos != src_pos
                    || self.ops[i].dest_pos != dest_pos
                {
                    break;
                }
            }

            blocks.push(Opcode::new(
                edit_type.into(),
                src_begin,
                src_pos,
                dest_begin,
                dest_pos,
            ));
        }

        if src_pos < self.src_len || dest_pos < self.dest_len {
            blocks.push(Opcode::new(
                OpTag::Equal,
                src_pos,
                self.src_len,
                dest_pos,
                self.dest_len,
            ));
        }

        Opcodes::new(blocks, self.src_len, self.dest_len)
    }

    fn check_lengths(&self, src_len: usize, dest_len: usize) -> Result<()> {
        if src_len != self.src_len || dest_len != self.dest_len {
            return Err(Error::invalid_argument(format!(
                "edit operations were computed for lengths ({}, {}), got ({}, {})",
                self.src_len, self.dest_len, src_len, dest_len
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Editops {
    type Item = &'a EditOp;
    type IntoIter = slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Kind of an [`Opcode`] block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    Equal,
    Replace,
    Insert,
    Delete,
}

impl From<EditType> for OpTag {
    fn from(edit_type: EditType) -> Self {
        match edit_type {
            EditType::Insert => OpTag::Insert,
            EditType::Delete => OpTag::Delete,
            EditType::Replace => OpTag::Replace,
        }
    }
}

/// A block `src[src_begin..src_end]` -> `dest[dest_begin..dest_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub tag: OpTag,
    pub src_begin: usize,
    pub src_end: usize,
    pub dest_begin: usize,
    pub dest_end: usize,
}

impl Opcode {
    pub fn new(
        tag: OpTag,
        src_begin: usize,
        src_end: usize,
        dest_begin: usize,
        dest_end: usize,
    ) -> Self {
        Self {
            tag,
            src_begin,
            src_end,
            dest_begin,
            dest_end,
        }
    }
}

/// Alignment expressed as consecutive blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opcodes {
    ops: Vec<Opcode>,
    src_len: usize,
    dest_len: usize,
}

impl Opcodes {
    pub fn new(ops: Vec<Opcode>, src_len: usize, dest_len: usize) -> Self {
        Self {
            ops,
            src_len,
            dest_len,
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn src_len(&self) -> usize {
        self.src_len
    }

    pub fn dest_len(&self) -> usize {
        self.dest_len
    }

    pub fn as_slice(&self) -> &[Opcode] {
        &self.ops
    }

    pub fn iter(&self) -> slice::Iter<'_, Opcode> {
        self.ops.iter()
    }

    /// Expands the blocks back into single-element operations.
    pub fn as_editops(&self) -> Editops {
        let mut ops = Vec::new();
        for block in &self.ops {
            match block.tag {
                OpTag::Equal => {}
                OpTag::Replace => {
                    for j in 0..block.src_end - block.src_begin {
                        ops.push(EditOp::new(
                            EditType::Replace,
                            block.src_begin + j,
                            block.dest_begin + j,
                        ));
                    }
                }
                OpTag::Insert => {
                    for j in 0..block.dest_end - block.dest_begin {
                        ops.push(EditOp::new(
                            EditType::Insert,
                            block.src_begin,
                            block.dest_begin + j,
                        ));
                    }
                }
                OpTag::Delete => {
                    for j in 0..block.src_end - block.src_begin {
                        ops.push(EditOp::new(
                            EditType::Delete,
                            block.src_begin + j,
                            block.dest_begin,
                        ));
                    }
                }
            }
        }

        Editops::new(ops, self.src_len, self.dest_len)
    }

    /// Rebuilds the destination from `src` and `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when a block reaches past either sequence.
    pub fn apply<T: Clone>(&self, src: &[T], dest: &[T]) -> Result<Vec<T>> {
        let mut res = Vec::with_capacity(dest.len());
        for block in &self.ops {
            let (from, begin, end) = match block.tag {
                OpTag::Equal => (src, block.src_begin, block.src_end),
                OpTag::Replace | OpTag::Insert => (dest, block.dest_begin, block.dest_end),
                OpTag::Delete => continue,
            };

            let part = from.get(begin..end).ok_or_else(|| {
                Error::invalid_argument(format!("block {}..{} is out of range", begin, end))
            })?;
            res.extend_from_slice(part);
        }
        Ok(res)
    }
}

impl<'a> IntoIterator for &'a Opcodes {
    type Item = &'a Opcode;
    type IntoIter = slice::Iter<'a, Opcode>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
