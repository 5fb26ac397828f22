//! Element abstraction and affix helpers shared by all metrics.

/// An element that can take part in a bit-parallel comparison.
///
/// Besides equality every element needs a 64-bit key. Keys must be injective:
/// two elements compare equal exactly when their keys are equal. Keys below 256
/// are served from a dense lookup table, everything else goes through a hash map.
pub trait HashableChar: Copy + Eq {
    fn hash_char(&self) -> u64;
}

macro_rules! impl_hashable_char_unsigned {
    ($($t:ty),*) => {
        $(
            impl HashableChar for $t {
                #[inline]
                fn hash_char(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

macro_rules! impl_hashable_char_signed {
    ($($t:ty),*) => {
        $(
            impl HashableChar for $t {
                // sign extension keeps the mapping injective
                #[inline]
                fn hash_char(&self) -> u64 {
                    *self as i64 as u64
                }
            }
        )*
    };
}

impl_hashable_char_unsigned!(u8, u16, u32, u64, usize);
impl_hashable_char_signed!(i8, i16, i32, i64, isize);

impl HashableChar for char {
    #[inline]
    fn hash_char(&self) -> u64 {
        u64::from(u32::from(*self))
    }
}

impl HashableChar for bool {
    #[inline]
    fn hash_char(&self) -> u64 {
        u64::from(*self)
    }
}

/// Length of the shared prefix of two sequences.
pub(crate) fn common_prefix<T: PartialEq>(s1: &[T], s2: &[T]) -> usize {
    s1.iter().zip(s2).take_while(|(a, b)| a == b).count()
}

/// Length of the shared suffix of two sequences.
pub(crate) fn common_suffix<T: PartialEq>(s1: &[T], s2: &[T]) -> usize {
    s1.iter()
        .rev()
        .zip(s2.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// The two sequences with their shared prefix and suffix cut off.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Affix<'a, T> {
    pub s1: &'a [T],
    pub s2: &'a [T],
    pub prefix_len: usize,
    pub suffix_len: usize,
}

impl<T> Affix<'_, T> {
    /// Total number of elements removed from each sequence.
    pub fn removed(&self) -> usize {
        self.prefix_len + self.suffix_len
    }
}

/// Strips the common prefix and then the common suffix of the remainder.
pub(crate) fn remove_common_affix<'a, T: PartialEq>(s1: &'a [T], s2: &'a [T]) -> Affix<'a, T> {
    let prefix_len = common_prefix(s1, s2);
    let s1 = &s1[prefix_len..];
    let s2 = &s2[prefix_len..];

    let suffix_len = common_suffix(s1, s2);
    Affix {
        s1: &s1[..s1.len() - suffix_len],
        s2: &s2[..s2.len() - suffix_len],
        prefix_len,
        suffix_len,
    }
}
