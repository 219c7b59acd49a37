use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceIdx(usize);
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointIdx(usize);

macro_rules! idx_debug_impl {
    ($($t:ty),*) => {
        $(
            impl fmt::Debug for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }
        )*
    };
}

idx_debug_impl! {
    FaceIdx,
    PointIdx
}

macro_rules! idx_impl {
    ($($t:ident),*) => {
        $(
            impl From<usize> for $t {
                #[inline]
                fn from(idx: usize) -> Self {
                    Self(idx)
                }
            }

            impl From<$t> for usize {
                #[inline]
                fn from(idx: $t) -> Self {
                    idx.0
                }
            }

            impl $t {
                /// Iterates over every index in `0..len`.
                pub fn range(len: usize) -> impl Iterator<Item = Self> {
                    (0..len).map(Self)
                }
            }
        )*
    };
}

idx_impl! {
    FaceIdx,
    PointIdx
}

/// Configuration objects provide their own defaults through this trait.
pub trait ConfigType {
    fn default() -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idx_conversions() {
        let p = PointIdx::from(7);
        assert_eq!(usize::from(p), 7);
        assert_eq!(format!("{:?}", p), "7");
    }

    #[test]
    fn idx_range() {
        let faces = FaceIdx::range(3).map(usize::from).collect::<Vec<_>>();
        assert_eq!(faces, vec![0, 1, 2]);
        assert_eq!(FaceIdx::range(0).count(), 0);
    }
}
