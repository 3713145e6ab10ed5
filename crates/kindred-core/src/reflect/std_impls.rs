//! [`Reflect`] implementations for the standard library.
//!
//! Numeric types widen into the three scalar domains (signed, unsigned,
//! float) so width never affects comparison. Smart pointers defer to their
//! pointee, which is what lets shared `Rc` nodes carry one identity and
//! lets `Box<T>` compare transparently against a bare `T`. Collections
//! borrow their elements; only owned data is reflectable, so slices appear
//! through `Vec<T>` or `[T; N]` rather than directly.

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{Deferral, Reflect, RecordTag, RecordView, Scalar, Shape};

fn refs<'a, T: Reflect>(items: impl Iterator<Item = &'a T>) -> Vec<&'a dyn Reflect> {
    items.map(|item| item as &dyn Reflect).collect()
}

macro_rules! reflect_signed {
    ($($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::Int(*self as i128))
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )+
    };
}

macro_rules! reflect_unsigned {
    ($($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::UInt(*self as u128))
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )+
    };
}

reflect_signed!(i8, i16, i32, i64, i128, isize);
reflect_unsigned!(u8, u16, u32, u64, u128, usize);

impl Reflect for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(f64::from(*self)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Char(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Unit)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self.as_str()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for &'static str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(*self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `None` is the null scalar; `Some` is transparent.
impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => Shape::Deferred(Deferral::Plain(inner)),
            None => Shape::Scalar(Scalar::Null),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Tuples are positional records; the field names are the indices.
macro_rules! reflect_tuples {
    ($(($($name:ident : $idx:tt),+)),+ $(,)?) => {
        $(
            impl<$($name: Reflect),+> Reflect for ($($name,)+) {
                fn shape(&self) -> Shape<'_> {
                    Shape::Record(
                        RecordView::new(RecordTag::of::<Self>())
                            $(.with_field(stringify!($idx), &self.$idx))+,
                    )
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )+
    };
}

reflect_tuples!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
    (A: 0, B: 1, C: 2, D: 3, E: 4),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5),
);

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Array(refs(self.iter()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(refs(self.iter()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(refs(self.iter()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for LinkedList<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(refs(self.iter()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect, S: 'static> Reflect for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Bag(refs(self.iter()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Bag(refs(self.iter()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for BinaryHeap<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Bag(refs(self.iter()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K: Reflect, V: Reflect, S: 'static> Reflect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Deferred(Deferral::Plain(&**self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Deferred(Deferral::Plain(&**self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Deferred(Deferral::Plain(&**self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Defers through the borrow guard. A cell that is mutably borrowed at
/// comparison time is inaccessible, not unequal.
impl<T: Reflect> Reflect for RefCell<T> {
    fn shape(&self) -> Shape<'_> {
        match self.try_borrow() {
            Ok(guard) => Shape::Deferred(Deferral::Cell(Ref::map(guard, |inner| {
                inner as &dyn Reflect
            }))),
            Err(_) => Shape::Inaccessible("RefCell is mutably borrowed"),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Kind;

    #[test]
    fn test_integer_scalars_widen_by_sign() {
        assert!(matches!(5i8.shape(), Shape::Scalar(Scalar::Int(5))));
        assert!(matches!((-3i64).shape(), Shape::Scalar(Scalar::Int(-3))));
        assert!(matches!(5u64.shape(), Shape::Scalar(Scalar::UInt(5))));
    }

    #[test]
    fn test_float_widens_to_f64() {
        assert!(matches!(1.5f32.shape(), Shape::Scalar(Scalar::Float(v)) if v == 1.5));
    }

    #[test]
    fn test_strings_share_one_scalar() {
        let owned = String::from("abc");
        assert!(matches!(owned.shape(), Shape::Scalar(Scalar::Str("abc"))));
        assert!(matches!("abc".shape(), Shape::Scalar(Scalar::Str("abc"))));
    }

    #[test]
    fn test_option_defers_or_is_null() {
        let some: Option<i32> = Some(4);
        let none: Option<i32> = None;
        assert!(matches!(some.shape(), Shape::Deferred(_)));
        assert!(matches!(none.shape(), Shape::Scalar(Scalar::Null)));
    }

    #[test]
    fn test_collection_kinds() {
        assert_eq!([1, 2].shape().kind(), Kind::Array);
        assert_eq!(vec![1, 2].shape().kind(), Kind::Sequence);
        assert_eq!(VecDeque::from([1, 2]).shape().kind(), Kind::Sequence);
        assert_eq!(HashSet::from([1, 2]).shape().kind(), Kind::Bag);
        assert_eq!(BTreeSet::from([1, 2]).shape().kind(), Kind::Bag);
        assert_eq!(HashMap::from([(1, 2)]).shape().kind(), Kind::Map);
        assert_eq!(BTreeMap::from([(1, 2)]).shape().kind(), Kind::Map);
    }

    #[test]
    fn test_tuple_is_positional_record() {
        let pair = (1i32, String::from("a"));
        let Shape::Record(view) = pair.shape() else {
            panic!("expected record");
        };
        assert_eq!(view.tag, RecordTag::of::<(i32, String)>());
        assert_eq!(view.fields[0].name, "0");
        assert_eq!(view.fields[1].name, "1");
    }

    #[test]
    fn test_rc_defers_to_pointee() {
        let shared = Rc::new(3i32);
        let Shape::Deferred(deferral) = shared.shape() else {
            panic!("expected deferral");
        };
        assert!(matches!(
            deferral.target().shape(),
            Shape::Scalar(Scalar::Int(3))
        ));
    }

    #[test]
    fn test_refcell_defers_until_mutably_borrowed() {
        let cell = RefCell::new(7i32);
        assert!(matches!(cell.shape(), Shape::Deferred(_)));
        let hold = cell.borrow_mut();
        assert!(matches!(cell.shape(), Shape::Inaccessible(_)));
        drop(hold);
    }
}
